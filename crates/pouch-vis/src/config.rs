//! Host configuration.

use std::path::PathBuf;
use std::time::Duration;

use pouch_carousel::CarouselConfig;
use pouch_testimonials::{TestimonialCollection, TextOverrides};

use crate::error::Result;

/// Port the host listens on unless `POUCH_PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 3000;

/// How often the driver task feeds elapsed time into the carousel.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Configuration for the visualization host.
#[derive(Debug, Clone)]
pub struct VisConfig {
    /// HTTP port
    pub port: u16,

    /// Testimonial JSON file; the bundled catalog when unset
    pub content: Option<PathBuf>,

    /// Nested i18n JSON with quote overrides
    pub overrides: Option<PathBuf>,

    /// Driver tick period
    pub tick: Duration,

    pub carousel: CarouselConfig,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("POUCH_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let content = std::env::var("POUCH_CONTENT").ok().map(PathBuf::from);
        let overrides = std::env::var("POUCH_OVERRIDES").ok().map(PathBuf::from);

        let tick = std::env::var("POUCH_TICK_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TICK);

        Self {
            port,
            content,
            overrides,
            tick,
            carousel: CarouselConfig::from_env(),
        }
    }

    pub fn load_collection(&self) -> Result<TestimonialCollection> {
        let collection = match &self.content {
            Some(path) => TestimonialCollection::from_path(path)?,
            None => TestimonialCollection::builtin()?,
        };
        Ok(collection)
    }

    /// Overrides file, or no overrides at all.
    pub fn load_overrides(&self) -> Result<TextOverrides> {
        let overrides = match &self.overrides {
            Some(path) => TextOverrides::from_path(path)?,
            None => TextOverrides::new(),
        };
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VisConfig {
        VisConfig {
            port: DEFAULT_PORT,
            content: None,
            overrides: None,
            tick: DEFAULT_TICK,
            carousel: CarouselConfig::default(),
        }
    }

    #[test]
    fn bundled_catalog_when_no_path() {
        let collection = config().load_collection().unwrap();
        assert_eq!(collection.len(), 13);
        assert!(config().load_overrides().unwrap().is_empty());
    }

    #[test]
    fn missing_content_file_is_an_error() {
        let config = VisConfig {
            content: Some(PathBuf::from("/nonexistent/testimonials.json")),
            ..config()
        };
        assert!(config.load_collection().is_err());
    }
}
