//! Carousel tuning parameters.

use std::time::Duration;

use crate::drag::DEFAULT_DRAG_THRESHOLD;
use crate::error::{Error, Result};
use crate::rotation::StartPosition;
use crate::timer::{DEFAULT_INTERVAL, SHOWCASE_INTERVAL};

/// Cards rendered on each side of the active one.
pub const DEFAULT_WINDOW_RADIUS: usize = 3;

/// Largest accepted window radius.
pub const MAX_WINDOW_RADIUS: usize = 64;

/// Configuration for one carousel instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Time between automatic advances
    pub auto_advance: Duration,

    /// Drag distance (px) that must be exceeded to navigate
    pub drag_threshold: f64,

    /// Cards kept on each side of the active card
    pub window_radius: usize,

    /// Initial active index
    pub start: StartPosition,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance: DEFAULT_INTERVAL,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            window_radius: DEFAULT_WINDOW_RADIUS,
            start: StartPosition::First,
        }
    }
}

impl CarouselConfig {
    /// Defaults overridden by `POUCH_AUTO_ADVANCE_MS`,
    /// `POUCH_DRAG_THRESHOLD_PX` and `POUCH_WINDOW_RADIUS`.
    /// Unparseable values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let auto_advance = std::env::var("POUCH_AUTO_ADVANCE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.auto_advance);

        let drag_threshold = std::env::var("POUCH_DRAG_THRESHOLD_PX")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults.drag_threshold);

        let window_radius = std::env::var("POUCH_WINDOW_RADIUS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.window_radius);

        Self {
            auto_advance,
            drag_threshold,
            window_radius,
            start: defaults.start,
        }
    }

    /// Preset for the product showcase coverflow: faster, starts mid-list.
    #[must_use]
    pub fn showcase() -> Self {
        Self {
            auto_advance: SHOWCASE_INTERVAL,
            start: StartPosition::Middle,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.auto_advance.is_zero() {
            return Err(Error::InvalidConfig {
                field: "auto_advance",
                reason: "must be greater than zero",
            });
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "drag_threshold",
                reason: "must be a positive number of pixels",
            });
        }
        if self.window_radius > MAX_WINDOW_RADIUS {
            return Err(Error::InvalidConfig {
                field: "window_radius",
                reason: "must be at most 64 cards",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behaviour() {
        let config = CarouselConfig::default();
        assert_eq!(config.auto_advance, Duration::from_millis(4000));
        assert_eq!(config.drag_threshold, 50.0);
        assert_eq!(config.window_radius, 3);
        assert_eq!(config.start, StartPosition::First);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn showcase_preset() {
        let config = CarouselConfig::showcase();
        assert_eq!(config.auto_advance, Duration::from_millis(2000));
        assert_eq!(config.start, StartPosition::Middle);
    }

    #[test]
    fn rejects_bad_values() {
        let zero = CarouselConfig {
            auto_advance: Duration::ZERO,
            ..CarouselConfig::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(Error::InvalidConfig { field: "auto_advance", .. })
        ));

        let negative = CarouselConfig {
            drag_threshold: -1.0,
            ..CarouselConfig::default()
        };
        assert!(negative.validate().is_err());

        let nan = CarouselConfig {
            drag_threshold: f64::NAN,
            ..CarouselConfig::default()
        };
        assert!(nan.validate().is_err());

        let wide = CarouselConfig {
            window_radius: usize::MAX,
            ..CarouselConfig::default()
        };
        assert!(matches!(
            wide.validate(),
            Err(Error::InvalidConfig { field: "window_radius", .. })
        ));

        let widest = CarouselConfig {
            window_radius: MAX_WINDOW_RADIUS,
            ..CarouselConfig::default()
        };
        assert!(widest.validate().is_ok());
    }
}
