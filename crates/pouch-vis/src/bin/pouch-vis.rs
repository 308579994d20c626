//! Pouch Carousel Host binary
//!
//! Usage: pouch-vis [PORT] [CONTENT_JSON]

use std::env;
use std::sync::Arc;

use pouch_carousel::Carousel;
use pouch_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pouch_vis=info,pouch_carousel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = VisConfig::from_env();

    // Positional args override the environment
    let args: Vec<String> = env::args().collect();
    if let Some(port) = args.get(1).and_then(|s| s.parse().ok()) {
        config.port = port;
    }
    if let Some(path) = args.get(2) {
        config.content = Some(path.into());
    }

    let records = Arc::new(config.load_collection()?);
    let overrides = Arc::new(config.load_overrides()?);
    tracing::info!(
        records = records.len(),
        overrides = overrides.len(),
        interval = ?config.carousel.auto_advance,
        "Mounting testimonial carousel"
    );

    let carousel = Carousel::new(records, config.carousel.clone())?.with_overrides(overrides);
    VisServer::new(carousel).serve(config.port, config.tick).await?;

    Ok(())
}
