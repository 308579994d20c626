//! Pouch Testimonial Carousel
//!
//! A synchronous state machine for the testimonial carousel: which record is
//! focal, when it advances on its own, how drags and keys navigate, and which
//! overlay sits on top.
//!
//! # Architecture
//!
//! - **Rotation**: active index with wraparound and the visible card window
//! - **Timer**: restartable auto-advance countdown fed by host time
//! - **Drag**: threshold-based prev/next decision
//! - **Overlay**: exclusive video/detail modals with keyboard dismissal
//! - **Carousel**: composes the above behind one event entry point
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use pouch_carousel::{Carousel, CarouselConfig, CarouselEvent};
//! use pouch_testimonials::TestimonialCollection;
//!
//! let records = Arc::new(TestimonialCollection::builtin().unwrap());
//! let mut carousel = Carousel::new(records, CarouselConfig::default()).unwrap();
//!
//! carousel.handle(CarouselEvent::tick(Duration::from_millis(4000))).unwrap();
//! assert_eq!(carousel.active_index(), Some(1));
//! ```

mod carousel;
mod config;
mod coverflow;
mod drag;
mod events;
mod floating;
mod overlay;
mod rotation;
mod suspension;
mod timer;
mod wall;
pub mod error;

pub use carousel::{CardView, Carousel, CarouselView, DetailView, OverlayView, DEFAULT_FEATURED_IMAGE};
pub use config::{CarouselConfig, DEFAULT_WINDOW_RADIUS, MAX_WINDOW_RADIUS};
pub use coverflow::CoverflowTransform;
pub use drag::{decide as decide_drag, DragDecision, DragGesture, DEFAULT_DRAG_THRESHOLD};
pub use error::{Error, Result};
pub use events::{CarouselEvent, CarouselNotice, Key};
pub use floating::{FloatingView, FloatingWidget, FADE_DURATION};
pub use overlay::{embed_url, OverlayCoordinator, OverlayKind, OverlayState};
pub use rotation::{RotationEngine, StartPosition, TransitionDirection, WindowEntry};
pub use suspension::{should_auto_advance, Suspension, SuspensionSource};
pub use timer::{AutoAdvanceTimer, DEFAULT_INTERVAL, SHOWCASE_INTERVAL};
pub use wall::{WallOfLove, DEFAULT_WALL_IMAGE};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use pouch_testimonials::TestimonialCollection;

    #[test]
    fn builtin_catalog_rotates_through_every_record() {
        let records = Arc::new(TestimonialCollection::builtin().unwrap());
        let total = records.len();
        let mut carousel = Carousel::new(records, CarouselConfig::default()).unwrap();

        for _ in 0..total {
            carousel.tick(Duration::from_millis(4000));
        }
        assert_eq!(carousel.active_index(), Some(0));
    }

    #[test]
    fn showcase_starts_in_the_middle() {
        let records = Arc::new(TestimonialCollection::builtin().unwrap());
        let carousel = Carousel::new(records, CarouselConfig::showcase()).unwrap();
        assert_eq!(carousel.active_index(), Some(6));
        assert_eq!(carousel.view().cards.len(), 7);
    }
}
