//! Pouch Testimonials
//!
//! The content side of the testimonial views: an ordered, immutable
//! collection of customer records, localized text overrides, and the
//! placeholder images used when record artwork fails to load.
//!
//! # Example
//!
//! ```
//! use pouch_testimonials::{ImageSlot, TestimonialCollection, TextOverrides};
//!
//! let catalog = TestimonialCollection::builtin().unwrap();
//! let first = catalog.get(0).unwrap();
//!
//! let overrides = TextOverrides::new();
//! assert_eq!(overrides.short_quote(first), first.short_quote);
//! assert!(first.resolve_image(ImageSlot::Owner, true).starts_with("https://"));
//! ```

mod collection;
mod overrides;
mod record;
pub mod error;
pub mod placeholder;

pub use collection::TestimonialCollection;
pub use error::{Error, Result};
pub use overrides::{QuoteField, TextOverrides};
pub use record::{ImageSlot, TestimonialRecord};
