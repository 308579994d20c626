//! Pouch Carousel Host
//!
//! Serves a testimonial carousel over HTTP and WebSocket. Mounting spawns a
//! driver task that feeds elapsed time into the carousel; unmounting stops it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pouch-vis -- 3000 ./testimonials.json
//! ```
//!
//! Then open http://localhost:3000 in a browser.

mod config;
mod driver;
mod server;
pub mod error;

pub use config::{VisConfig, DEFAULT_PORT, DEFAULT_TICK};
pub use driver::AutoAdvanceDriver;
pub use error::{Error, Result};
pub use server::{AppState, EventResponse, StatusResponse, VisServer};
