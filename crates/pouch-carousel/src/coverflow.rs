//! 3D coverflow card placement.
//!
//! Transforms are a pure function of a card's unwrapped offset from the
//! active card. The renderer animates toward these targets.

use serde::{Deserialize, Serialize};

/// Target transform for one card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverflowTransform {
    /// Degrees around the vertical axis
    pub rotate_y: f64,
    pub scale: f64,
    /// Pixels
    pub translate_x: f64,
    /// Pixels, positive toward the viewer
    pub translate_z: f64,
    pub opacity: f64,
    pub z_index: i64,
}

impl CoverflowTransform {
    pub fn for_offset(offset: i64, is_active: bool) -> Self {
        let distance = offset.unsigned_abs() as f64;
        let o = offset as f64;
        if is_active {
            return Self {
                rotate_y: o * -25.0,
                scale: 1.0,
                translate_x: o * 120.0,
                translate_z: 30.0,
                opacity: 1.0,
                z_index: 10 - offset.abs(),
            };
        }
        Self {
            rotate_y: o * -25.0,
            scale: (0.9 - distance * 0.1).max(0.7),
            translate_x: o * 120.0,
            translate_z: -100.0 - distance * 50.0,
            opacity: (1.0 - distance * 0.25).max(0.5),
            z_index: 10 - offset.abs(),
        }
    }
}
