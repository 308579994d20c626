//! Drag-to-navigate gesture interpretation.

use serde::{Deserialize, Serialize};

/// Horizontal distance a drag must exceed before it navigates.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 50.0;

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragDecision {
    /// Dragged right past the threshold: reveal the previous record
    Previous,
    /// Dragged left past the threshold: reveal the next record
    Next,
    /// Within the threshold: settle back on the current record
    SnapBack,
}

/// Classify a total horizontal offset. The boundary itself snaps back.
pub fn decide(offset: f64, threshold: f64) -> DragDecision {
    if offset > threshold {
        DragDecision::Previous
    } else if offset < -threshold {
        DragDecision::Next
    } else {
        // NaN also lands here
        DragDecision::SnapBack
    }
}

/// Tracks one drag gesture from start to end.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    threshold: f64,
    offset: Option<f64>,
}

impl DragGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            offset: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_dragging(&self) -> bool {
        self.offset.is_some()
    }

    /// Latest total offset of the gesture in progress.
    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    /// Begin a gesture. A second start resets the running offset.
    pub fn start(&mut self) {
        self.offset = Some(0.0);
    }

    /// Record the total offset since the gesture started.
    pub fn update(&mut self, offset: f64) {
        if let Some(current) = self.offset.as_mut() {
            *current = offset;
        }
    }

    /// Finish the gesture. `offset` overrides the last tracked value when
    /// given. Returns `None` when no gesture was in progress.
    pub fn end(&mut self, offset: Option<f64>) -> Option<DragDecision> {
        let tracked = self.offset.take()?;
        Some(decide(offset.unwrap_or(tracked), self.threshold))
    }

    /// Drop a gesture without deciding anything.
    pub fn cancel(&mut self) -> bool {
        self.offset.take().is_some()
    }
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisions_use_strict_threshold() {
        assert_eq!(decide(60.0, 50.0), DragDecision::Previous);
        assert_eq!(decide(-60.0, 50.0), DragDecision::Next);
        assert_eq!(decide(-40.0, 50.0), DragDecision::SnapBack);
        assert_eq!(decide(50.0, 50.0), DragDecision::SnapBack);
        assert_eq!(decide(-50.0, 50.0), DragDecision::SnapBack);
        assert_eq!(decide(f64::NAN, 50.0), DragDecision::SnapBack);
    }

    #[test]
    fn gesture_lifecycle() {
        let mut drag = DragGesture::default();
        assert!(!drag.is_dragging());

        drag.start();
        assert!(drag.is_dragging());
        drag.update(-30.0);
        drag.update(-75.0);
        assert_eq!(drag.offset(), Some(-75.0));

        assert_eq!(drag.end(None), Some(DragDecision::Next));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn final_offset_overrides_tracked() {
        let mut drag = DragGesture::new(50.0);
        drag.start();
        drag.update(-80.0);
        assert_eq!(drag.end(Some(10.0)), Some(DragDecision::SnapBack));
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut drag = DragGesture::default();
        drag.update(-200.0);
        assert_eq!(drag.end(Some(-200.0)), None);
    }
}
