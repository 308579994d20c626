//! Input events and the notices a carousel emits in response.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::overlay::OverlayKind;
use crate::rotation::TransitionDirection;

/// Keys the carousel listens for. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    #[serde(other)]
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Everything that can happen to a mounted carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CarouselEvent {
    /// Arrow button
    Next,
    Previous,
    /// Dot indicator
    GoTo { index: usize },

    DragStart,
    /// Total horizontal offset since drag start
    DragMove { offset: f64 },
    DragEnd {
        #[serde(default)]
        offset: Option<f64>,
    },

    HoverEnter,
    HoverLeave,

    /// Play affordance on a card
    OpenVideo { id: String },
    /// Card body click
    OpenDetail { id: String },
    CloseOverlay,

    Key { key: Key },

    /// Host clock progressed
    Tick { elapsed_ms: u64 },
    SetInterval { interval_ms: u64 },

    Unmount,
}

impl CarouselEvent {
    pub fn tick(elapsed: Duration) -> Self {
        CarouselEvent::Tick {
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Observable consequences of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CarouselNotice {
    IndexChanged {
        from: usize,
        to: usize,
        direction: TransitionDirection,
    },
    OverlayOpened {
        kind: OverlayKind,
        record: usize,
    },
    OverlayClosed,
    TimerArmed,
    TimerDisarmed,
    Unmounted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_wire_format() {
        let event: CarouselEvent =
            serde_json::from_str(r#"{"type":"OpenDetail","id":"paul"}"#).unwrap();
        assert_eq!(event, CarouselEvent::OpenDetail { id: "paul".into() });

        let end: CarouselEvent = serde_json::from_str(r#"{"type":"DragEnd"}"#).unwrap();
        assert_eq!(end, CarouselEvent::DragEnd { offset: None });

        let key: CarouselEvent =
            serde_json::from_str(r#"{"type":"Key","key":"Tab"}"#).unwrap();
        assert_eq!(key, CarouselEvent::Key { key: Key::Other });
    }

    #[test]
    fn notice_serialization() {
        let notice = CarouselNotice::IndexChanged {
            from: 0,
            to: 1,
            direction: TransitionDirection::Forward,
        };
        let json = serde_json::to_string(&notice).unwrap();
        assert!(json.contains("IndexChanged"));
        assert!(json.contains("forward"));
    }

    #[test]
    fn dom_keys() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom("a"), Key::Other);
    }

    #[test]
    fn tick_from_duration() {
        assert_eq!(
            CarouselEvent::tick(Duration::from_millis(250)),
            CarouselEvent::Tick { elapsed_ms: 250 }
        );
    }
}
