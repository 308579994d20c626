//! Mutually exclusive modal overlays.
//!
//! ```text
//!   Closed --open_video--> VideoOpen
//!   Closed --open_detail--> DetailOpen
//!   DetailOpen --open_video--> VideoOpen      (handoff)
//!   any --open_detail--> DetailOpen
//!   VideoOpen | DetailOpen --close--> Closed
//! ```
//!
//! Payloads are collection positions; the coordinator never holds record data.

use serde::{Deserialize, Serialize};

use pouch_testimonials::TestimonialRecord;

const VIDEO_EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Which overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    None,
    Video,
    Detail,
}

/// Overlay state with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OverlayState {
    #[default]
    Closed,
    VideoOpen { record: usize, video_id: String },
    DetailOpen { record: usize },
}

impl OverlayState {
    pub fn kind(&self) -> OverlayKind {
        match self {
            OverlayState::Closed => OverlayKind::None,
            OverlayState::VideoOpen { .. } => OverlayKind::Video,
            OverlayState::DetailOpen { .. } => OverlayKind::Detail,
        }
    }

    /// Position of the record being displayed.
    pub fn payload(&self) -> Option<usize> {
        match self {
            OverlayState::Closed => None,
            OverlayState::VideoOpen { record, .. } | OverlayState::DetailOpen { record } => {
                Some(*record)
            }
        }
    }
}

/// Owns the overlay state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayCoordinator {
    state: OverlayState,
}

impl OverlayCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn kind(&self) -> OverlayKind {
        self.state.kind()
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, OverlayState::Closed)
    }

    /// Show the video for `record`, replacing any open overlay.
    /// Records without a video leave the state untouched and return `false`.
    pub fn open_video(&mut self, index: usize, record: &TestimonialRecord) -> bool {
        let Some(video_id) = record.video_id.as_ref() else {
            return false;
        };
        self.state = OverlayState::VideoOpen {
            record: index,
            video_id: video_id.clone(),
        };
        true
    }

    /// Show the detail popup for `record`, replacing any open overlay.
    pub fn open_detail(&mut self, index: usize) {
        self.state = OverlayState::DetailOpen { record: index };
    }

    /// Close whatever is open. Returns `false` if nothing was.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = OverlayState::Closed;
        was_open
    }

    /// Embed URL for the open video overlay.
    pub fn embed_url(&self) -> Option<String> {
        match &self.state {
            OverlayState::VideoOpen { video_id, .. } => Some(embed_url(video_id)),
            _ => None,
        }
    }
}

/// Autoplaying embed URL for a video id.
pub fn embed_url(video_id: &str) -> String {
    format!("{}/{}?autoplay=1", VIDEO_EMBED_BASE, video_id)
}
