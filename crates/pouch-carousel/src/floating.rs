//! Floating corner widget that cycles through every testimonial.
//!
//! Each timer fire starts a short fade-out; the record changes when the fade
//! completes. Dismissal is permanent for the widget's lifetime.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pouch_testimonials::{ImageSlot, TestimonialCollection, TestimonialRecord, TextOverrides};

use crate::rotation::{RotationEngine, StartPosition};
use crate::timer::{AutoAdvanceTimer, DEFAULT_INTERVAL};

/// Fade-out time before the next record appears.
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct FloatingWidget {
    records: Arc<TestimonialCollection>,
    rotation: Option<RotationEngine>,
    timer: AutoAdvanceTimer,
    /// Time left in the current fade
    fade: Option<Duration>,
    video_open: bool,
    dismissed: bool,
}

impl FloatingWidget {
    pub fn new(records: Arc<TestimonialCollection>) -> Self {
        let rotation = RotationEngine::new(records.len(), StartPosition::First);
        let mut widget = Self {
            records,
            rotation,
            timer: AutoAdvanceTimer::new(DEFAULT_INTERVAL),
            fade: None,
            video_open: false,
            dismissed: false,
        };
        widget.sync_timer();
        widget
    }

    pub fn current_index(&self) -> Option<usize> {
        self.rotation.as_ref().map(RotationEngine::active_index)
    }

    pub fn current(&self) -> Option<&TestimonialRecord> {
        self.current_index().and_then(|i| self.records.get(i))
    }

    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn is_video_open(&self) -> bool {
        self.video_open
    }

    pub fn is_rotating(&self) -> bool {
        self.timer.is_armed()
    }

    /// Dot indicator: jump straight to `index`.
    pub fn select(&mut self, index: usize) -> bool {
        if self.dismissed {
            return false;
        }
        self.rotation.as_mut().is_some_and(|r| r.go_to(index))
    }

    /// Open the current record's video. No-op without a video.
    pub fn open_video(&mut self) -> bool {
        if self.dismissed || !self.current().is_some_and(TestimonialRecord::has_video) {
            return false;
        }
        self.video_open = true;
        // A pending fade must not swap the record under the video
        self.fade = None;
        self.sync_timer();
        true
    }

    pub fn close_video(&mut self) {
        self.video_open = false;
        self.sync_timer();
    }

    pub fn dismiss(&mut self) {
        if !self.dismissed {
            debug!("floating testimonial widget dismissed");
        }
        self.dismissed = true;
        self.video_open = false;
        self.fade = None;
        self.sync_timer();
    }

    /// Advance the clock. Returns `true` if the visible record changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.dismissed || self.rotation.is_none() {
            return false;
        }
        let mut left = elapsed;
        let mut changed = false;
        loop {
            let due = match (self.fade, self.timer.remaining()) {
                (Some(fade), Some(timer)) => fade.min(timer),
                (Some(fade), None) => fade,
                (None, Some(timer)) => timer,
                (None, None) => break,
            };
            if due > left {
                if let Some(fade) = self.fade.as_mut() {
                    *fade -= left;
                }
                self.timer.advance(left);
                break;
            }
            left -= due;

            let fires = self.timer.advance(due);
            if let Some(fade) = self.fade {
                let fade = fade - due;
                if fade.is_zero() {
                    self.fade = None;
                    if let Some(rotation) = self.rotation.as_mut() {
                        rotation.next();
                    }
                    changed = true;
                } else {
                    self.fade = Some(fade);
                }
            }
            if fires > 0 {
                self.fade = Some(FADE_DURATION);
            }
        }
        changed
    }

    fn sync_timer(&mut self) {
        let multiple = self.records.len() > 1;
        if multiple && !self.dismissed && !self.video_open {
            self.timer.arm();
        } else {
            self.timer.disarm();
        }
    }

    /// Nothing renders once dismissed or when there are no records.
    pub fn view(&self, overrides: &TextOverrides) -> Option<FloatingView> {
        if self.dismissed {
            return None;
        }
        let index = self.current_index()?;
        let record = self.records.get(index)?;
        Some(FloatingView {
            index,
            total: self.records.len(),
            id: record.id.clone(),
            name: record.name.clone(),
            company: record.company.clone(),
            short_quote: overrides.short_quote(record).to_string(),
            owner_image: record.owner_image.clone(),
            owner_fallback: record.fallback_image(ImageSlot::Owner),
            has_video: record.has_video(),
            animating: self.is_animating(),
            video_embed_url: self
                .video_open
                .then(|| record.video_id.as_deref().map(looping_embed_url))
                .flatten(),
        })
    }
}

/// Embed URL that autoplays and loops a single video.
pub fn looping_embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{0}?autoplay=1&rel=0&loop=1&playlist={0}",
        video_id
    )
}

/// Renderer snapshot of the floating widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingView {
    pub index: usize,
    pub total: usize,
    pub id: String,
    pub name: String,
    pub company: String,
    pub short_quote: String,
    pub owner_image: String,
    pub owner_fallback: String,
    pub has_video: bool,
    pub animating: bool,
    pub video_embed_url: Option<String>,
}
