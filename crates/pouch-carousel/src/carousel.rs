//! The carousel controller.
//!
//! [`Carousel`] composes rotation, auto-advance, drag interpretation and
//! overlays behind a single [`Carousel::handle`] entry point. Every event is
//! processed synchronously and in order; after each one the timer is
//! re-synchronised against the suspension predicate.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use pouch_testimonials::{ImageSlot, TestimonialCollection, TestimonialRecord, TextOverrides};

use crate::config::CarouselConfig;
use crate::coverflow::CoverflowTransform;
use crate::drag::{DragDecision, DragGesture};
use crate::error::{Error, Result};
use crate::events::{CarouselEvent, CarouselNotice, Key};
use crate::overlay::{self, OverlayCoordinator, OverlayKind, OverlayState};
use crate::rotation::{RotationEngine, TransitionDirection};
use crate::suspension::{should_auto_advance, Suspension, SuspensionSource};
use crate::timer::AutoAdvanceTimer;

/// Featured image shown before any record provides one.
pub const DEFAULT_FEATURED_IMAGE: &str = "/imgs/testimonials/start.webp";

/// State that only exists while the carousel is mounted.
#[derive(Debug, Clone)]
struct Mounted {
    rotation: RotationEngine,
    timer: AutoAdvanceTimer,
    drag: DragGesture,
    overlay: OverlayCoordinator,
    suspension: Suspension,
}

#[derive(Debug, Clone)]
enum Lifecycle {
    /// Nothing to rotate; renders nothing, ignores everything
    Empty,
    Mounted(Box<Mounted>),
    /// Torn down; the last index stays readable
    Unmounted { final_index: usize },
}

/// A testimonial carousel over an injected, immutable collection.
#[derive(Debug, Clone)]
pub struct Carousel {
    records: Arc<TestimonialCollection>,
    overrides: Arc<TextOverrides>,
    config: CarouselConfig,
    lifecycle: Lifecycle,
}

impl Carousel {
    /// Mount a carousel. An empty collection yields an inert carousel.
    pub fn new(records: Arc<TestimonialCollection>, config: CarouselConfig) -> Result<Self> {
        config.validate()?;

        let lifecycle = match RotationEngine::new(records.len(), config.start) {
            Some(rotation) => {
                let mut mounted = Mounted {
                    rotation,
                    timer: AutoAdvanceTimer::new(config.auto_advance),
                    drag: DragGesture::new(config.drag_threshold),
                    overlay: OverlayCoordinator::new(),
                    suspension: Suspension::default(),
                };
                mounted.sync_timer(&mut Vec::new());
                Lifecycle::Mounted(Box::new(mounted))
            }
            None => {
                debug!("empty testimonial collection, carousel is inert");
                Lifecycle::Empty
            }
        };

        Ok(Self {
            records,
            overrides: Arc::new(TextOverrides::new()),
            config,
            lifecycle,
        })
    }

    /// Use localized text for quotes.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Arc<TextOverrides>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Process one event.
    ///
    /// Events on an empty or unmounted carousel are ignored. The only error
    /// is a record id that is not in the collection.
    pub fn handle(&mut self, event: CarouselEvent) -> Result<Vec<CarouselNotice>> {
        if matches!(event, CarouselEvent::Unmount) {
            return Ok(self.unmount());
        }

        let Lifecycle::Mounted(mounted) = &mut self.lifecycle else {
            trace!(?event, "carousel not mounted, ignoring event");
            return Ok(Vec::new());
        };

        let mut notices = Vec::new();
        let applied = mounted.apply(event, &self.records, &mut notices);
        mounted.sync_timer(&mut notices);
        applied.map(|_| notices)
    }

    pub fn next(&mut self) -> Vec<CarouselNotice> {
        self.handle(CarouselEvent::Next).unwrap_or_default()
    }

    pub fn previous(&mut self) -> Vec<CarouselNotice> {
        self.handle(CarouselEvent::Previous).unwrap_or_default()
    }

    pub fn go_to(&mut self, index: usize) -> Vec<CarouselNotice> {
        self.handle(CarouselEvent::GoTo { index }).unwrap_or_default()
    }

    pub fn tick(&mut self, elapsed: Duration) -> Vec<CarouselNotice> {
        self.handle(CarouselEvent::tick(elapsed)).unwrap_or_default()
    }

    pub fn open_video(&mut self, id: &str) -> Result<Vec<CarouselNotice>> {
        self.handle(CarouselEvent::OpenVideo { id: id.to_string() })
    }

    pub fn open_detail(&mut self, id: &str) -> Result<Vec<CarouselNotice>> {
        self.handle(CarouselEvent::OpenDetail { id: id.to_string() })
    }

    pub fn close_overlay(&mut self) -> Vec<CarouselNotice> {
        self.handle(CarouselEvent::CloseOverlay).unwrap_or_default()
    }

    pub fn key(&mut self, key: Key) -> Vec<CarouselNotice> {
        self.handle(CarouselEvent::Key { key }).unwrap_or_default()
    }

    /// Tear down: drop the timer and refuse further mutation.
    pub fn unmount(&mut self) -> Vec<CarouselNotice> {
        let Lifecycle::Mounted(mounted) = &self.lifecycle else {
            return Vec::new();
        };
        let final_index = mounted.rotation.active_index();
        let mut notices = Vec::new();
        if mounted.timer.is_armed() {
            notices.push(CarouselNotice::TimerDisarmed);
        }
        notices.push(CarouselNotice::Unmounted);
        self.lifecycle = Lifecycle::Unmounted { final_index };
        debug!(final_index, "carousel unmounted");
        notices
    }

    pub fn records(&self) -> &Arc<TestimonialCollection> {
        &self.records
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Mounted(_))
    }

    /// Active position; after unmount, the last position it held.
    pub fn active_index(&self) -> Option<usize> {
        match &self.lifecycle {
            Lifecycle::Empty => None,
            Lifecycle::Mounted(m) => Some(m.rotation.active_index()),
            Lifecycle::Unmounted { final_index } => Some(*final_index),
        }
    }

    pub fn active_record(&self) -> Option<&TestimonialRecord> {
        self.active_index().and_then(|i| self.records.get(i))
    }

    pub fn direction(&self) -> TransitionDirection {
        self.mounted()
            .map(|m| m.rotation.direction())
            .unwrap_or_default()
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.mounted()
            .map(|m| m.overlay.state().clone())
            .unwrap_or_default()
    }

    pub fn overlay_kind(&self) -> OverlayKind {
        self.overlay_state().kind()
    }

    pub fn suspension(&self) -> Suspension {
        self.mounted().map(|m| m.suspension).unwrap_or_default()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspension().is_suspended()
    }

    pub fn is_dragging(&self) -> bool {
        self.mounted().is_some_and(|m| m.drag.is_dragging())
    }

    pub fn timer_armed(&self) -> bool {
        self.mounted().is_some_and(|m| m.timer.is_armed())
    }

    pub fn interval(&self) -> Duration {
        self.mounted()
            .map(|m| m.timer.interval())
            .unwrap_or(self.config.auto_advance)
    }

    fn mounted(&self) -> Option<&Mounted> {
        match &self.lifecycle {
            Lifecycle::Mounted(m) => Some(m),
            _ => None,
        }
    }

    /// Snapshot for the renderer.
    pub fn view(&self) -> CarouselView {
        let Some(m) = self.mounted() else {
            return CarouselView::inert(self.active_index(), self.records.len());
        };

        let active = self.records.get(m.rotation.active_index());
        let cards = m
            .rotation
            .window(self.config.window_radius)
            .into_iter()
            .filter_map(|entry| {
                let record = self.records.get(entry.index)?;
                Some(CardView::new(entry.index, entry.offset, entry.is_active, record, &self.overrides))
            })
            .collect();

        let overlay = match m.overlay.state() {
            OverlayState::Closed => OverlayView::Closed,
            OverlayState::VideoOpen { record, video_id } => OverlayView::Video {
                record: *record,
                video_id: video_id.clone(),
                embed_url: overlay::embed_url(video_id),
            },
            OverlayState::DetailOpen { record } => match self.records.get(*record) {
                Some(r) => OverlayView::Detail(DetailView::new(*record, r, &self.overrides)),
                None => OverlayView::Closed,
            },
        };

        CarouselView {
            mounted: true,
            active_index: Some(m.rotation.active_index()),
            total: self.records.len(),
            direction: m.rotation.direction(),
            suspended: m.suspension.is_suspended(),
            suspension: m.suspension.active_sources(),
            timer_armed: m.timer.is_armed(),
            featured_pouch_image: active
                .and_then(|r| r.pouch_image.clone())
                .unwrap_or_else(|| DEFAULT_FEATURED_IMAGE.to_string()),
            featured_brand_logo: active.and_then(|r| r.brand_logo.clone()),
            cards,
            overlay,
        }
    }
}

impl Mounted {
    fn apply(
        &mut self,
        event: CarouselEvent,
        records: &TestimonialCollection,
        notices: &mut Vec<CarouselNotice>,
    ) -> Result<()> {
        match event {
            CarouselEvent::Next => self.step(DragDecision::Next, notices),
            CarouselEvent::Previous => self.step(DragDecision::Previous, notices),
            CarouselEvent::GoTo { index } => {
                let from = self.rotation.active_index();
                if self.rotation.go_to(index) {
                    self.push_index_change(from, notices);
                } else {
                    debug!(index, len = self.rotation.len(), "ignoring out-of-range jump");
                }
            }
            CarouselEvent::DragStart => {
                self.drag.start();
                self.suspension.set(SuspensionSource::Drag, true);
            }
            CarouselEvent::DragMove { offset } => self.drag.update(offset),
            CarouselEvent::DragEnd { offset } => {
                if let Some(decision) = self.drag.end(offset) {
                    self.suspension.set(SuspensionSource::Drag, false);
                    trace!(?decision, "drag finished");
                    self.step(decision, notices);
                }
            }
            CarouselEvent::HoverEnter => self.suspension.set(SuspensionSource::Hover, true),
            CarouselEvent::HoverLeave => self.suspension.set(SuspensionSource::Hover, false),
            CarouselEvent::OpenVideo { id } => {
                let (index, record) = records.find(&id).ok_or(Error::NotFound(id))?;
                if self.overlay.open_video(index, record) {
                    debug!(id = %record.id, "video overlay opened");
                    notices.push(CarouselNotice::OverlayOpened {
                        kind: OverlayKind::Video,
                        record: index,
                    });
                } else {
                    debug!(id = %record.id, "record has no video, ignoring");
                }
            }
            CarouselEvent::OpenDetail { id } => {
                let (index, record) = records.find(&id).ok_or(Error::NotFound(id))?;
                self.overlay.open_detail(index);
                debug!(id = %record.id, "detail overlay opened");
                notices.push(CarouselNotice::OverlayOpened {
                    kind: OverlayKind::Detail,
                    record: index,
                });
            }
            CarouselEvent::CloseOverlay => self.close_overlay(notices),
            CarouselEvent::Key { key } => {
                if self.overlay.is_open() {
                    if key == Key::Escape {
                        self.close_overlay(notices);
                    }
                } else {
                    match key {
                        Key::ArrowLeft => self.step(DragDecision::Previous, notices),
                        Key::ArrowRight => self.step(DragDecision::Next, notices),
                        Key::Escape | Key::Other => {}
                    }
                }
            }
            CarouselEvent::Tick { elapsed_ms } => {
                let fires = self.timer.advance(Duration::from_millis(elapsed_ms));
                trace!(elapsed_ms, fires, "tick");
                if fires > 0 {
                    let from = self.rotation.active_index();
                    self.rotation.advance_by(u64::from(fires));
                    self.push_index_change(from, notices);
                }
            }
            CarouselEvent::SetInterval { interval_ms } => {
                if interval_ms == 0 {
                    return Err(Error::InvalidConfig {
                        field: "auto_advance",
                        reason: "must be greater than zero",
                    });
                }
                self.timer.set_interval(Duration::from_millis(interval_ms));
                debug!(interval_ms, "auto-advance interval changed");
            }
            // Handled before dispatch
            CarouselEvent::Unmount => {}
        }
        Ok(())
    }

    fn step(&mut self, decision: DragDecision, notices: &mut Vec<CarouselNotice>) {
        let from = self.rotation.active_index();
        match decision {
            DragDecision::Next => {
                self.rotation.next();
            }
            DragDecision::Previous => {
                self.rotation.previous();
            }
            DragDecision::SnapBack => return,
        }
        self.push_index_change(from, notices);
    }

    fn push_index_change(&self, from: usize, notices: &mut Vec<CarouselNotice>) {
        let to = self.rotation.active_index();
        if from != to {
            debug!(from, to, "active testimonial changed");
            notices.push(CarouselNotice::IndexChanged {
                from,
                to,
                direction: self.rotation.direction(),
            });
        }
    }

    fn close_overlay(&mut self, notices: &mut Vec<CarouselNotice>) {
        if self.overlay.close() {
            debug!("overlay closed");
            notices.push(CarouselNotice::OverlayClosed);
        }
    }

    /// Arm or disarm the timer from the current suspension sources.
    fn sync_timer(&mut self, notices: &mut Vec<CarouselNotice>) {
        self.suspension
            .set(SuspensionSource::Overlay, self.overlay.is_open());

        if should_auto_advance(true, &self.suspension) {
            if self.timer.arm() {
                notices.push(CarouselNotice::TimerArmed);
            }
        } else if self.timer.disarm() {
            trace!(sources = ?self.suspension.active_sources(), "auto-advance suspended");
            notices.push(CarouselNotice::TimerDisarmed);
        }
    }
}

/// Renderer snapshot of a carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselView {
    pub mounted: bool,
    pub active_index: Option<usize>,
    pub total: usize,
    pub direction: TransitionDirection,
    pub suspended: bool,
    pub suspension: Vec<SuspensionSource>,
    pub timer_armed: bool,
    pub featured_pouch_image: String,
    pub featured_brand_logo: Option<String>,
    /// Cards inside the visible window, in collection order
    pub cards: Vec<CardView>,
    pub overlay: OverlayView,
}

impl CarouselView {
    fn inert(active_index: Option<usize>, total: usize) -> Self {
        Self {
            mounted: false,
            active_index,
            total,
            direction: TransitionDirection::None,
            suspended: false,
            suspension: Vec::new(),
            timer_armed: false,
            featured_pouch_image: DEFAULT_FEATURED_IMAGE.to_string(),
            featured_brand_logo: None,
            cards: Vec::new(),
            overlay: OverlayView::Closed,
        }
    }
}

/// One card in the coverflow window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub index: usize,
    pub id: String,
    pub offset: i64,
    pub is_active: bool,
    pub name: String,
    pub company: String,
    pub short_quote: String,
    pub bg_color: String,
    pub owner_image: String,
    /// Swap in when `owner_image` fails to load
    pub owner_fallback: String,
    pub brand_logo: Option<String>,
    pub has_video: bool,
    pub transform: CoverflowTransform,
}

impl CardView {
    fn new(
        index: usize,
        offset: i64,
        is_active: bool,
        record: &TestimonialRecord,
        overrides: &TextOverrides,
    ) -> Self {
        Self {
            index,
            id: record.id.clone(),
            offset,
            is_active,
            name: record.name.clone(),
            company: record.company.clone(),
            short_quote: overrides.short_quote(record).to_string(),
            bg_color: record.bg_color.clone(),
            owner_image: record.owner_image.clone(),
            owner_fallback: record.fallback_image(ImageSlot::Owner),
            brand_logo: record.brand_logo.clone(),
            has_video: record.has_video(),
            transform: CoverflowTransform::for_offset(offset, is_active),
        }
    }
}

/// Full record shown in the detail popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub byline: Option<String>,
    pub quote: String,
    pub bg_color: String,
    pub owner_image: String,
    pub owner_fallback: String,
    pub company_logo: Option<String>,
    pub pouch_image: Option<String>,
    pub has_video: bool,
}

impl DetailView {
    fn new(index: usize, record: &TestimonialRecord, overrides: &TextOverrides) -> Self {
        Self {
            index,
            id: record.id.clone(),
            name: record.name.clone(),
            byline: record.byline(),
            quote: overrides.quote(record).to_string(),
            bg_color: record.bg_color.clone(),
            owner_image: record.owner_image.clone(),
            owner_fallback: record.fallback_image(ImageSlot::Owner),
            company_logo: record.company_logo.clone(),
            pouch_image: record.pouch_image.clone(),
            has_video: record.has_video(),
        }
    }
}

/// Overlay as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayView {
    Closed,
    Video {
        record: usize,
        #[serde(rename = "videoId")]
        video_id: String,
        #[serde(rename = "embedUrl")]
        embed_url: String,
    },
    Detail(DetailView),
}
