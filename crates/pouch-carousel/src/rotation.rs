//! Active index management with wraparound.

use serde::{Deserialize, Serialize};

/// Direction of the last index change, used only to pick an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionDirection {
    Forward,
    Backward,
    #[default]
    None,
}

/// Where a freshly mounted rotation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartPosition {
    /// Index 0
    #[default]
    First,
    /// `floor(len / 2)`
    Middle,
}

impl StartPosition {
    pub fn index_for(&self, len: usize) -> usize {
        match self {
            StartPosition::First => 0,
            StartPosition::Middle => len / 2,
        }
    }
}

/// A record inside the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowEntry {
    /// Position in the collection
    pub index: usize,
    /// `index - active` (not wrapped)
    pub offset: i64,
    pub is_active: bool,
}

/// Owns the active index over a fixed, non-empty collection length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationEngine {
    len: usize,
    active: usize,
    direction: TransitionDirection,
}

impl RotationEngine {
    /// Create an engine over `len` records. Returns `None` for an empty
    /// collection so callers decide once what "nothing to rotate" means.
    pub fn new(len: usize, start: StartPosition) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            active: start.index_for(len),
            direction: TransitionDirection::None,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    /// Advance one record, wrapping at the end.
    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1) % self.len;
        self.direction = TransitionDirection::Forward;
        self.active
    }

    /// Advance `steps` records in one move. Whole cycles cost nothing.
    pub fn advance_by(&mut self, steps: u64) -> usize {
        let len = self.len as u64;
        let net = usize::try_from(steps % len).unwrap_or(0);
        if net > 0 {
            self.active = (self.active + net) % self.len;
            self.direction = TransitionDirection::Forward;
        }
        self.active
    }

    /// Step back one record, wrapping at the start.
    pub fn previous(&mut self) -> usize {
        self.active = (self.active + self.len - 1) % self.len;
        self.direction = TransitionDirection::Backward;
        self.active
    }

    /// Jump to `index`. Out-of-range requests are ignored and return `false`.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.direction = match index.cmp(&self.active) {
            std::cmp::Ordering::Greater => TransitionDirection::Forward,
            std::cmp::Ordering::Less => TransitionDirection::Backward,
            std::cmp::Ordering::Equal => TransitionDirection::None,
        };
        self.active = index;
        true
    }

    /// Signed, unwrapped distance from the active index.
    pub fn offset_of(&self, index: usize) -> i64 {
        index as i64 - self.active as i64
    }

    /// Records with `|offset| <= radius`, in collection order.
    pub fn window(&self, radius: usize) -> Vec<WindowEntry> {
        let first = self.active.saturating_sub(radius);
        let last = self.active.saturating_add(radius).min(self.len - 1);
        (first..=last)
            .map(|index| WindowEntry {
                index,
                offset: self.offset_of(index),
                is_active: index == self.active,
            })
            .collect()
    }
}
