//! Named sources that pause automatic rotation.
//!
//! Each source is tracked on its own. Whether the timer may run is a pure
//! function of all of them, so releasing one source can never re-arm the
//! timer while another is still holding it.

use serde::{Deserialize, Serialize};

/// A reason for rotation to pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspensionSource {
    Hover,
    Drag,
    Overlay,
}

/// Current value of every suspension source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspension {
    pub hover: bool,
    pub drag: bool,
    pub overlay: bool,
}

impl Suspension {
    pub fn set(&mut self, source: SuspensionSource, active: bool) {
        match source {
            SuspensionSource::Hover => self.hover = active,
            SuspensionSource::Drag => self.drag = active,
            SuspensionSource::Overlay => self.overlay = active,
        }
    }

    pub fn is_active(&self, source: SuspensionSource) -> bool {
        match source {
            SuspensionSource::Hover => self.hover,
            SuspensionSource::Drag => self.drag,
            SuspensionSource::Overlay => self.overlay,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.hover || self.drag || self.overlay
    }

    pub fn active_sources(&self) -> Vec<SuspensionSource> {
        [
            SuspensionSource::Hover,
            SuspensionSource::Drag,
            SuspensionSource::Overlay,
        ]
        .into_iter()
        .filter(|source| self.is_active(*source))
        .collect()
    }
}

/// Whether the auto-advance timer should be armed.
pub fn should_auto_advance(mounted: bool, suspension: &Suspension) -> bool {
    mounted && !suspension.is_suspended()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_runs() {
        assert!(should_auto_advance(true, &Suspension::default()));
        assert!(!should_auto_advance(false, &Suspension::default()));
    }

    #[test]
    fn releasing_one_source_keeps_others() {
        let mut suspension = Suspension::default();
        suspension.set(SuspensionSource::Drag, true);
        suspension.set(SuspensionSource::Overlay, true);

        suspension.set(SuspensionSource::Overlay, false);
        assert!(!should_auto_advance(true, &suspension));
        assert_eq!(suspension.active_sources(), [SuspensionSource::Drag]);

        suspension.set(SuspensionSource::Drag, false);
        assert!(should_auto_advance(true, &suspension));
        assert!(suspension.active_sources().is_empty());
    }
}
