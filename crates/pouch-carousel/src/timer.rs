//! Restartable auto-advance countdown.
//!
//! The timer owns no clock. A host feeds elapsed time through
//! [`AutoAdvanceTimer::advance`] and gets back the number of fires that fell
//! inside that span; each fire is one synchronous `next()` on the rotation.

use std::time::Duration;

/// Default interval between automatic advances.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(4000);

/// Interval used by the generic product coverflow.
pub const SHOWCASE_INTERVAL: Duration = Duration::from_millis(2000);

/// Shortest accepted interval. Guards `advance` against a zero period.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A countdown that is either disarmed or counting toward its next fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoAdvanceTimer {
    interval: Duration,
    remaining: Option<Duration>,
}

impl AutoAdvanceTimer {
    /// Create a disarmed timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            remaining: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Time until the next fire, if armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Start a full countdown. Returns `false` if already armed.
    pub fn arm(&mut self) -> bool {
        if self.remaining.is_some() {
            return false;
        }
        self.remaining = Some(self.interval);
        true
    }

    /// Clear the countdown. Returns `false` if already disarmed.
    pub fn disarm(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    /// Change the interval. An armed timer restarts with a full countdown.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_INTERVAL);
        if self.remaining.is_some() {
            self.remaining = Some(self.interval);
        }
    }

    /// Consume `elapsed` time and return how many fires it covered.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let Some(remaining) = self.remaining else {
            return 0;
        };
        if elapsed < remaining {
            self.remaining = Some(remaining - elapsed);
            return 0;
        }
        let left = (elapsed - remaining).as_nanos();
        let period = self.interval.as_nanos();
        let extra = left / period;
        let into_period = (left % period) as u64;
        self.remaining = Some(self.interval - Duration::from_nanos(into_period));
        u32::try_from(extra.saturating_add(1)).unwrap_or(u32::MAX)
    }
}

impl Default for AutoAdvanceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
