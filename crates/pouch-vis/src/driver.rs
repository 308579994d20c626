//! Auto-advance driver task.
//!
//! Mounting a carousel spawns one task that feeds elapsed time into it.
//! The task ends by itself once the carousel is unmounted, and is aborted
//! when its handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use pouch_carousel::CarouselEvent;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::server::AppState;

const MIN_TICK: Duration = Duration::from_millis(1);

/// Owns the driver task of one mounted carousel.
#[derive(Debug)]
pub struct AutoAdvanceDriver {
    task: JoinHandle<()>,
}

impl AutoAdvanceDriver {
    /// Spawn the driver on the current runtime.
    pub fn spawn(state: Arc<AppState>, tick: Duration) -> Self {
        let tick = tick.max(MIN_TICK);
        debug!(?tick, "spawning auto-advance driver");
        Self {
            task: tokio::spawn(run(state, tick)),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the task now.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for AutoAdvanceDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(state: Arc<AppState>, tick: Duration) {
    let mut ticker = time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        ticker.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;

        let mut carousel = state.carousel.write().await;
        if !carousel.is_mounted() {
            debug!("carousel unmounted, driver exiting");
            break;
        }
        trace!(?elapsed, "tick");
        let notices = carousel.tick(elapsed);
        drop(carousel);

        state.publish(&notices);
    }
}
