//! Periodic history refresh
//!
//! [`PollingController`] owns at most one repeating tokio task. The task is
//! stopped through a `watch` shutdown channel and additionally aborted via its
//! `JoinHandle`, so no callback can fire once [`PollingController::stop`] has
//! returned and the runtime regains control.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use mockview_core::prelude::*;

/// Minimum refresh interval (1s), whatever the configuration says.
pub const POLL_MIN_MS: u64 = 1_000;

/// Handle to a running timer task.
#[derive(Debug)]
pub struct PollHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    fn cancel(self) {
        let _ = self.shutdown_tx.send(true);
        self.task.abort();
    }

    fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// On/off switch plus the timer it arms.
#[derive(Debug)]
pub struct PollingController {
    enabled: bool,
    interval: Duration,
    handle: Option<PollHandle>,
}

impl PollingController {
    /// Create a controller. `interval_ms` is clamped to [`POLL_MIN_MS`].
    pub fn new(interval_ms: u64, enabled: bool) -> Self {
        Self {
            enabled,
            interval: Duration::from_millis(interval_ms.max(POLL_MIN_MS)),
            handle: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a timer task is currently alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Flip the switch and return the new value. Does not arm or disarm the
    /// timer by itself; the owner re-syncs after the switch changes.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Invoke `callback` every interval until [`stop`](Self::stop).
    ///
    /// The first call happens one interval after start. Calling `start`
    /// while a timer is running keeps the existing timer. Must be called
    /// from within a tokio runtime.
    pub fn start<F>(&mut self, mut callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        if self.is_running() {
            trace!("Polling already running, start ignored");
            return;
        }

        let period = self.interval;
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                        callback();
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }
            trace!("Polling task exited");
        });

        debug!("Polling started every {:?}", period);
        self.handle = Some(PollHandle { shutdown_tx, task });
    }

    /// Cancel the timer, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            debug!("Polling stopped");
        }
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.stop();
    }
}
