//! Progress reporting for simulated work.

use tracing::debug;

/// Receives progress notifications from a running [`Loader`](crate::Loader).
///
/// Called from the spawned work task, so implementations must be thread-safe.
pub trait ProgressSink: Send + Sync {
    /// Work started.
    fn started(&self, label: &str);

    /// A tick completed. `tick` is 1-based.
    fn ticked(&self, label: &str, tick: u32);

    /// Every tick completed.
    fn finished(&self, label: &str);

    /// Work stopped early after `completed` ticks.
    fn interrupted(&self, label: &str, completed: u32);
}

/// Progress sink that only emits tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn started(&self, label: &str) {
        debug!(label, "simulated work started");
    }

    fn ticked(&self, label: &str, tick: u32) {
        debug!(label, tick, "tick");
    }

    fn finished(&self, label: &str) {
        debug!(label, "simulated work finished");
    }

    fn interrupted(&self, label: &str, completed: u32) {
        debug!(label, completed, "simulated work stopped early");
    }
}
