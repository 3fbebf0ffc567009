//! Simulated bounded-latency work.
//!
//! A [`Loader`] spawns a task that sleeps for a fixed number of ticks,
//! reporting each one, and then joins it before returning. The task never
//! outlives the call to [`Loader::run`].

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::progress::{ProgressSink, TracingProgress};

/// Configuration for the simulated work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Number of pauses
    pub ticks: u32,
    /// Length of each pause
    pub tick_interval: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            ticks: 5,
            tick_interval: Duration::from_millis(300),
        }
    }
}

impl LoaderConfig {
    /// Total time a run takes when not interrupted.
    pub fn total_duration(&self) -> Duration {
        self.tick_interval * self.ticks
    }
}

/// How a simulated run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// All ticks ran
    Completed,
    /// Interrupted after `completed` ticks
    Interrupted {
        /// Ticks that ran before the interrupt
        completed: u32,
    },
    /// The work task panicked or was aborted
    Aborted,
}

impl LoadOutcome {
    /// Whether every tick ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, LoadOutcome::Completed)
    }
}

/// Shared interrupt flag.
///
/// Once raised it stays raised: every run in progress stops at its next
/// tick boundary and later runs stop immediately.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl InterruptHandle {
    /// Create a handle in the lowered state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Raise the flag.
    pub fn interrupt(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the flag has been raised.
    pub fn is_interrupted(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the flag is raised.
    pub async fn interrupted(&self) {
        let mut rx = self.tx.subscribe();
        // Err only if the sender is gone, and `self` keeps it alive
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for InterruptHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs simulated work and waits for it.
pub struct Loader {
    config: LoaderConfig,
    progress: Arc<dyn ProgressSink>,
    interrupt: InterruptHandle,
}

impl Loader {
    /// Create a loader with the default configuration and tracing-only progress.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
            progress: Arc::new(TracingProgress),
            interrupt: InterruptHandle::new(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the progress sink.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Share an interrupt flag with other components.
    pub fn with_interrupt(mut self, interrupt: InterruptHandle) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Handle that interrupts this loader's runs.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Spawn the simulated work and wait for it to end.
    ///
    /// Interruption and task failure are logged and reported in the outcome,
    /// never returned as errors.
    pub async fn run(&self, label: &str) -> LoadOutcome {
        let mut task = AbortOnDrop(tokio::spawn(simulate(
            label.to_string(),
            self.config.clone(),
            Arc::clone(&self.progress),
            self.interrupt.clone(),
        )));

        match (&mut task.0).await {
            Ok(outcome) => {
                if let LoadOutcome::Interrupted { completed } = outcome {
                    warn!(label, completed, ticks = self.config.ticks, "simulated work interrupted");
                }
                outcome
            }
            Err(e) => {
                warn!(label, error = %e, "simulated work aborted");
                LoadOutcome::Aborted
            }
        }
    }
}

/// Aborts the work task if the future awaiting it is dropped.
struct AbortOnDrop(JoinHandle<LoadOutcome>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

async fn simulate(
    label: String,
    config: LoaderConfig,
    progress: Arc<dyn ProgressSink>,
    interrupt: InterruptHandle,
) -> LoadOutcome {
    progress.started(&label);

    for tick in 1..=config.ticks {
        tokio::select! {
            biased;
            _ = interrupt.interrupted() => {
                progress.interrupted(&label, tick - 1);
                return LoadOutcome::Interrupted { completed: tick - 1 };
            }
            _ = tokio::time::sleep(config.tick_interval) => {
                progress.ticked(&label, tick);
            }
        }
    }

    progress.finished(&label);
    LoadOutcome::Completed
}
