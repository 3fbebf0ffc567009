//! Simulated work (Layer 1)
//!
//! Bounded-latency placeholder work that mutating store operations wait on.

#![warn(missing_docs)]

pub mod loader;
pub mod progress;

pub use loader::{Loader, LoaderConfig, LoadOutcome, InterruptHandle};
pub use progress::{ProgressSink, TracingProgress};
