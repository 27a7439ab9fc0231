//! # Dispatcher
//!
//! Classification and fan-out module.
//!
//! Responsibilities:
//! - Pull `Line`s from a `LineSource` and classify them
//! - Route each line over its category's ordered channel
//! - Run one isolated sink worker per category
//! - Close channels and wait on the completion barrier on every exit path

pub mod barrier;
pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod sinks;

pub use barrier::{CompletionBarrier, CompletionGuard};
pub use contracts::{Category, Line, LineSink, SplitConfig};
pub use dispatcher::{create_dispatcher, Dispatcher, SinkReport, SplitReport};
pub use error::DispatcherError;
pub use handle::SinkHandle;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::FileSink;
