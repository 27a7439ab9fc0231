//! LineSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use crate::{ContractError, Line};

/// Line output trait
///
/// Each sink is owned exclusively by one worker task.
#[trait_variant::make(LineSink: Send)]
pub trait LocalLineSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one line followed by a single terminator
    ///
    /// # Errors
    /// Returns `ContractError::WriteFailure` (should include context)
    async fn write(&mut self, line: &Line) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink, making written data durable
    async fn close(&mut self) -> Result<(), ContractError>;
}
