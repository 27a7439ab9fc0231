//! LineSource trait - ingestion output interface
//!
//! Lazy, finite, ordered sequence of lines with a single consumer.

use crate::{ContractError, Line};

/// Line source trait
///
/// Restartable only by reopening the underlying resource.
#[trait_variant::make(LineSource: Send)]
pub trait LocalLineSource {
    /// Source name (used for logging)
    fn name(&self) -> &str;

    /// Produce the next line
    ///
    /// Returns `Ok(None)` at clean end of input, and keeps returning it on
    /// later calls.
    ///
    /// # Errors
    /// Returns `ContractError::ReadFailure` if the read fails mid-stream
    async fn next_line(&mut self) -> Result<Option<Line>, ContractError>;
}
