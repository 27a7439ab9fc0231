//! Dispatcher error types

use contracts::Category;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Worker stopped receiving before the input was exhausted
    #[error("channel closed for {category} sink before input was exhausted")]
    ChannelClosed { category: Category },

    /// Worker task panicked
    #[error("{category} sink worker panicked")]
    WorkerPanicked { category: Category },

    /// Resource, read or write error (from contract)
    #[error(transparent)]
    Contract(#[from] contracts::ContractError),
}

impl DispatcherError {
    /// Whether this wraps a mid-stream read failure
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            Self::Contract(contracts::ContractError::ReadFailure { .. })
        )
    }
}
