//! Error types for the calculation core

use thiserror::Error;

/// Rejection of a capital input. Every variant is caller-fixable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaccError {
    #[error("{0}")]
    InvalidInput(String),
}

impl WaccError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        WaccError::InvalidInput(message.into())
    }

    /// Human-readable message, as returned to API callers
    pub fn message(&self) -> &str {
        match self {
            WaccError::InvalidInput(message) => message,
        }
    }
}
