//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, caller-facing failures. Every variant
/// carries a human-readable message; none of them is ever turned into an empty
/// result by the layers above.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (missing/non-positive measure, malformed filter).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A query window whose start lies after its end.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The operation targets a roll that does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// The message without the kind prefix (what HTTP bodies carry).
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(m) | Self::InvalidRange(m) | Self::NotFound(m) => m,
        }
    }
}
