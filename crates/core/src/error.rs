//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is local and recoverable: the operation that produced it is
/// aborted without touching state, and the message is meant to be shown to
/// the operator as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed a required-field or required-line rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced catalog item, line or coupon does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An external capability (camera, printer) failed to start or run.
    #[error("capability unavailable: {0}")]
    Capability(String),

    /// An identifier was reused.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Text suitable for an inline notice, without the category prefix.
    pub fn user_message(&self) -> &str {
        match self {
            DomainError::Validation(m)
            | DomainError::NotFound(m)
            | DomainError::Capability(m)
            | DomainError::Conflict(m)
            | DomainError::InvalidId(m) => m,
        }
    }
}
