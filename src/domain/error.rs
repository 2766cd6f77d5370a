//! Domain errors

use thiserror::Error;

/// Typed errors for all engine operations.
///
/// Every variant maps to a distinct caller-facing outcome; none are
/// swallowed internally. `Unavailable` is an expected business outcome,
/// not a fault.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Validation failed on {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Invalid reservation transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Timed out acquiring booking lock for vessel {vessel_id}")]
    LockTimeout { vessel_id: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether a retry with backoff may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::LockTimeout { .. } | Self::Storage(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
