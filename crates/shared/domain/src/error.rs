//! Domain-level errors.
//!
//! These errors represent business rule violations detected by the value
//! objects and the credential entity. They are independent of storage and
//! transport concerns.

use thiserror::Error;

use crate::constants::{EMAIL_FORMAT_MESSAGE, PASSWORD_POLICY_MESSAGE};

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email address failed shape validation
    #[error("{}", EMAIL_FORMAT_MESSAGE)]
    InvalidFormat,

    /// Plaintext password failed the complexity policy
    #[error("{}", PASSWORD_POLICY_MESSAGE)]
    PolicyViolation,

    /// Current-password proof failed during a password change
    #[error("Current password is incorrect")]
    InvalidCredential,

    /// New password is the same as the current one
    #[error("New password must differ from the current password")]
    PasswordUnchanged,

    /// Hashing back-end failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
