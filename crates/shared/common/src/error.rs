//! Unified error handling for the credential services.
//!
//! Every failure is raised where it is detected and propagates unchanged to
//! the caller, which alone decides how a kind is presented (status code,
//! exit code, message). Nothing here knows about a transport.

use domain::{DomainError, EMAIL_FORMAT_MESSAGE, PASSWORD_POLICY_MESSAGE};
use thiserror::Error;

/// Application error kinds.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{}", EMAIL_FORMAT_MESSAGE)]
    InvalidFormat,

    #[error("{}", PASSWORD_POLICY_MESSAGE)]
    PolicyViolation,

    // Resource errors
    #[error("Credential not found")]
    NotFound,

    #[error("{0} already exists")]
    DuplicateKey(String),

    // Authentication
    #[error("Invalid email or password")]
    Unauthorized,

    #[error("Current password is incorrect")]
    InvalidCredential,

    #[error("New password must differ from the current password")]
    PasswordUnchanged,

    #[error("Authentication required")]
    Unauthenticated,

    // External service errors
    #[cfg(feature = "database")]
    #[error("Storage error")]
    Database(sea_orm::DbErr),

    #[error("Storage error: {0}")]
    Storage(String),

    #[cfg(feature = "jwt")]
    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidFormat => "INVALID_FORMAT",
            AppError::PolicyViolation => "POLICY_VIOLATION",
            AppError::NotFound => "NOT_FOUND",
            AppError::DuplicateKey(_) => "DUPLICATE_KEY",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredential => "INVALID_CREDENTIAL",
            AppError::PasswordUnchanged => "PASSWORD_UNCHANGED",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            #[cfg(feature = "database")]
            AppError::Database(_) => "STORAGE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "TOKEN_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for kinds caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidFormat
                | AppError::PolicyViolation
                | AppError::NotFound
                | AppError::DuplicateKey(_)
                | AppError::Unauthorized
                | AppError::InvalidCredential
                | AppError::PasswordUnchanged
                | AppError::Unauthenticated
        )
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A storage error occurred".to_string()
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                "A storage error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Token could not be produced".to_string()
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Service is misconfigured".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Client errors carry their own message
            _ => self.to_string(),
        }
    }
}

impl AppError {
    /// Log a failed operation at a level matching the kind and return the
    /// message to show the caller.
    ///
    /// Client errors are expected outcomes and log at `warn`; everything
    /// else logs at `error`.
    pub fn report(&self, operation: &str) -> String {
        if self.is_client_error() {
            tracing::warn!(code = self.code(), "{} rejected", operation);
        } else {
            tracing::error!(code = self.code(), "{} failed", operation);
        }
        self.user_message()
    }
}

// =============================================================================
// Storage Error Conversion (SeaORM)
// =============================================================================

/// Unique constraint violations are the storage layer's duplicate-key signal;
/// they surface exactly like the registration pre-check.
#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                AppError::duplicate_key("Credential")
            }
            _ => AppError::Database(err),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidFormat => AppError::InvalidFormat,
            DomainError::PolicyViolation => AppError::PolicyViolation,
            DomainError::InvalidCredential => AppError::InvalidCredential,
            DomainError::PasswordUnchanged => AppError::PasswordUnchanged,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn duplicate_key(entity: impl Into<String>) -> Self {
        AppError::DuplicateKey(entity.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
