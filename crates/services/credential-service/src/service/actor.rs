//! Acting identity for operations on the caller's own credential.

use common::{AppError, AppResult};

/// The identity a request acts as, resolved by the caller before entering
/// the use case (e.g. from a verified bearer token).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorContext {
    user_id: Option<i32>,
}

impl ActorContext {
    /// No identity bound
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Identity bound to a credential id
    pub fn authenticated(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Get the bound credential id.
    ///
    /// # Errors
    /// Returns [`AppError::Unauthenticated`] when no identity is bound.
    pub fn user_id(&self) -> AppResult<i32> {
        self.user_id.ok_or(AppError::Unauthenticated)
    }
}
