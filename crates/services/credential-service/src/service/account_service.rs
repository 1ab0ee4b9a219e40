//! Account service - registration and password change.
//!
//! SOLID (SRP): Handles credential lifecycle use cases only.
//! DDD: Invariants live in the domain value objects; this layer orders the
//! checks and talks to the repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, OptionExt};
use domain::{Credential, Email, Password};

use super::ActorContext;
use crate::repository::CredentialRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new credential.
    ///
    /// Fails with `InvalidFormat`, `DuplicateKey` or `PolicyViolation`;
    /// storage failures propagate.
    async fn register(&self, email: &str, password: &str) -> AppResult<Credential>;

    /// Change the acting identity's own password.
    ///
    /// Fails with `Unauthenticated`, `NotFound`, `InvalidCredential`,
    /// `PasswordUnchanged` or `PolicyViolation`; storage failures propagate.
    async fn change_password(
        &self,
        actor: &ActorContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()>;
}

/// Concrete implementation of AccountService using a credential repository.
pub struct AccountManager {
    repo: Arc<dyn CredentialRepository>,
}

impl AccountManager {
    /// Create new account service instance with repository
    pub fn new(repo: Arc<dyn CredentialRepository>) -> Self {
        Self { repo }
    }

    /// Advisory check; the storage unique constraint has the final word.
    async fn ensure_email_is_unique(&self, email: &Email) -> AppResult<()> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::duplicate_key("Credential"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, email: &str, password: &str) -> AppResult<Credential> {
        let email = Email::parse(email)?;
        self.ensure_email_is_unique(&email).await?;

        let password = Password::new(password)?;
        let credential = self.repo.create(Credential::new(email, password)).await?;

        info!(credential_id = credential.id(), "Credential registered");
        Ok(credential)
    }

    async fn change_password(
        &self,
        actor: &ActorContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let id = actor.user_id()?;
        let mut credential = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        credential.change_password(current_password, new_password)?;
        self.repo.update(&credential).await?;

        debug!(credential_id = id, "Password changed");
        Ok(())
    }
}
