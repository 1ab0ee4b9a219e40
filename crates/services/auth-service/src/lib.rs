//! Auth Service Library
//!
//! This crate provides authentication on top of the credential store:
//! login with password verification and opportunistic rehash, signed
//! bearer tokens, and binding a token back to an acting identity.

pub mod config;
pub mod service;

use std::sync::Arc;

use common::{AppError, AppResult};
use credential_service_lib::infra::Database;
use credential_service_lib::repository::{CredentialRepository, CredentialStore};
use credential_service_lib::service::{AccountManager, AccountService};

use crate::config::AuthServiceConfig;
use crate::service::{AuthService, Authenticator, TokenClaims, TokenIssuer, TokenResponse};

/// Open the migrated Postgres credential store.
async fn connect_store(config: &AuthServiceConfig) -> AppResult<Arc<dyn CredentialRepository>> {
    let db = Database::connect(&config.database).await.map_err(AppError::from)?;
    Ok(Arc::new(CredentialStore::new(db.get_connection())))
}

/// Change the password of whoever `bearer` identifies.
///
/// An unusable token leaves the caller anonymous, which the use case
/// rejects as `Unauthenticated`.
pub async fn change_password_with_bearer(
    auth: &dyn AuthService,
    accounts: &dyn AccountService,
    bearer: &str,
    current_password: &str,
    new_password: &str,
) -> AppResult<()> {
    let actor = auth.resolve_actor(Some(bearer));
    accounts
        .change_password(&actor, current_password, new_password)
        .await
}

/// Login against the configured database.
pub async fn login(email: &str, password: &str) -> AppResult<TokenResponse> {
    let config = AuthServiceConfig::from_env()?;
    let store = connect_store(&config).await?;

    Authenticator::new(store, &config.jwt).login(email, password).await
}

/// Change a password against the configured database.
pub async fn change_password(
    token: &str,
    current_password: &str,
    new_password: &str,
) -> AppResult<()> {
    let config = AuthServiceConfig::from_env()?;
    let store = connect_store(&config).await?;

    let auth = Authenticator::new(store.clone(), &config.jwt);
    let accounts = AccountManager::new(store);
    change_password_with_bearer(&auth, &accounts, token, current_password, new_password).await
}

/// Verify a token with the configured signing settings.
pub fn verify(token: &str) -> AppResult<TokenClaims> {
    let config = AuthServiceConfig::from_env()?;
    TokenIssuer::new(&config.jwt).verify(token)
}
