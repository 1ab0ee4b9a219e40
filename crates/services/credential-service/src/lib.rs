//! Credential Service Library
//!
//! This crate owns credential storage and the registration and
//! change-password use cases. The storage collaborator is the
//! [`repository::CredentialRepository`] trait, with a SeaORM implementation
//! for Postgres and an in-memory one.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{AppError, AppResult};
use domain::CredentialResponse;

use crate::config::CredentialServiceConfig;
use crate::infra::Database;
use crate::repository::CredentialStore;
use crate::service::{AccountManager, AccountService};

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = CredentialServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            db.ping().await?;
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Build the account service on top of a migrated Postgres store.
pub async fn connect_account_service(
    config: &CredentialServiceConfig,
) -> AppResult<Arc<dyn AccountService>> {
    let db = Database::connect(&config.database).await.map_err(AppError::from)?;
    let store = Arc::new(CredentialStore::new(db.get_connection()));
    Ok(Arc::new(AccountManager::new(store)))
}

/// Register a credential against the configured database.
pub async fn register(email: &str, password: &str) -> AppResult<CredentialResponse> {
    let config = CredentialServiceConfig::from_env();
    let accounts = connect_account_service(&config).await?;

    let credential = accounts.register(email, password).await?;
    Ok(CredentialResponse::from(credential))
}
