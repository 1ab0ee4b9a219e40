//! Credential repository: the storage capability used by the use cases,
//! and its SeaORM implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Unchanged, ColumnTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::entities::credential::{self, ActiveModel, Entity as CredentialEntity};
use common::{AppError, AppResult};
use domain::{Credential, Email};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential repository trait for dependency injection.
///
/// Implementations own id and `created_at` assignment and must enforce email
/// uniqueness themselves, reporting a clash as [`AppError::DuplicateKey`].
/// Any other failure is a storage error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find credential by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Credential>>;

    /// Find credential by email address
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<Credential>>;

    /// Persist a new credential, returning it with id and `created_at` set
    async fn create(&self, credential: Credential) -> AppResult<Credential>;

    /// Persist the current email and password of an existing credential
    async fn update(&self, credential: &Credential) -> AppResult<()>;
}

/// Concrete implementation of CredentialRepository backed by SeaORM
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialRepository for CredentialStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Credential>> {
        let result = CredentialEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Credential::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<Credential>> {
        let result = CredentialEntity::find()
            .filter(credential::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Credential::try_from).transpose()
    }

    async fn create(&self, credential: Credential) -> AppResult<Credential> {
        let active_model = ActiveModel {
            id: NotSet,
            email: Set(credential.email().as_str().to_string()),
            password_hash: Set(credential.password().as_str().to_string()),
            created_at: Set(Utc::now()),
        };

        // A unique-constraint violation converts to DuplicateKey
        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Credential::try_from(model)
    }

    async fn update(&self, credential: &Credential) -> AppResult<()> {
        if !credential.is_persisted() {
            return Err(AppError::NotFound);
        }

        let active_model = ActiveModel {
            id: Unchanged(credential.id()),
            email: Set(credential.email().as_str().to_string()),
            password_hash: Set(credential.password().as_str().to_string()),
            created_at: NotSet,
        };

        match active_model.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(e) => Err(AppError::from(e)),
        }
    }
}
