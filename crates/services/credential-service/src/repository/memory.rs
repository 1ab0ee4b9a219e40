//! Process-local credential repository.
//!
//! Honors the same contract as the SeaORM store: sequential ids starting at 1,
//! `created_at` assigned on create, duplicate emails rejected.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::CredentialRepository;
use common::{AppError, AppResult};
use domain::{Credential, Email};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<i32, Credential>,
}

/// In-memory implementation of CredentialRepository
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    state: RwLock<MemoryState>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials
    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Credential>> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<Credential>> {
        let state = self.state.read().await;
        Ok(state.rows.values().find(|c| c.email() == email).cloned())
    }

    async fn create(&self, credential: Credential) -> AppResult<Credential> {
        let mut state = self.state.write().await;

        if state.rows.values().any(|c| c.email() == credential.email()) {
            return Err(AppError::duplicate_key("Credential"));
        }

        state.last_id += 1;
        let stored = Credential::restore(
            state.last_id,
            credential.email().clone(),
            credential.password().clone(),
            Utc::now(),
        );
        state.rows.insert(stored.id(), stored.clone());

        Ok(stored)
    }

    async fn update(&self, credential: &Credential) -> AppResult<()> {
        let mut state = self.state.write().await;

        let existing = state
            .rows
            .get(&credential.id())
            .ok_or(AppError::NotFound)?;

        let created_at = existing.created_at().unwrap_or_else(Utc::now);
        let updated = Credential::restore(
            credential.id(),
            credential.email().clone(),
            credential.password().clone(),
            created_at,
        );
        state.rows.insert(updated.id(), updated);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Password;
    use tokio_test::{assert_err, assert_ok};

    fn new_credential(email: &str) -> Credential {
        Credential::new(Email::parse(email).unwrap(), Password::from_hash("hash"))
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = InMemoryCredentialStore::new();

        let first = store.create(new_credential("a@example.com")).await.unwrap();
        let second = store.create(new_credential("b@example.com")).await.unwrap();

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert!(first.created_at().is_some());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryCredentialStore::new();
        assert_ok!(store.create(new_credential("a@example.com")).await);

        let result = store.create(new_credential("a@example.com")).await;

        assert!(matches!(result, Err(AppError::DuplicateKey(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_id_and_email() {
        let store = InMemoryCredentialStore::new();
        let created = store.create(new_credential("a@example.com")).await.unwrap();

        let by_id = store.find_by_id(created.id()).await.unwrap();
        let by_email = store
            .find_by_email(&Email::parse("a@example.com").unwrap())
            .await
            .unwrap();

        assert_eq!(by_id, Some(created.clone()));
        assert_eq!(by_email, Some(created));
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let store = InMemoryCredentialStore::new();
        let mut created = store.create(new_credential("a@example.com")).await.unwrap();
        let created_at = created.created_at();

        created.force_change_password(Password::from_hash("new-hash"));
        assert_ok!(store.update(&created).await);

        let stored = store.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(stored.password().as_str(), "new-hash");
        assert_eq!(stored.created_at(), created_at);
    }

    #[tokio::test]
    async fn test_update_missing_credential() {
        let store = InMemoryCredentialStore::new();
        let result = store.update(&new_credential("a@example.com")).await;

        assert_err!(&result);
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
