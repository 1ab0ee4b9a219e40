//! Repository layer for credential storage.

pub mod entities;
mod credential_repository;
mod memory;

pub use credential_repository::{CredentialRepository, CredentialStore};
pub use memory::InMemoryCredentialStore;

#[cfg(any(test, feature = "test-utils"))]
pub use credential_repository::MockCredentialRepository;
