//! Credential domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::email::Email;
use crate::error::{DomainError, DomainResult};
use crate::password::{Password, PasswordVerificationResult};

/// Credential domain entity: a registered identity.
///
/// `id` and `created_at` belong to the storage boundary. They stay unset
/// (`0` / `None`) until the credential is first persisted and are never
/// changed by domain operations, which only ever replace the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    id: i32,
    email: Email,
    password: Password,
    created_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a new, not yet persisted credential
    pub fn new(email: Email, password: Password) -> Self {
        Self {
            id: 0,
            email,
            password,
            created_at: None,
        }
    }

    /// Reconstitute a persisted credential (storage boundary only)
    pub fn restore(id: i32, email: Email, password: Password, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            password,
            created_at: Some(created_at),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Check if the storage boundary has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// True unless the candidate fails verification
    pub fn verify_password(&self, plain_text: &str) -> bool {
        self.password_verification_result(plain_text).is_verified()
    }

    /// Full three-way verification outcome for the stored password
    pub fn password_verification_result(&self, plain_text: &str) -> PasswordVerificationResult {
        self.password.verify(plain_text)
    }

    /// Replace the password after proving knowledge of the current one.
    ///
    /// The proof only accepts an exact [`PasswordVerificationResult::Success`];
    /// a stale stored hash must be refreshed by a login first.
    ///
    /// # Errors
    /// - [`DomainError::InvalidCredential`] if `current` does not verify
    /// - [`DomainError::PasswordUnchanged`] if `new` equals the current password
    /// - [`DomainError::PolicyViolation`] if `new` fails the complexity policy
    ///
    /// The stored password is left untouched on every error.
    pub fn change_password(&mut self, current: &str, new: &str) -> DomainResult<()> {
        if self.password_verification_result(current) != PasswordVerificationResult::Success {
            return Err(DomainError::InvalidCredential);
        }

        if self.password_verification_result(new) == PasswordVerificationResult::Success {
            return Err(DomainError::PasswordUnchanged);
        }

        self.password = Password::new(new)?;
        Ok(())
    }

    /// Replace the password without any proof or comparison.
    ///
    /// Used by the login rehash path; never reachable by end users directly.
    pub fn force_change_password(&mut self, password: Password) {
        self.password = password;
    }
}

/// Credential view that is safe to return to clients (no hash)
#[derive(Debug, Clone, Serialize)]
pub struct CredentialResponse {
    /// Storage-assigned identifier
    pub id: i32,
    /// Registered email address
    pub email: String,
    /// Registration timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Credential> for CredentialResponse {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            email: credential.email.as_str().to_string(),
            created_at: credential.created_at,
        }
    }
}

impl From<Credential> for CredentialResponse {
    fn from(credential: Credential) -> Self {
        Self::from(&credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credential(plain: &str) -> Credential {
        Credential::new(
            Email::parse("test@example.com").unwrap(),
            Password::new(plain).unwrap(),
        )
    }

    #[test]
    fn test_new_credential_is_not_persisted() {
        let email = Email::parse("test@example.com").unwrap();
        let password = Password::new("Pass@123").unwrap();

        let credential = Credential::new(email.clone(), password.clone());

        assert_eq!(credential.email(), &email);
        assert_eq!(credential.password(), &password);
        assert_eq!(credential.id(), 0);
        assert!(credential.created_at().is_none());
        assert!(!credential.is_persisted());
    }

    #[test]
    fn test_restore_keeps_storage_fields() {
        let created_at = Utc::now();
        let credential = Credential::restore(
            7,
            Email::parse("test@example.com").unwrap(),
            Password::from_hash("hash"),
            created_at,
        );

        assert_eq!(credential.id(), 7);
        assert_eq!(credential.created_at(), Some(created_at));
        assert!(credential.is_persisted());
    }

    #[test]
    fn test_verify_password() {
        let credential = test_credential("Pass@123");

        assert!(credential.verify_password("Pass@123"));
        assert!(!credential.verify_password("Wrong@123"));
        assert_eq!(
            credential.password_verification_result("Pass@123"),
            PasswordVerificationResult::Success
        );
        assert_eq!(
            credential.password_verification_result("Wrong@123"),
            PasswordVerificationResult::Failed
        );
    }

    #[test]
    fn test_change_password_success() {
        let mut credential = test_credential("Pass@123");

        credential.change_password("Pass@123", "NewPass@456").unwrap();

        assert!(credential.verify_password("NewPass@456"));
        assert!(!credential.verify_password("Pass@123"));
    }

    #[test]
    fn test_change_password_wrong_current() {
        let mut credential = test_credential("Pass@123");
        let before = credential.password().clone();

        let result = credential.change_password("Wrong@123", "NewPass@456");

        assert_eq!(result, Err(DomainError::InvalidCredential));
        assert_eq!(credential.password(), &before);
    }

    #[test]
    fn test_change_password_rejects_stale_hash_proof() {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Algorithm, Argon2, Params, Version,
        };

        let salt = SaltString::generate(&mut OsRng);
        let weak = Params::new(8, 1, 1, None).unwrap();
        let stale_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, weak)
            .hash_password("Pass@123".as_bytes(), &salt)
            .unwrap()
            .to_string();
        let mut credential = Credential::new(
            Email::parse("test@example.com").unwrap(),
            Password::from_hash(stale_hash),
        );
        let before = credential.password().clone();
        assert_eq!(
            credential.password_verification_result("Pass@123"),
            PasswordVerificationResult::SuccessRehashNeeded
        );

        let result = credential.change_password("Pass@123", "NewPass@456");

        assert_eq!(result, Err(DomainError::InvalidCredential));
        assert_eq!(credential.password(), &before);
        assert!(!credential.verify_password("NewPass@456"));
    }

    #[test]
    fn test_change_password_unchanged() {
        let mut credential = test_credential("Pass@123");
        let before = credential.password().clone();

        let result = credential.change_password("Pass@123", "Pass@123");

        assert_eq!(result, Err(DomainError::PasswordUnchanged));
        assert_eq!(credential.password(), &before);
    }

    #[test]
    fn test_change_password_policy_violation() {
        let mut credential = test_credential("Pass@123");
        let before = credential.password().clone();

        let result = credential.change_password("Pass@123", "weak");

        assert_eq!(result, Err(DomainError::PolicyViolation));
        assert_eq!(credential.password(), &before);
    }

    #[test]
    fn test_force_change_password() {
        let mut credential = test_credential("Pass@123");
        let replacement = Password::new("Other@789").unwrap();

        credential.force_change_password(replacement.clone());

        assert_eq!(credential.password(), &replacement);
        assert!(credential.verify_password("Other@789"));
    }

    #[test]
    fn test_response_hides_hash() {
        let credential = Credential::restore(
            3,
            Email::parse("test@example.com").unwrap(),
            Password::from_hash("secret-hash"),
            Utc::now(),
        );

        let response = CredentialResponse::from(&credential);

        assert_eq!(response.id, 3);
        assert_eq!(response.email, "test@example.com");
        assert!(response.created_at.is_some());
    }
}
