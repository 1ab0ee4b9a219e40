//! Password value object - Domain layer password handling.
//!
//! DDD: Encapsulates the complexity policy and Argon2 hashing as a value object.
//! DRY: Centralized Argon2 configuration; the same instance decides whether a
//! stored hash is outdated.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version, ARGON2ID_IDENT,
};

use crate::constants::{MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARACTERS};
use crate::error::{DomainError, DomainResult};

/// Outcome of checking a plaintext candidate against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerificationResult {
    /// Candidate matches and the stored hash uses current parameters
    Success,
    /// Candidate matches but the stored hash should be regenerated
    SuccessRehashNeeded,
    /// Candidate does not match
    Failed,
}

impl PasswordVerificationResult {
    /// True for both success outcomes.
    pub fn is_verified(&self) -> bool {
        !matches!(self, PasswordVerificationResult::Failed)
    }
}

/// Password value object that handles hashing and verification.
///
/// DDD: Value object - immutable, compared by hash string.
/// Never holds the plaintext.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by validating and hashing the plain text.
    ///
    /// Every call draws a fresh random salt, so two passwords built from the
    /// same plain text have different hash strings.
    ///
    /// # Errors
    /// Returns [`DomainError::PolicyViolation`] when the plain text is blank,
    /// shorter than 8 characters, or lacks a letter, a digit, or a special
    /// character.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        if !Self::satisfies_policy(plain_text) {
            return Err(DomainError::PolicyViolation);
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from storage).
    ///
    /// No policy check is applied.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Check the complexity policy without hashing.
    pub fn satisfies_policy(plain_text: &str) -> bool {
        if plain_text.trim().is_empty() {
            return false;
        }

        plain_text.chars().count() >= MIN_PASSWORD_LENGTH
            && plain_text.chars().any(char::is_alphabetic)
            && plain_text.chars().any(|c| c.is_ascii_digit())
            && plain_text
                .chars()
                .any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text candidate against this hash.
    ///
    /// A hash that cannot be parsed never verifies.
    pub fn verify(&self, plain_text: &str) -> PasswordVerificationResult {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return PasswordVerificationResult::Failed;
        };

        if Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_err()
        {
            return PasswordVerificationResult::Failed;
        }

        if Self::is_outdated(&parsed) {
            PasswordVerificationResult::SuccessRehashNeeded
        } else {
            PasswordVerificationResult::Success
        }
    }

    /// Hash a password using Argon2.
    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// A stored hash is outdated when it was produced by another algorithm or
    /// version, or with any cost below the current defaults.
    fn is_outdated(parsed: &PasswordHash<'_>) -> bool {
        if parsed.algorithm != ARGON2ID_IDENT || parsed.version != Some(Version::V0x13 as u32) {
            return true;
        }

        let current = Params::default();
        match Params::try_from(parsed) {
            Ok(stored) => {
                stored.m_cost() < current.m_cost()
                    || stored.t_cost() < current.t_cost()
                    || stored.p_cost() < current.p_cost()
            }
            Err(_) => true,
        }
    }

    /// Get Argon2 instance with default config.
    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
