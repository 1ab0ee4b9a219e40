//! Email value object.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_EMAIL_LENGTH;
use crate::error::{DomainError, DomainResult};

/// `local@domain.tld`: domain label of at least two characters, optional
/// intermediate labels, and a final alphabetic suffix of at least two.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]{2,}(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Validated email address.
///
/// DDD: Value object - immutable, compared by its normalized address.
/// The only normalization applied is trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse and validate a raw address.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidFormat`] when the input is blank, does
    /// not have the `local@domain.tld` shape, or is longer than
    /// [`MAX_EMAIL_LENGTH`] bytes after trimming (the storage column width).
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let address = raw.trim();
        if !Self::matches(address) {
            return Err(DomainError::InvalidFormat);
        }
        Ok(Self(address.to_string()))
    }

    /// Check a raw address without constructing an `Email`.
    pub fn is_valid(raw: &str) -> bool {
        Self::matches(raw.trim())
    }

    /// Get the address for storage or display.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the address string.
    pub fn into_inner(self) -> String {
        self.0
    }

    fn matches(address: &str) -> bool {
        !address.is_empty() && address.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(address)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
