//! Domain layer - Credential entity and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Every `Email`, `Password` and `Credential` that exists has passed its
//! constructor's checks.

pub mod constants;
pub mod credential;
pub mod email;
pub mod error;
pub mod password;

pub use constants::*;
pub use credential::{Credential, CredentialResponse};
pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use password::{Password, PasswordVerificationResult};
