//! Authentication service business logic.

mod auth_service;
mod token_issuer;

pub use auth_service::{AuthService, Authenticator, TokenResponse};
pub use token_issuer::{IdentityClaims, TokenClaims, TokenIssuer};
