//! Authentication service - login and bearer-token handling.
//!
//! SOLID (SRP): Handles authentication concerns only.
//! DDD: Password checks go through the Credential entity; the rehash of an
//! outdated hash happens here, best-effort, before the token is issued.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, JwtConfig, OptionExt};
use credential_service_lib::repository::CredentialRepository;
use credential_service_lib::service::ActorContext;
use domain::{
    Credential, Email, Password, PasswordVerificationResult, BEARER_TOKEN_PREFIX,
    SECONDS_PER_HOUR, TOKEN_LIFETIME_HOURS, TOKEN_TYPE_BEARER,
};

use super::token_issuer::{IdentityClaims, TokenClaims, TokenIssuer};

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return a signed token.
    ///
    /// Fails with `InvalidFormat`, `NotFound` or `Unauthorized`.
    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<TokenClaims>;

    /// Bind the identity carried by a bearer token, if any.
    ///
    /// Missing, invalid or expired tokens yield an anonymous actor.
    fn resolve_actor(&self, bearer: Option<&str>) -> ActorContext;
}

/// Concrete implementation of AuthService over a credential repository.
pub struct Authenticator {
    repo: Arc<dyn CredentialRepository>,
    issuer: TokenIssuer,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(repo: Arc<dyn CredentialRepository>, jwt: &JwtConfig) -> Self {
        Self {
            repo,
            issuer: TokenIssuer::new(jwt),
        }
    }

    /// Look up and verify; refresh an outdated hash on the way.
    async fn validated_credential(&self, email: &str, password: &str) -> AppResult<Credential> {
        let email = Email::parse(email)?;
        let mut credential = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or_not_found()?;

        match credential.password_verification_result(password) {
            PasswordVerificationResult::Failed => return Err(AppError::Unauthorized),
            PasswordVerificationResult::SuccessRehashNeeded => {
                self.rehash(&mut credential, password).await
            }
            PasswordVerificationResult::Success => {}
        }

        Ok(credential)
    }

    /// Replace an outdated hash with a fresh one of the same plain text.
    ///
    /// Never fails the login: a rejected plain text or a failed write only
    /// leaves the old hash in place.
    async fn rehash(&self, credential: &mut Credential, password: &str) {
        let fresh = match Password::new(password) {
            Ok(fresh) => fresh,
            Err(e) => {
                warn!(credential_id = credential.id(), "Skipping rehash: {}", e);
                return;
            }
        };

        credential.force_change_password(fresh);
        match self.repo.update(credential).await {
            Ok(()) => info!(credential_id = credential.id(), "Password hash upgraded"),
            Err(e) => warn!(
                credential_id = credential.id(),
                code = e.code(),
                "Rehash could not be persisted: {}",
                e
            ),
        }
    }

    fn token_response(&self, credential: &Credential) -> AppResult<TokenResponse> {
        let claims = IdentityClaims::for_credential(credential);
        let access_token = self.issuer.issue(&claims, Utc::now())?;

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: TOKEN_LIFETIME_HOURS * SECONDS_PER_HOUR,
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse> {
        let credential = self.validated_credential(email, password).await?;
        let response = self.token_response(&credential)?;

        info!(credential_id = credential.id(), "Login succeeded");
        Ok(response)
    }

    fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        self.issuer.verify(token)
    }

    fn resolve_actor(&self, bearer: Option<&str>) -> ActorContext {
        let Some(raw) = bearer else {
            return ActorContext::anonymous();
        };
        let token = raw.strip_prefix(BEARER_TOKEN_PREFIX).unwrap_or(raw).trim();

        let claims = match self.verify_token(token) {
            Ok(claims) => claims,
            Err(_) => return ActorContext::anonymous(),
        };

        match claims.sub.parse::<i32>() {
            Ok(id) => ActorContext::authenticated(id),
            Err(_) => {
                debug!("Token subject is not a credential id");
                ActorContext::anonymous()
            }
        }
    }
}
