//! Token issuer - signs identity claims into a time-bounded JWT.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{AppError, AppResult, JwtConfig};
use domain::{Credential, TOKEN_LIFETIME_HOURS};

/// Assertions about an authenticated identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Credential id, stringified
    pub subject: String,
    pub email: String,
}

impl IdentityClaims {
    pub fn for_credential(credential: &Credential) -> Self {
        Self {
            subject: credential.id().to_string(),
            email: credential.email().as_str().to_string(),
        }
    }
}

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 tokens for one issuer/audience pair.
pub struct TokenIssuer {
    issuer: String,
    audience: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
        }
    }

    /// Token lifetime measured from issuance
    pub fn lifetime() -> Duration {
        Duration::hours(TOKEN_LIFETIME_HOURS)
    }

    /// Sign `claims`, valid from `now` for one hour.
    ///
    /// Identical inputs and `now` produce an identical token.
    pub fn issue(&self, claims: &IdentityClaims, now: DateTime<Utc>) -> AppResult<String> {
        let expires_at = now + Self::lifetime();

        let payload = TokenClaims {
            sub: claims.subject.clone(),
            email: claims.email.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify signature, issuer, audience and expiry; return the claims.
    ///
    /// # Errors
    /// Any rejection is reported as [`AppError::Unauthenticated`].
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("Token rejected: {}", e);
            AppError::Unauthenticated
        })?;

        Ok(token_data.claims)
    }
}
