//! Auth service configuration.

use std::env;

use tracing::warn;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig};
use credential_service_lib::config::CredentialServiceConfig;
use domain::MIN_JWT_SECRET_LENGTH;

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Credential store connection settings
    pub database: DatabaseConfig,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET`, `JWT_ISSUER` and `JWT_AUDIENCE` are required.
    pub fn from_env() -> AppResult<Self> {
        let jwt = JwtConfig::new(
            env::var("JWT_SECRET").unwrap_or_default(),
            env::var("JWT_ISSUER").unwrap_or_default(),
            env::var("JWT_AUDIENCE").unwrap_or_default(),
        );

        Self::new(jwt, CredentialServiceConfig::from_env().database)
    }

    /// Validate and assemble a configuration.
    pub fn new(jwt: JwtConfig, database: DatabaseConfig) -> AppResult<Self> {
        let missing = jwt.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::configuration(format!(
                "missing JWT settings: {}",
                missing.join(", ")
            )));
        }

        if jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            warn!(
                length = jwt.secret.len(),
                "JWT secret is shorter than {} bytes", MIN_JWT_SECRET_LENGTH
            );
        }

        Ok(Self { jwt, database })
    }
}
