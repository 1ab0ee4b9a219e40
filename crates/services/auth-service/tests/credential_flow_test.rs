//! End-to-end credential flows over the in-memory store.
//!
//! Registration, login and password change run against real services; only
//! the Postgres store is swapped for the process-local one.

use std::sync::Arc;

use chrono::Utc;
use tokio_test::{assert_err, assert_ok};

use auth_service_lib::change_password_with_bearer;
use auth_service_lib::service::{AuthService, Authenticator, TokenIssuer};
use common::{AppError, JwtConfig};
use credential_service_lib::repository::{CredentialRepository, InMemoryCredentialStore};
use credential_service_lib::service::{AccountManager, AccountService, ActorContext};
use domain::Email;

const EMAIL: &str = "test@example.com";
const PASSWORD: &str = "Pass@123";

// =============================================================================
// Fixture
// =============================================================================

struct Fixture {
    store: Arc<InMemoryCredentialStore>,
    accounts: AccountManager,
    auth: Authenticator,
}

fn jwt_config() -> JwtConfig {
    JwtConfig::new(
        "integration-secret-key-32-chars-min!",
        "credential-service",
        "credential-clients",
    )
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryCredentialStore::new());
    Fixture {
        accounts: AccountManager::new(store.clone()),
        auth: Authenticator::new(store.clone(), &jwt_config()),
        store,
    }
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_stores_verifiable_credential() {
    let fx = fixture();

    let credential = assert_ok!(fx.accounts.register(EMAIL, PASSWORD).await);

    let stored = fx
        .store
        .find_by_email(&Email::parse(EMAIL).unwrap())
        .await
        .unwrap()
        .expect("credential should be stored");
    assert_eq!(stored.id(), credential.id());
    assert_eq!(stored.email().as_str(), EMAIL);
    assert!(stored.verify_password(PASSWORD));
    assert_ne!(stored.password().as_str(), PASSWORD);
}

#[tokio::test]
async fn test_register_same_email_twice_conflicts() {
    let fx = fixture();
    assert_ok!(fx.accounts.register(EMAIL, PASSWORD).await);

    let result = fx.accounts.register(EMAIL, "Another@456").await;

    assert!(matches!(result, Err(AppError::DuplicateKey(_))));
    assert_eq!(fx.store.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_bad_input_without_storing() {
    let fx = fixture();

    assert!(matches!(
        fx.accounts.register("not-an-email", PASSWORD).await,
        Err(AppError::InvalidFormat)
    ));
    assert!(matches!(
        fx.accounts.register(EMAIL, "password").await,
        Err(AppError::PolicyViolation)
    ));
    assert!(fx.store.is_empty().await);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_issues_token_for_credential() {
    let fx = fixture();
    let credential = fx.accounts.register(EMAIL, PASSWORD).await.unwrap();
    let before = Utc::now().timestamp();

    let response = assert_ok!(fx.auth.login(EMAIL, PASSWORD).await);

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 3600);

    let claims = TokenIssuer::new(&jwt_config())
        .verify(&response.access_token)
        .unwrap();
    assert_eq!(claims.sub, credential.id().to_string());
    assert_eq!(claims.email, EMAIL);
    assert_eq!(claims.iss, "credential-service");
    assert_eq!(claims.aud, "credential-clients");
    assert_eq!(claims.exp - claims.iat, 3600);
    assert!(claims.iat >= before && claims.iat <= Utc::now().timestamp());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let fx = fixture();
    fx.accounts.register(EMAIL, PASSWORD).await.unwrap();

    let result = fx.auth.login(EMAIL, "Wrong@123").await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_login_unknown_email_is_not_found() {
    let fx = fixture();

    let result = fx.auth.login(EMAIL, PASSWORD).await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

// =============================================================================
// Password change
// =============================================================================

#[tokio::test]
async fn test_change_password_to_identical_value_is_rejected() {
    let fx = fixture();
    let credential = fx.accounts.register(EMAIL, PASSWORD).await.unwrap();

    let result = fx
        .accounts
        .change_password(&ActorContext::authenticated(credential.id()), PASSWORD, PASSWORD)
        .await;

    assert!(matches!(result, Err(AppError::PasswordUnchanged)));
}

#[tokio::test]
async fn test_change_password_with_bearer_token() {
    let fx = fixture();
    fx.accounts.register(EMAIL, PASSWORD).await.unwrap();
    let token = fx.auth.login(EMAIL, PASSWORD).await.unwrap().access_token;

    assert_ok!(
        change_password_with_bearer(
            &fx.auth,
            &fx.accounts,
            &format!("Bearer {}", token),
            PASSWORD,
            "NewPass@456",
        )
        .await
    );

    assert!(matches!(
        fx.auth.login(EMAIL, PASSWORD).await,
        Err(AppError::Unauthorized)
    ));
    assert_ok!(fx.auth.login(EMAIL, "NewPass@456").await);
}

#[tokio::test]
async fn test_change_password_with_invalid_token_is_unauthenticated() {
    let fx = fixture();
    fx.accounts.register(EMAIL, PASSWORD).await.unwrap();

    let result =
        change_password_with_bearer(&fx.auth, &fx.accounts, "garbage", PASSWORD, "NewPass@456")
            .await;

    assert_err!(&result);
    assert!(matches!(result, Err(AppError::Unauthenticated)));
    assert_ok!(fx.auth.login(EMAIL, PASSWORD).await);
}
