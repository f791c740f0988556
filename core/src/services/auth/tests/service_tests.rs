//! Unit tests for authentication service

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use apex_shared::{ActionLimit, RateLimitConfig};

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository, InMemoryTokenRepository};
use crate::services::account::PasswordHasher;
use crate::services::auth::AuthService;
use crate::services::otp::ManualClock;
use crate::services::rate_limit::InMemoryRateLimiter;
use crate::services::token::{TokenService, TokenServiceConfig};

struct Fixture {
    service: AuthService<InMemoryAccountRepository, InMemoryTokenRepository>,
    accounts: Arc<InMemoryAccountRepository>,
    tokens: Arc<TokenService<InMemoryTokenRepository>>,
    clock: Arc<ManualClock>,
}

fn fixture_with_limits(limits: RateLimitConfig) -> Fixture {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let tokens = Arc::new(TokenService::new(
        Arc::new(InMemoryTokenRepository::new()),
        TokenServiceConfig::default(),
    ));
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 1, 18, 0, 0).unwrap()));
    let limiter = Arc::new(InMemoryRateLimiter::new(limits, clock.clone()));
    let service = AuthService::new(
        accounts.clone(),
        tokens.clone(),
        PasswordHasher::new(4),
        limiter,
    );
    Fixture {
        service,
        accounts,
        tokens,
        clock,
    }
}

fn fixture() -> Fixture {
    fixture_with_limits(RateLimitConfig::default())
}

async fn store_account(f: &Fixture, verified: bool) -> Account {
    let hash = PasswordHasher::new(4).hash("correct-horse").unwrap();
    let mut account = Account::new(
        "casey@example.com".to_string(),
        "Casey".to_string(),
        "Ng".to_string(),
        hash,
    );
    if verified {
        account.activate();
    }
    f.accounts.create(account).await.unwrap()
}

#[tokio::test]
async fn test_login_success() {
    let f = fixture();
    let account = store_account(&f, true).await;

    let result = f.service.login(" Casey@Example.com", "correct-horse").await.unwrap();

    assert_eq!(result.account.id, account.id);
    let claims = f.tokens.verify_access_token(&result.tokens.access_token).unwrap();
    assert_eq!(claims.account_id().unwrap(), account.id);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_alike() {
    let f = fixture();
    store_account(&f, true).await;

    let wrong = f.service.login("casey@example.com", "wrong-horse").await;
    let unknown = f.service.login("nobody@example.com", "correct-horse").await;

    assert!(matches!(wrong, Err(DomainError::Auth(AuthError::InvalidCredentials))));
    assert!(matches!(unknown, Err(DomainError::Auth(AuthError::InvalidCredentials))));
}

#[tokio::test]
async fn test_login_requires_verification() {
    let f = fixture();
    store_account(&f, false).await;

    let result = f.service.login("casey@example.com", "correct-horse").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AccountNotVerified))));
}

#[tokio::test]
async fn test_login_rejects_inactive_account() {
    let f = fixture();
    let mut account = store_account(&f, true).await;
    account.is_active = false;
    f.accounts.update(account).await.unwrap();

    let result = f.service.login("casey@example.com", "correct-horse").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AccountInactive))));
}

#[tokio::test]
async fn test_logout_revokes_refresh_token_only() {
    let f = fixture();
    store_account(&f, true).await;
    let session = f.service.login("casey@example.com", "correct-horse").await.unwrap();

    f.service.logout(&session.tokens.refresh_token).await.unwrap();

    let again = f.service.logout(&session.tokens.refresh_token).await;
    assert!(matches!(again, Err(DomainError::Token(TokenError::TokenRevoked))));
    let refresh = f.service.refresh_access_token(&session.tokens.refresh_token).await;
    assert!(matches!(refresh, Err(DomainError::Token(TokenError::TokenRevoked))));

    // Logging out does not lock the account
    assert!(f.service.login("casey@example.com", "correct-horse").await.is_ok());
}

#[tokio::test]
async fn test_refresh_access_token() {
    let f = fixture();
    let account = store_account(&f, true).await;
    let session = f.service.login("casey@example.com", "correct-horse").await.unwrap();

    let access = f
        .service
        .refresh_access_token(&session.tokens.refresh_token)
        .await
        .unwrap();
    let claims = f.tokens.verify_access_token(&access).unwrap();
    assert_eq!(claims.sub, account.id.to_string());
}

#[tokio::test]
async fn test_logout_with_unknown_token() {
    let f = fixture();
    let result = f.service.logout("made-up-token").await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidRefreshToken))));
}

#[tokio::test]
async fn test_login_attempts_are_throttled() {
    let f = fixture_with_limits(RateLimitConfig {
        login: ActionLimit::new(3, 300),
        ..Default::default()
    });
    store_account(&f, true).await;

    for _ in 0..3 {
        let result = f.service.login("casey@example.com", "wrong-horse").await;
        assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidCredentials))));
    }

    // Refused before the password is checked, and keyed on the normalized email
    let blocked = f.service.login(" CASEY@example.com ", "correct-horse").await;
    assert!(matches!(
        blocked,
        Err(DomainError::Auth(AuthError::RateLimited { retry_after_seconds: 300 }))
    ));

    f.clock.advance(Duration::minutes(5));
    assert!(f.service.login("casey@example.com", "correct-horse").await.is_ok());
}
