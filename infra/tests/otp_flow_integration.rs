//! End-to-end OTP flows over the in-memory repositories and mock email sender

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use apex_core::errors::{AuthError, DomainError, OtpError};
use apex_core::services::{ManualClock, PasswordResetConfirmation, RegistrationInput};
use apex_infra::bootstrap::InMemoryAppServices;
use apex_infra::MockEmailSender;
use apex_shared::AppConfig;

struct TestApp {
    services: InMemoryAppServices<MockEmailSender>,
    mailer: Arc<MockEmailSender>,
    clock: Arc<ManualClock>,
}

/// 1_699_999_800 is a step boundary, so the app starts one minute into a step
fn setup() -> TestApp {
    let mut config = AppConfig::default();
    config.auth.bcrypt_cost = 4;

    let mailer = Arc::new(MockEmailSender::new());
    let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_699_999_860, 0).unwrap()));
    let services = InMemoryAppServices::in_memory(&config, mailer.clone(), clock.clone());

    TestApp {
        services,
        mailer,
        clock,
    }
}

fn registration(email: &str) -> RegistrationInput {
    RegistrationInput {
        email: email.to_string(),
        first_name: "Sam".to_string(),
        last_name: "Okafor".to_string(),
        password: "gym-rat-2024".to_string(),
        password_confirm: "gym-rat-2024".to_string(),
    }
}

fn otp_error<T: std::fmt::Debug>(result: Result<T, DomainError>) -> OtpError {
    match result {
        Err(DomainError::Otp(e)) => e,
        other => panic!("expected OTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_verify_and_login() {
    let app = setup();

    app.services.accounts.register(registration("sam@example.com")).await.unwrap();

    let email = app.mailer.last_sent_to("sam@example.com").unwrap();
    assert_eq!(email.subject, "Your OTP Code for Verification");
    let code = app.mailer.last_code_for("sam@example.com").unwrap();
    assert_eq!(
        email.body,
        format!("Hi Sam,\n\nYour OTP code is {}. It is valid for 10 minutes.", code)
    );

    let account = app.services.accounts.verify_account("sam@example.com", &code).await.unwrap();
    assert!(account.is_verified && account.is_active);

    let login = app.services.auth.login("sam@example.com", "gym-rat-2024").await.unwrap();
    let claims = app
        .services
        .tokens
        .verify_access_token(&login.tokens.access_token)
        .unwrap();
    assert_eq!(claims.account_id().unwrap(), account.id);
}

#[tokio::test]
async fn test_eleven_minutes_later_code_is_expired() {
    let app = setup();
    app.services.accounts.register(registration("sam@example.com")).await.unwrap();
    let code = app.mailer.last_code_for("sam@example.com").unwrap();

    app.clock.advance(Duration::minutes(11));

    let result = app.services.accounts.verify_account("sam@example.com", &code).await;
    assert_eq!(otp_error(result), OtpError::Expired);
}

#[tokio::test]
async fn test_code_valid_at_exact_expiry_boundary() {
    let app = setup();
    app.services.accounts.register(registration("sam@example.com")).await.unwrap();
    let code = app.mailer.last_code_for("sam@example.com").unwrap();

    app.clock.advance(Duration::minutes(10));

    assert!(app.services.accounts.verify_account("sam@example.com", &code).await.is_ok());
}

#[tokio::test]
async fn test_verification_accepts_previous_step() {
    let app = setup();
    app.services.accounts.register(registration("sam@example.com")).await.unwrap();
    let code = app.mailer.last_code_for("sam@example.com").unwrap();

    // Crosses into the next 600 s step while staying inside the validity window
    app.clock.advance(Duration::seconds(599));

    assert!(app.services.accounts.verify_account("sam@example.com", &code).await.is_ok());
}

#[tokio::test]
async fn test_password_reset_rejects_previous_step() {
    let app = setup();
    app.services.accounts.register(registration("sam@example.com")).await.unwrap();
    app.services.accounts.request_password_reset("sam@example.com").await.unwrap();
    let code = app.mailer.last_code_for("sam@example.com").unwrap();

    app.clock.advance(Duration::seconds(599));

    let result = app
        .services
        .accounts
        .confirm_password_reset(PasswordResetConfirmation {
            email: "sam@example.com".to_string(),
            code,
            new_password: "stronger-pass-1".to_string(),
        })
        .await;
    assert_eq!(otp_error(result), OtpError::InvalidCode);
}

#[tokio::test]
async fn test_reissue_invalidates_previous_code() {
    let app = setup();
    app.services.accounts.register(registration("sam@example.com")).await.unwrap();
    let first = app.mailer.last_code_for("sam@example.com").unwrap();

    app.clock.advance(Duration::seconds(30));
    app.services.accounts.resend_verification("sam@example.com").await.unwrap();
    let second = app.mailer.last_code_for("sam@example.com").unwrap();

    // Distinct secrets only produce the same code by chance
    if first != second {
        let stale = app.services.accounts.verify_account("sam@example.com", &first).await;
        assert_eq!(otp_error(stale), OtpError::InvalidCode);
    }

    assert!(app.services.accounts.verify_account("sam@example.com", &second).await.is_ok());
    assert_eq!(app.mailer.get_message_count(), 2);
}

#[tokio::test]
async fn test_delivery_failure_then_resend() {
    let app = setup();
    app.mailer.set_simulate_failure(true);

    let result = app.services.accounts.register(registration("sam@example.com")).await;
    assert!(matches!(otp_error(result), OtpError::DeliveryFailure { .. }));

    app.mailer.set_simulate_failure(false);
    app.services.accounts.resend_verification("sam@example.com").await.unwrap();
    let code = app.mailer.last_code_for("sam@example.com").unwrap();

    assert!(app.services.accounts.verify_account("sam@example.com", &code).await.is_ok());
}

#[tokio::test]
async fn test_already_verified_account() {
    let app = setup();
    app.services.accounts.register(registration("sam@example.com")).await.unwrap();
    let code = app.mailer.last_code_for("sam@example.com").unwrap();
    app.services.accounts.verify_account("sam@example.com", &code).await.unwrap();

    let again = app.services.accounts.verify_account("sam@example.com", &code).await;
    assert_eq!(otp_error(again), OtpError::AlreadyVerified);

    let resend = app.services.accounts.resend_verification("sam@example.com").await;
    assert_eq!(otp_error(resend), OtpError::AlreadyVerified);
}

#[tokio::test]
async fn test_reset_code_guessing_is_throttled() {
    let app = setup();
    app.services.accounts.register(registration("sam@example.com")).await.unwrap();
    app.services.accounts.request_password_reset("sam@example.com").await.unwrap();
    let code = app.mailer.last_code_for("sam@example.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let attempt = |code: &str| PasswordResetConfirmation {
        email: "sam@example.com".to_string(),
        code: code.to_string(),
        new_password: "new-gym-pass".to_string(),
    };

    let mut refused = None;
    for _ in 0..20 {
        match app.services.accounts.confirm_password_reset(attempt(wrong)).await {
            Err(DomainError::Otp(OtpError::InvalidCode)) => continue,
            other => {
                refused = Some(other);
                break;
            }
        }
    }
    assert!(matches!(
        refused,
        Some(Err(DomainError::Auth(AuthError::RateLimited { .. })))
    ));

    let blocked = app.services.accounts.confirm_password_reset(attempt(&code)).await;
    assert!(matches!(
        blocked,
        Err(DomainError::Auth(AuthError::RateLimited { .. }))
    ));
    assert!(app.services.auth.login("sam@example.com", "new-gym-pass").await.is_err());
}
