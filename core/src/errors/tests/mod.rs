//! Unit tests for domain errors

use apex_shared::ValidationErrors;

use crate::errors::{
    AuthError, DomainError, ErrorResponse, MembershipError, OtpError, TokenError, ValidationError,
};

#[test]
fn test_otp_error_codes_are_stable() {
    assert_eq!(OtpError::AccountNotFound.error_code(), "ACCOUNT_NOT_FOUND");
    assert_eq!(OtpError::NoValidCode.error_code(), "NO_VALID_CODE");
    assert_eq!(OtpError::AlreadyVerified.error_code(), "ALREADY_VERIFIED");
    assert_eq!(OtpError::Expired.error_code(), "CODE_EXPIRED");
    assert_eq!(OtpError::InvalidCode.error_code(), "INVALID_CODE");
    assert_eq!(
        OtpError::DeliveryFailure { reason: "smtp down".to_string() }.error_code(),
        "DELIVERY_FAILURE"
    );
}

#[test]
fn test_not_found_classification() {
    assert!(DomainError::from(OtpError::AccountNotFound).is_not_found());
    assert!(DomainError::from(OtpError::NoValidCode).is_not_found());
    assert!(!DomainError::from(OtpError::Expired).is_not_found());
    assert!(DomainError::NotFound { resource: "Account".to_string() }.is_not_found());
}

#[test]
fn test_status_codes() {
    assert_eq!(DomainError::from(OtpError::AccountNotFound).status_code(), 404);
    assert_eq!(DomainError::from(OtpError::InvalidCode).status_code(), 400);
    assert_eq!(
        DomainError::from(OtpError::DeliveryFailure { reason: "x".to_string() }).status_code(),
        500
    );
    assert_eq!(DomainError::from(AuthError::InvalidCredentials).status_code(), 401);
    assert_eq!(DomainError::from(TokenError::TokenRevoked).status_code(), 401);
    assert_eq!(DomainError::from(MembershipError::AlreadyMember).status_code(), 409);
    assert_eq!(
        DomainError::from(AuthError::RateLimited { retry_after_seconds: 30 }).status_code(),
        429
    );
}

#[test]
fn test_rate_limited_response_carries_retry_delay() {
    let error = DomainError::from(AuthError::RateLimited { retry_after_seconds: 42 });
    let response = ErrorResponse::from(&error);
    assert_eq!(response.error, "RATE_LIMITED");
    assert_eq!(
        response.details.unwrap().get("retry_after_seconds"),
        Some(&serde_json::json!(42))
    );
}

#[test]
fn test_delivery_failure_message_carries_reason() {
    let error = OtpError::DeliveryFailure { reason: "connection refused".to_string() };
    assert_eq!(error.to_string(), "Failed to send OTP: connection refused");
}

#[test]
fn test_error_response_from_domain_error() {
    let error = DomainError::from(OtpError::Expired);
    let response = ErrorResponse::from(&error);
    assert_eq!(response.error, "CODE_EXPIRED");
    assert_eq!(response.message, "OTP has expired");
    assert_eq!(response.status, 400);
    assert!(response.details.is_none());
}

#[test]
fn test_field_errors_become_details() {
    let mut errors = ValidationErrors::new();
    errors.add_error("email", "Enter a valid email address", "INVALID_EMAIL");
    let error = DomainError::from(ValidationError::from(errors));

    let response: ErrorResponse = error.into();
    assert_eq!(response.error, "VALIDATION_FAILED");
    let details = response.details.expect("details present");
    assert_eq!(details["email"], serde_json::json!(["Enter a valid email address"]));
}

#[test]
fn test_email_taken_code() {
    let response: ErrorResponse = AuthError::EmailAlreadyRegistered.into();
    assert_eq!(response.error, "EMAIL_TAKEN");
    assert_eq!(response.status, 409);
}
