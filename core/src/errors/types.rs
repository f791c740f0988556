//! Domain-specific error types for the OTP lifecycle, authentication and related operations
//!
//! Every variant maps to a stable SCREAMING_SNAKE code. Codes are part of the
//! public contract with clients; messages are not.

use std::collections::HashMap;

use apex_shared::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the verification and password-reset flows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("No valid OTP found")]
    NoValidCode,

    #[error("Account is already verified")]
    AlreadyVerified,

    #[error("OTP has expired")]
    Expired,

    #[error("Invalid OTP")]
    InvalidCode,

    #[error("Failed to send OTP: {reason}")]
    DeliveryFailure { reason: String },
}

impl OtpError {
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            OtpError::NoValidCode => "NO_VALID_CODE",
            OtpError::AlreadyVerified => "ALREADY_VERIFIED",
            OtpError::Expired => "CODE_EXPIRED",
            OtpError::InvalidCode => "INVALID_CODE",
            OtpError::DeliveryFailure { .. } => "DELIVERY_FAILURE",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            OtpError::AccountNotFound => 404,
            OtpError::NoValidCode
            | OtpError::AlreadyVerified
            | OtpError::Expired
            | OtpError::InvalidCode => 400,
            OtpError::DeliveryFailure { .. } => 500,
        }
    }

    /// Both "no such account" and "no current record" are reported as not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, OtpError::AccountNotFound | OtpError::NoValidCode)
    }
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not verified")]
    AccountNotVerified,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("Too many attempts, retry in {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            AuthError::AccountInactive => "ACCOUNT_INACTIVE",
            AuthError::EmailAlreadyRegistered => "EMAIL_TAKEN",
            AuthError::RateLimited { .. } => "RATE_LIMITED",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 401,
            AuthError::AccountNotVerified | AuthError::AccountInactive => 403,
            AuthError::EmailAlreadyRegistered => 409,
            AuthError::RateLimited { .. } => 429,
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Membership errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("You are already a member")]
    AlreadyMember,
}

impl MembershipError {
    pub fn error_code(&self) -> &'static str {
        match self {
            MembershipError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            MembershipError::AlreadyMember => "MEMBERSHIP_EXISTS",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            MembershipError::AccountNotFound => 404,
            MembershipError::AlreadyMember => 409,
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Validation failed: {0}")]
    Fields(ValidationErrors),
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::Fields(_) => "VALIDATION_FAILED",
        }
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        ValidationError::Fields(errors)
    }
}

/// Unified error response structure handed to transport layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Suggested HTTP status
    pub status: u16,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString, status: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: HashMap<String, serde_json::Value>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<OtpError> for ErrorResponse {
    fn from(err: OtpError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string(), err.status_code())
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string(), err.status_code())
    }
}
