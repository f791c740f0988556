//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    AuthError, ErrorResponse, MembershipError, OtpError, TokenError, ValidationError,
};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Otp(e) => e.error_code(),
            DomainError::Auth(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
            DomainError::Membership(e) => e.error_code(),
            DomainError::ValidationErr(e) => e.error_code(),
        }
    }

    /// HTTP status a transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation { .. } => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::Internal { .. } => 500,
            DomainError::Otp(e) => e.status_code(),
            DomainError::Auth(e) => e.status_code(),
            DomainError::Token(_) => 401,
            DomainError::Membership(e) => e.status_code(),
            DomainError::ValidationErr(_) => 400,
        }
    }

    /// Whether this error means the addressed entity does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            DomainError::NotFound { .. } => true,
            DomainError::Otp(e) => e.is_not_found(),
            DomainError::Membership(MembershipError::AccountNotFound) => true,
            _ => false,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let response = ErrorResponse::new(err.error_code(), err.to_string(), err.status_code());
        match err {
            DomainError::ValidationErr(ValidationError::Fields(errors)) => {
                let details = errors
                    .to_field_errors()
                    .into_iter()
                    .map(|(field, messages)| (field, serde_json::json!(messages)))
                    .collect();
                response.with_details(details)
            }
            DomainError::Auth(AuthError::RateLimited { retry_after_seconds }) => response
                .with_details(
                    [("retry_after_seconds".to_string(), serde_json::json!(retry_after_seconds))]
                        .into_iter()
                        .collect(),
                ),
            _ => response,
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        ErrorResponse::from(&err)
    }
}
