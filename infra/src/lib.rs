//! # Infrastructure Layer
//!
//! Concrete implementations for the Apex Gym backend: persistence, email
//! delivery and process-wide tracing setup. Core services depend only on the
//! traits in `apex_core`; this crate supplies the implementations and wires
//! them together.
//!
//! ## Modules
//!
//! - **Database**: MySQL repositories using SQLx
//! - **Email**: OTP email delivery (SMTP via lettre, or a logging mock)
//! - **Telemetry**: `tracing-subscriber` initialisation
//! - **Bootstrap**: service container assembled from `AppConfig`
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use apex_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery module
pub mod email;

/// Tracing subscriber setup
pub mod telemetry;

/// Service container wiring
pub mod bootstrap;

pub use bootstrap::AppServices;
pub use email::{create_email_sender, EmailSender, MockEmailSender, SmtpEmailSender};
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
