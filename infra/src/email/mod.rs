//! Email Service Module
//!
//! Delivers OTP emails for the core services. Every implementation plugs into
//! `apex_core::services::NotificationSender`.
//!
//! ## Providers
//!
//! - **SMTP**: STARTTLS relay via lettre
//! - **Mock**: logs messages and keeps an outbox, for development and tests

pub mod mock_email;
pub mod smtp;

use async_trait::async_trait;

use apex_core::services::NotificationSender;
use apex_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub use mock_email::{MockEmailSender, SentEmail};
pub use smtp::SmtpEmailSender;


/// Email sender selected from configuration
///
/// Services are generic over their sender, so the factory returns this enum
/// rather than a trait object.
pub enum EmailSender {
    Mock(MockEmailSender),
    Smtp(SmtpEmailSender),
}

impl EmailSender {
    pub fn provider_name(&self) -> &'static str {
        match self {
            EmailSender::Mock(_) => "mock",
            EmailSender::Smtp(_) => "smtp",
        }
    }
}

#[async_trait]
impl NotificationSender for EmailSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String> {
        match self {
            EmailSender::Mock(sender) => sender.send(recipient, subject, body).await,
            EmailSender::Smtp(sender) => sender.send(recipient, subject, body).await,
        }
    }
}

/// Create an email sender based on configuration
///
/// The mock sender is only used when configured explicitly. An SMTP
/// configuration that cannot be turned into a transport is an error.
pub fn create_email_sender(config: &EmailConfig) -> Result<EmailSender, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::warn!("Using mock email sender; no email will be delivered");
            Ok(EmailSender::Mock(MockEmailSender::new()))
        }
        EmailProvider::Smtp => SmtpEmailSender::new(config)
            .map(EmailSender::Smtp)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to initialize SMTP email sender");
                e
            }),
    }
}
