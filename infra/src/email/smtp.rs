//! SMTP email sender built on lettre's async transport

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use apex_core::services::NotificationSender;
use apex_shared::email::mask_email;
use apex_shared::EmailConfig;

use crate::InfrastructureError;

/// Sends plain-text email through an SMTP relay (STARTTLS)
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Build the transport from configuration
    ///
    /// No connection is opened here; the first send connects.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if config.smtp_host.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "email.smtp_host is required for the smtp provider".to_string(),
            ));
        }

        let from: Mailbox = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid from address: {}", e))
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP email sender configured"
        );

        Ok(Self {
            mailer: builder.build(),
            from,
        })
    }

    fn build_message(&self, recipient: &str, subject: &str, body: &str) -> Result<Message, InfrastructureError> {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl NotificationSender for SmtpEmailSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String> {
        let message = self
            .build_message(recipient, subject, body)
            .map_err(|e| e.to_string())?;

        let response = self.mailer.send(message).await.map_err(|e| {
            tracing::error!(
                target: "email_service",
                provider = "smtp",
                recipient = %mask_email(recipient),
                error = %e,
                "SMTP delivery failed"
            );
            InfrastructureError::Email(e.to_string()).to_string()
        })?;

        // The relay's reply text usually carries its queue id
        let message_id = response
            .message()
            .next()
            .map(|line| line.to_string())
            .unwrap_or_else(|| response.code().to_string());

        tracing::info!(
            target: "email_service",
            provider = "smtp",
            recipient = %mask_email(recipient),
            message_id = %message_id,
            "Email sent successfully"
        );

        Ok(message_id)
    }
}
