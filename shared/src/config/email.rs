//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email delivery backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// Relay through an SMTP server
    Smtp,
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery backend
    #[serde(default)]
    pub provider: EmailProvider,

    /// SMTP relay host
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP port (STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    #[serde(default)]
    pub smtp_username: String,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: String,

    /// Sender address, e.g. `Apex Gym <no-reply@apexgym.com>`
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// SMTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// The SMTP provider needs a relay host and a parseable sender
    pub fn validate(&self) -> Result<(), String> {
        if self.provider == EmailProvider::Smtp && self.smtp_host.trim().is_empty() {
            return Err("email.smtp_host is required when email.provider is smtp".to_string());
        }
        if self.from_address.trim().is_empty() {
            return Err("email.from_address must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    String::from("Apex Gym <no-reply@apexgym.com>")
}

fn default_timeout_secs() -> u64 {
    30
}
