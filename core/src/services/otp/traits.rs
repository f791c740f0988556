//! Traits for outbound notification delivery

use async_trait::async_trait;

/// Delivers OTP messages to account holders
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send a message to `recipient`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Provider message ID
    /// * `Err(String)` - Provider error description
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String>;
}
