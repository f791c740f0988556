//! Mock email sender
//!
//! Logs messages instead of sending them and keeps an in-memory outbox so
//! tests and local setups can read the delivered codes back.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use apex_core::services::NotificationSender;
use apex_shared::email::mask_email;

/// Messages kept in the outbox; older ones are dropped first
pub const OUTBOX_CAPACITY: usize = 256;

/// Message captured by the mock sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentEmail {
    pub message_id: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Mock email sender for development and testing
///
/// Clones share the counter, the outbox and the failure switch.
#[derive(Clone, Default)]
pub struct MockEmailSender {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    outbox: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Recent messages, oldest first, at most `OUTBOX_CAPACITY`
    pub fn outbox(&self) -> Vec<SentEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Most recent message sent to `recipient`
    pub fn last_sent_to(&self, recipient: &str) -> Option<SentEmail> {
        self.outbox()
            .into_iter()
            .rev()
            .find(|m| m.recipient == recipient)
    }

    /// Code from the most recent message sent to `recipient`
    pub fn last_code_for(&self, recipient: &str) -> Option<String> {
        self.last_sent_to(recipient)
            .and_then(|m| extract_code(&m.body))
    }
}

/// Pull the numeric code out of an OTP email body
pub fn extract_code(body: &str) -> Option<String> {
    let rest = body.split("Your OTP code is ").nth(1)?;
    let code: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

#[async_trait]
impl NotificationSender for MockEmailSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String> {
        let masked = mask_email(recipient);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                provider = "mock",
                recipient = %masked,
                "Mock email sender simulating failure"
            );
            return Err("Simulated email sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        let email = SentEmail {
            message_id: message_id.clone(),
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        let mut outbox = self.outbox.lock().unwrap_or_else(|e| e.into_inner());
        if outbox.len() == OUTBOX_CAPACITY {
            outbox.remove(0);
        }
        outbox.push(email);
        drop(outbox);

        info!(
            target: "email_service",
            provider = "mock",
            recipient = %masked,
            message_id = %message_id,
            subject = %subject,
            count,
            "Email sent successfully (mock)"
        );
        tracing::debug!(target: "email_service", body = %body, "Mock email body");

        Ok(message_id)
    }
}
