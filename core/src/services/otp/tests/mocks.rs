//! Mock notification sender for testing OTP flows

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::services::otp::NotificationSender;

/// A message captured by the mock sender
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

// Mock email sender for testing
pub struct MockNotificationSender {
    pub sent: Mutex<Vec<SentMessage>>,
    pub should_fail: AtomicBool,
}

impl MockNotificationSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(should_fail),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_message(&self) -> Option<SentMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Code contained in the most recent message to `recipient`
    pub fn last_code_for(&self, recipient: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.recipient == recipient)
            .and_then(|m| extract_code(&m.body))
    }
}

/// Pull the digits following "Your OTP code is " out of a message body
pub fn extract_code(body: &str) -> Option<String> {
    let start = body.find("Your OTP code is ")? + "Your OTP code is ".len();
    let code: String = body[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMTP connection refused".to_string());
        }
        self.sent.lock().unwrap().push(SentMessage {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}
