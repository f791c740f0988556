//! Types for OTP issue results and outbound messages

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpPurpose;

/// Result of issuing and sending a code
///
/// The code itself is deliberately absent; it only travels in the message.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// ID of the stored record
    pub record_id: Uuid,
    pub purpose: OtpPurpose,
    /// When the record stops verifying
    pub expires_at: DateTime<Utc>,
    /// Message ID from the delivery provider
    pub message_id: String,
}

/// Subject and body of an OTP email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpMessage {
    pub subject: String,
    pub body: String,
}

impl OtpMessage {
    /// Compose the message for a freshly issued code
    pub fn compose(first_name: &str, code: &str, purpose: OtpPurpose, validity_minutes: i64) -> Self {
        Self {
            subject: format!("Your OTP Code for {}", purpose.label()),
            body: format!(
                "Hi {},\n\nYour OTP code is {}. It is valid for {} minutes.",
                first_name, code, validity_minutes
            ),
        }
    }
}
