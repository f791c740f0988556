//! OTP record entity: one issued secret bound to an account and a purpose.
//!
//! The code itself is never stored. It is derived from `secret` and the current
//! time step whenever it is sent or checked.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an OTP record authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Confirms ownership of the email address after registration
    AccountVerification,
    /// Authorizes setting a new password
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::AccountVerification => "account_verification",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }

    /// Human-readable label used in email subjects
    pub fn label(&self) -> &'static str {
        match self {
            OtpPurpose::AccountVerification => "Verification",
            OtpPurpose::PasswordReset => "Password Reset",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account_verification" => Ok(OtpPurpose::AccountVerification),
            "password_reset" => Ok(OtpPurpose::PasswordReset),
            other => Err(format!("Unknown OTP purpose: {}", other)),
        }
    }
}

/// Issued OTP secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Account the record belongs to
    pub account_id: Uuid,

    pub purpose: OtpPurpose,

    /// Base32 TOTP secret
    #[serde(skip_serializing)]
    pub secret: String,

    /// Issue time; starts the validity window
    pub created_at: DateTime<Utc>,

    /// Set once the code has been accepted
    pub is_verified: bool,
}

impl OtpRecord {
    /// Creates a new unverified record
    ///
    /// # Arguments
    ///
    /// * `account_id` - Owner of the record
    /// * `purpose` - Flow the record authorizes
    /// * `secret` - Freshly generated base32 secret
    /// * `created_at` - Issue time as seen by the service clock
    pub fn new(
        account_id: Uuid,
        purpose: OtpPurpose,
        secret: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            purpose,
            secret,
            created_at,
            is_verified: false,
        }
    }

    /// Instant after which the record no longer verifies
    pub fn expires_at(&self, validity: Duration) -> DateTime<Utc> {
        self.created_at + validity
    }

    /// Whether more than `validity` has elapsed since issue
    ///
    /// The boundary instant itself is still valid.
    pub fn is_expired(&self, now: DateTime<Utc>, validity: Duration) -> bool {
        now > self.expires_at(validity)
    }

    pub fn mark_verified(&mut self) {
        self.is_verified = true;
    }
}
