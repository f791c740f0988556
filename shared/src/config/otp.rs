//! One-time password configuration
//!
//! The 600-second time step is part of the observable code validity period and
//! must stay in sync with every client that already holds issued codes.

use serde::{Deserialize, Serialize};

/// Default TOTP time step in seconds
pub const DEFAULT_STEP_SECONDS: u64 = 600;

/// Default validity window of an issued record, in minutes
pub const DEFAULT_VALIDITY_MINUTES: i64 = 10;

/// Default number of digits in a code
pub const DEFAULT_DIGITS: u32 = 6;

/// OTP codec and store configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Length of one TOTP time step in seconds
    #[serde(default = "default_step_seconds")]
    pub step_seconds: u64,

    /// Minutes after creation during which a record may be verified
    #[serde(default = "default_validity_minutes")]
    pub validity_minutes: i64,

    /// Number of digits in generated codes
    #[serde(default = "default_digits")]
    pub digits: u32,

    /// Adjacent steps accepted when verifying an account
    #[serde(default = "default_verification_window")]
    pub verification_window: u64,

    /// Adjacent steps accepted when confirming a password reset
    #[serde(default)]
    pub reset_window: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            step_seconds: default_step_seconds(),
            validity_minutes: default_validity_minutes(),
            digits: default_digits(),
            verification_window: default_verification_window(),
            reset_window: 0,
        }
    }
}

impl OtpConfig {
    /// Check the values are usable by the codec
    pub fn validate(&self) -> Result<(), String> {
        if self.step_seconds == 0 {
            return Err("otp.step_seconds must be greater than zero".to_string());
        }
        if self.validity_minutes <= 0 {
            return Err("otp.validity_minutes must be greater than zero".to_string());
        }
        if !(6..=8).contains(&self.digits) {
            return Err("otp.digits must be between 6 and 8".to_string());
        }
        Ok(())
    }
}

fn default_step_seconds() -> u64 {
    DEFAULT_STEP_SECONDS
}

fn default_validity_minutes() -> i64 {
    DEFAULT_VALIDITY_MINUTES
}

fn default_digits() -> u32 {
    DEFAULT_DIGITS
}

fn default_verification_window() -> u64 {
    1
}
