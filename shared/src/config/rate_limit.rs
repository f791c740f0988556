//! Throttling configuration for the credential and OTP operations
//!
//! Each throttled action gets its own fixed window, counted per email.

use serde::{Deserialize, Serialize};

/// Longest window accepted, one day
pub const MAX_WINDOW_SECONDS: u64 = 24 * 60 * 60;

/// Attempts allowed for one action within one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionLimit {
    /// Attempts allowed per window
    pub max_attempts: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl ActionLimit {
    pub const fn new(max_attempts: u32, window_seconds: u64) -> Self {
        Self {
            max_attempts,
            window_seconds,
        }
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err(format!("rate_limit.{}.max_attempts must be greater than zero", name));
        }
        if self.window_seconds == 0 || self.window_seconds > MAX_WINDOW_SECONDS {
            return Err(format!(
                "rate_limit.{}.window_seconds must be between 1 and {}",
                name, MAX_WINDOW_SECONDS
            ));
        }
        Ok(())
    }
}

/// Per-action throttling limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Turn every throttle on or off
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Password login
    #[serde(default = "default_login")]
    pub login: ActionLimit,

    /// Account verification with an emailed code
    #[serde(default = "default_verify_account")]
    pub verify_account: ActionLimit,

    /// Requests for a new verification code
    #[serde(default = "default_resend_verification")]
    pub resend_verification: ActionLimit,

    /// Requests for a password reset code
    #[serde(default = "default_request_password_reset")]
    pub request_password_reset: ActionLimit,

    /// Password reset confirmation with a code
    #[serde(default = "default_confirm_password_reset")]
    pub confirm_password_reset: ActionLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            login: default_login(),
            verify_account: default_verify_account(),
            resend_verification: default_resend_verification(),
            request_password_reset: default_request_password_reset(),
            confirm_password_reset: default_confirm_password_reset(),
        }
    }
}

impl RateLimitConfig {
    /// Configuration with every throttle switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.login.validate("login")?;
        self.verify_account.validate("verify_account")?;
        self.resend_verification.validate("resend_verification")?;
        self.request_password_reset.validate("request_password_reset")?;
        self.confirm_password_reset.validate("confirm_password_reset")
    }
}

fn default_enabled() -> bool {
    true
}

fn default_login() -> ActionLimit {
    ActionLimit::new(10, 15 * 60)
}

// Window matches the 10 minute code lifetime
fn default_verify_account() -> ActionLimit {
    ActionLimit::new(5, 10 * 60)
}

fn default_resend_verification() -> ActionLimit {
    ActionLimit::new(3, 10 * 60)
}

fn default_request_password_reset() -> ActionLimit {
    ActionLimit::new(3, 60 * 60)
}

fn default_confirm_password_reset() -> ActionLimit {
    ActionLimit::new(5, 10 * 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_and_enabled() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert!(config.validate().is_ok());
        assert_eq!(config.verify_account, ActionLimit::new(5, 600));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = RateLimitConfig::default();
        config.login.max_attempts = 0;
        assert!(config.validate().unwrap_err().contains("rate_limit.login"));

        let mut config = RateLimitConfig::default();
        config.resend_verification.window_seconds = 0;
        assert!(config.validate().is_err());

        config.resend_verification.window_seconds = MAX_WINDOW_SECONDS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: RateLimitConfig =
            serde_json::from_str(r#"{"login": {"max_attempts": 3, "window_seconds": 60}}"#).unwrap();
        assert_eq!(config.login, ActionLimit::new(3, 60));
        assert_eq!(config.confirm_password_reset, ActionLimit::new(5, 600));
        assert!(config.enabled);
    }
}
