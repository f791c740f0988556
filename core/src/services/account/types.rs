//! Result types for account operations

use crate::domain::entities::account::Account;
use crate::services::otp::IssuedOtp;

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub struct Registration {
    /// The stored, still unverified account
    pub account: Account,
    /// The verification code that was emailed
    pub otp: IssuedOtp,
}
