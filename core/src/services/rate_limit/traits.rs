//! Rate limiting trait for throttled account operations

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Operations that are counted per email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrottledAction {
    Login,
    VerifyAccount,
    ResendVerification,
    RequestPasswordReset,
    ConfirmPasswordReset,
}

impl ThrottledAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrottledAction::Login => "login",
            ThrottledAction::VerifyAccount => "verify_account",
            ThrottledAction::ResendVerification => "resend_verification",
            ThrottledAction::RequestPasswordReset => "request_password_reset",
            ThrottledAction::ConfirmPasswordReset => "confirm_password_reset",
        }
    }
}

/// Counts attempts and refuses them once a window's allowance is spent
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one attempt at `action` by `identifier`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Attempt allowed and counted
    /// * `Err(AuthError::RateLimited)` - Allowance spent; the attempt is not counted
    async fn check(&self, action: ThrottledAction, identifier: &str) -> DomainResult<()>;
}
