//! Account service implementation

use std::sync::Arc;

use apex_shared::email::{mask_email, normalize_email};
use apex_shared::Validate;

use crate::domain::entities::account::Account;
use crate::domain::entities::otp_record::OtpPurpose;
use crate::errors::{AuthError, DomainResult, OtpError, ValidationError};
use crate::repositories::{AccountRepository, OtpRepository};
use crate::services::otp::{IssuedOtp, NotificationSender, OtpService};
use crate::services::rate_limit::{RateLimiter, ThrottledAction};

use super::inputs::{PasswordResetConfirmation, RegistrationInput};
use super::password::PasswordHasher;
use super::types::Registration;

/// Registration, verification and password reset for accounts
pub struct AccountService<A, O, N>
where
    A: AccountRepository,
    O: OtpRepository,
    N: NotificationSender,
{
    accounts: Arc<A>,
    otp: Arc<OtpService<O, N>>,
    hasher: PasswordHasher,
    limiter: Arc<dyn RateLimiter>,
}

impl<A, O, N> AccountService<A, O, N>
where
    A: AccountRepository,
    O: OtpRepository,
    N: NotificationSender,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account storage
    /// * `otp` - OTP issue and verification workflow
    /// * `hasher` - Password hashing
    /// * `limiter` - Throttle for verification and reset attempts
    pub fn new(
        accounts: Arc<A>,
        otp: Arc<OtpService<O, N>>,
        hasher: PasswordHasher,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            accounts,
            otp,
            hasher,
            limiter,
        }
    }

    /// Count an attempt against the normalized email
    async fn throttle(&self, action: ThrottledAction, email: &str) -> DomainResult<()> {
        self.limiter.check(action, &normalize_email(email)).await
    }

    async fn find_account(&self, email: &str) -> DomainResult<Account> {
        self.accounts
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| OtpError::AccountNotFound.into())
    }

    /// Register a new, unverified account and email it a verification code
    ///
    /// This method:
    /// 1. Validates the input and normalizes the email
    /// 2. Rejects emails that are already registered
    /// 3. Stores the account as unverified and inactive
    /// 4. Issues and sends an account verification code
    ///
    /// If sending fails the account stays registered; the caller can use
    /// `resend_verification` afterwards.
    ///
    /// # Returns
    ///
    /// * `Ok(Registration)` - Account stored and code sent
    /// * `Err(DomainError::ValidationErr)` - Input rejected
    /// * `Err(AuthError::EmailAlreadyRegistered)` - Email is taken
    /// * `Err(OtpError::DeliveryFailure)` - Code could not be sent
    pub async fn register(&self, input: RegistrationInput) -> DomainResult<Registration> {
        input.validate().map_err(ValidationError::from)?;

        let email = normalize_email(&input.email);
        if self.accounts.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let account = Account::new(
            email,
            input.first_name.trim().to_string(),
            input.last_name.trim().to_string(),
            password_hash,
        );
        let account = self.accounts.create(account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "account_registered",
            "Registered new account"
        );

        let otp = self
            .otp
            .issue_and_send(&account, OtpPurpose::AccountVerification)
            .await?;

        Ok(Registration { account, otp })
    }

    /// Verify an account with the emailed code
    ///
    /// Checks run in this order: attempt throttle, unknown account, already
    /// verified, no pending record, expired record, wrong code.
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The account, now verified and active
    /// * `Err(AuthError::RateLimited)` - Too many attempts for this email
    /// * `Err(OtpError)` - The first failing check
    pub async fn verify_account(&self, email: &str, code: &str) -> DomainResult<Account> {
        self.throttle(ThrottledAction::VerifyAccount, email).await?;

        let mut account = self.find_account(email).await?;

        if account.is_verified {
            return Err(OtpError::AlreadyVerified.into());
        }

        self.otp
            .verify(account.id, OtpPurpose::AccountVerification, code)
            .await?;

        account.activate();
        let account = self.accounts.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "account_verified",
            "Account verified"
        );

        Ok(account)
    }

    /// Issue and send a new verification code, replacing any pending one
    pub async fn resend_verification(&self, email: &str) -> DomainResult<IssuedOtp> {
        self.throttle(ThrottledAction::ResendVerification, email).await?;

        let account = self.find_account(email).await?;

        if account.is_verified {
            return Err(OtpError::AlreadyVerified.into());
        }

        self.otp
            .issue_and_send(&account, OtpPurpose::AccountVerification)
            .await
    }

    /// Issue and send a password reset code
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<IssuedOtp> {
        self.throttle(ThrottledAction::RequestPasswordReset, email).await?;

        let account = self.find_account(email).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "password_reset_requested",
            "Password reset requested"
        );

        self.otp
            .issue_and_send(&account, OtpPurpose::PasswordReset)
            .await
    }

    /// Set a new password after checking the reset code
    ///
    /// The new password is validated and hashed before the code is checked,
    /// so a rejected password or a hashing failure never consumes the code.
    pub async fn confirm_password_reset(
        &self,
        input: PasswordResetConfirmation,
    ) -> DomainResult<Account> {
        self.throttle(ThrottledAction::ConfirmPasswordReset, &input.email)
            .await?;
        input.validate().map_err(ValidationError::from)?;

        let mut account = self.find_account(&input.email).await?;
        let password_hash = self.hasher.hash(&input.new_password)?;

        self.otp
            .verify(account.id, OtpPurpose::PasswordReset, &input.code)
            .await?;

        account.set_password_hash(password_hash);
        let account = self.accounts.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "password_reset",
            "Password reset completed"
        );

        Ok(account)
    }
}
