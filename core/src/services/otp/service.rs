//! OTP issue-and-send and verification workflow

use std::sync::Arc;
use uuid::Uuid;

use apex_shared::email::mask_email;
use apex_shared::OtpConfig;

use crate::domain::entities::account::Account;
use crate::domain::entities::otp_record::{OtpPurpose, OtpRecord};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::OtpRepository;

use super::clock::Clock;
use super::codec::OtpCodec;
use super::store::OtpStore;
use super::traits::NotificationSender;
use super::types::{IssuedOtp, OtpMessage};

/// Issues codes by email and checks submitted codes
pub struct OtpService<R: OtpRepository, N: NotificationSender> {
    store: OtpStore<R>,
    codec: OtpCodec,
    sender: Arc<N>,
    config: OtpConfig,
}

impl<R: OtpRepository, N: NotificationSender> OtpService<R, N> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `repository` - OTP record storage
    /// * `sender` - Email delivery
    /// * `clock` - Time source for issue and expiry
    /// * `config` - Step, validity and window settings
    pub fn new(repository: Arc<R>, sender: Arc<N>, clock: Arc<dyn Clock>, config: OtpConfig) -> Self {
        Self {
            store: OtpStore::new(repository, clock, &config),
            codec: OtpCodec::from_config(&config),
            sender,
            config,
        }
    }

    pub fn store(&self) -> &OtpStore<R> {
        &self.store
    }

    pub fn codec(&self) -> &OtpCodec {
        &self.codec
    }

    /// Adjacent time steps accepted for a purpose
    pub fn window_for(&self, purpose: OtpPurpose) -> u64 {
        match purpose {
            OtpPurpose::AccountVerification => self.config.verification_window,
            OtpPurpose::PasswordReset => self.config.reset_window,
        }
    }

    /// Issue a fresh record for the account and email its code
    ///
    /// This method:
    /// 1. Replaces any pending record for the same purpose
    /// 2. Derives the current code from the new secret
    /// 3. Sends the code to the account's email address
    ///
    /// On delivery failure the new record stays in place; a later resend
    /// replaces it.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedOtp)` - Record stored and message accepted by the provider
    /// * `Err(DomainError::Otp(OtpError::DeliveryFailure))` - Provider rejected the message
    pub async fn issue_and_send(&self, account: &Account, purpose: OtpPurpose) -> DomainResult<IssuedOtp> {
        let record = self.store.issue(account.id, purpose).await?;
        let code = self.codec.current_code(&record.secret, record.created_at)?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            purpose = %purpose,
            record_id = %record.id,
            event = "otp_generated",
            "Issued new OTP record"
        );

        let message = OtpMessage::compose(&account.first_name, &code, purpose, self.config.validity_minutes);
        let message_id = self
            .sender
            .send(&account.email, &message.subject, &message.body)
            .await
            .map_err(|reason| {
                tracing::error!(
                    account_id = %account.id,
                    email = %mask_email(&account.email),
                    purpose = %purpose,
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to send OTP email"
                );
                OtpError::DeliveryFailure { reason }
            })?;

        tracing::info!(
            account_id = %account.id,
            purpose = %purpose,
            message_id = %message_id,
            event = "otp_sent",
            "OTP email sent"
        );

        Ok(IssuedOtp {
            record_id: record.id,
            purpose,
            expires_at: record.expires_at(self.store.validity()),
            message_id,
        })
    }

    /// Check a submitted code against the newest pending record
    ///
    /// Expiry is decided before the code is compared, so an expired record
    /// reports `Expired` whatever was submitted. A successful check marks the
    /// record verified.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpRecord)` - The record that was consumed
    /// * `Err(OtpError::NoValidCode | Expired | InvalidCode)` - Check failed
    pub async fn verify(&self, account_id: Uuid, purpose: OtpPurpose, code: &str) -> DomainResult<OtpRecord> {
        let now = self.store.now();
        let mut record = self.store.current_unverified(account_id, purpose).await?;

        if self.store.is_expired(&record, now) {
            tracing::warn!(
                account_id = %account_id,
                purpose = %purpose,
                record_id = %record.id,
                event = "otp_expired",
                "OTP record expired"
            );
            return Err(OtpError::Expired.into());
        }

        let window = self.window_for(purpose);
        if !self.codec.verify(&record.secret, code, now, window)? {
            tracing::warn!(
                account_id = %account_id,
                purpose = %purpose,
                record_id = %record.id,
                event = "otp_invalid",
                "Submitted OTP did not match"
            );
            return Err(OtpError::InvalidCode.into());
        }

        self.store.mark_verified(&mut record).await?;

        tracing::info!(
            account_id = %account_id,
            purpose = %purpose,
            record_id = %record.id,
            event = "otp_verified",
            "OTP verified"
        );

        Ok(record)
    }
}
