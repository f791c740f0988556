//! OTP record lifecycle on top of an `OtpRepository`

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use apex_shared::OtpConfig;

use crate::domain::entities::otp_record::{OtpPurpose, OtpRecord};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::OtpRepository;

use super::clock::Clock;
use super::codec::OtpCodec;

/// Issues, looks up and retires OTP records
///
/// Guarantees that after `issue` returns, the new record is the only
/// unverified one for its `(account, purpose)` pair.
pub struct OtpStore<R: OtpRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    validity: Duration,
}

impl<R: OtpRepository> OtpStore<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, config: &OtpConfig) -> Self {
        Self {
            repository,
            clock,
            validity: Duration::minutes(config.validity_minutes),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Replace any unverified record for the pair with a fresh one
    pub async fn issue(&self, account_id: Uuid, purpose: OtpPurpose) -> DomainResult<OtpRecord> {
        let record = OtpRecord::new(
            account_id,
            purpose,
            OtpCodec::generate_secret(),
            self.clock.now(),
        );
        self.repository.replace_unverified(record).await
    }

    /// The newest unverified record for the pair
    ///
    /// # Returns
    ///
    /// * `Err(OtpError::NoValidCode)` - Nothing is pending
    pub async fn current_unverified(
        &self,
        account_id: Uuid,
        purpose: OtpPurpose,
    ) -> DomainResult<OtpRecord> {
        self.repository
            .find_latest_unverified(account_id, purpose)
            .await?
            .ok_or_else(|| OtpError::NoValidCode.into())
    }

    pub fn is_expired(&self, record: &OtpRecord, now: DateTime<Utc>) -> bool {
        record.is_expired(now, self.validity)
    }

    /// Flag a record as used so it can never verify again
    ///
    /// # Returns
    ///
    /// * `Err(OtpError::InvalidCode)` - Another verification used the record first
    pub async fn mark_verified(&self, record: &mut OtpRecord) -> DomainResult<()> {
        if !self.repository.mark_verified(record).await? {
            return Err(OtpError::InvalidCode.into());
        }
        record.mark_verified();
        Ok(())
    }
}
