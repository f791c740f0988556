//! OTP repository trait defining the interface for OTP record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpPurpose, OtpRecord};
use crate::errors::DomainError;

/// Repository trait for OTP record persistence
///
/// Records of different purposes never interact: every query is scoped to an
/// `(account_id, purpose)` pair. At most one unverified record per pair should
/// exist once `replace_unverified` has returned.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Insert a new record
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Delete every unverified record for the account and purpose
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records removed
    async fn delete_unverified(
        &self,
        account_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<u64, DomainError>;

    /// Delete prior unverified records and insert `record` in their place
    ///
    /// The default runs the two steps one after the other. Implementations
    /// that can make the pair atomic should override it, so two concurrent
    /// issues for the same pair cannot both leave a record behind.
    async fn replace_unverified(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.delete_unverified(record.account_id, record.purpose)
            .await?;
        self.create(record).await
    }

    /// Find the most recently created unverified record
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Newest unverified record for the pair
    /// * `Ok(None)` - No unverified record exists
    async fn find_latest_unverified(
        &self,
        account_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Set the verified flag of a record that is still unverified
    ///
    /// # Returns
    /// * `Ok(true)` - Record was updated
    /// * `Ok(false)` - No such record, or it was already verified
    async fn mark_verified(&self, record: &OtpRecord) -> Result<bool, DomainError>;
}
