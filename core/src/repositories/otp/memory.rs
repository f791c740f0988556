//! In-memory implementation of OtpRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpPurpose, OtpRecord};
use crate::errors::DomainError;

use super::r#trait::OtpRepository;

type Key = (Uuid, OtpPurpose);

/// OTP records held in process memory, keyed by account and purpose
///
/// Each key keeps its records in insertion order, which breaks ties between
/// records created at the same instant.
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<HashMap<Key, Vec<OtpRecord>>>>,
    should_fail: AtomicBool,
}

impl InMemoryOtpRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make every following call fail with an internal error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// All records for the pair, verified ones included
    pub async fn records_for(&self, account_id: Uuid, purpose: OtpPurpose) -> Vec<OtpRecord> {
        let records = self.records.read().await;
        records
            .get(&(account_id, purpose))
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "OTP storage unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        records
            .entry((record.account_id, record.purpose))
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn delete_unverified(
        &self,
        account_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<u64, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        let Some(list) = records.get_mut(&(account_id, purpose)) else {
            return Ok(0);
        };
        let before = list.len();
        list.retain(|r| r.is_verified);
        Ok((before - list.len()) as u64)
    }

    async fn replace_unverified(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check()?;
        // Single write guard covers both the delete and the insert
        let mut records = self.records.write().await;
        let list = records
            .entry((record.account_id, record.purpose))
            .or_default();
        list.retain(|r| r.is_verified);
        list.push(record.clone());
        Ok(record)
    }

    async fn find_latest_unverified(
        &self,
        account_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.check()?;
        let records = self.records.read().await;
        let latest = records.get(&(account_id, purpose)).and_then(|list| {
            list.iter()
                .filter(|r| !r.is_verified)
                .fold(None::<&OtpRecord>, |best, r| match best {
                    Some(b) if b.created_at > r.created_at => Some(b),
                    _ => Some(r),
                })
                .cloned()
        });
        Ok(latest)
    }

    async fn mark_verified(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        let found = records
            .get_mut(&(record.account_id, record.purpose))
            .and_then(|list| list.iter_mut().find(|r| r.id == record.id && !r.is_verified));
        match found {
            Some(stored) => {
                stored.mark_verified();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
