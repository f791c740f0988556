//! Unit tests for the in-memory OTP repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpPurpose, OtpRecord};
use crate::repositories::otp::{InMemoryOtpRepository, OtpRepository};

fn record(account_id: Uuid, purpose: OtpPurpose, secret: &str) -> OtpRecord {
    OtpRecord::new(account_id, purpose, secret.to_string(), Utc::now())
}

#[tokio::test]
async fn test_replace_keeps_single_unverified_record() {
    let repo = InMemoryOtpRepository::new();
    let account_id = Uuid::new_v4();

    repo.replace_unverified(record(account_id, OtpPurpose::AccountVerification, "A"))
        .await
        .unwrap();
    let second = repo
        .replace_unverified(record(account_id, OtpPurpose::AccountVerification, "B"))
        .await
        .unwrap();

    let stored = repo.records_for(account_id, OtpPurpose::AccountVerification).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, second.id);
}

#[tokio::test]
async fn test_purposes_are_isolated() {
    let repo = InMemoryOtpRepository::new();
    let account_id = Uuid::new_v4();

    let verification = repo
        .replace_unverified(record(account_id, OtpPurpose::AccountVerification, "A"))
        .await
        .unwrap();
    repo.replace_unverified(record(account_id, OtpPurpose::PasswordReset, "B"))
        .await
        .unwrap();

    let latest = repo
        .find_latest_unverified(account_id, OtpPurpose::AccountVerification)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, verification.id);
}

#[tokio::test]
async fn test_verified_records_survive_replacement() {
    let repo = InMemoryOtpRepository::new();
    let account_id = Uuid::new_v4();

    let first = repo
        .create(record(account_id, OtpPurpose::PasswordReset, "A"))
        .await
        .unwrap();
    assert!(repo.mark_verified(&first).await.unwrap());
    assert!(!repo.mark_verified(&first).await.unwrap());

    repo.replace_unverified(record(account_id, OtpPurpose::PasswordReset, "B"))
        .await
        .unwrap();

    let stored = repo.records_for(account_id, OtpPurpose::PasswordReset).await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.iter().filter(|r| r.is_verified).count(), 1);
}

#[tokio::test]
async fn test_latest_prefers_newest_then_last_inserted() {
    let repo = InMemoryOtpRepository::new();
    let account_id = Uuid::new_v4();
    let now = Utc::now();

    let older = OtpRecord::new(account_id, OtpPurpose::PasswordReset, "OLD".into(), now - Duration::minutes(1));
    let tie_a = OtpRecord::new(account_id, OtpPurpose::PasswordReset, "A".into(), now);
    let tie_b = OtpRecord::new(account_id, OtpPurpose::PasswordReset, "B".into(), now);
    repo.create(tie_a).await.unwrap();
    repo.create(tie_b.clone()).await.unwrap();
    repo.create(older).await.unwrap();

    let latest = repo
        .find_latest_unverified(account_id, OtpPurpose::PasswordReset)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, tie_b.id);
}

#[tokio::test]
async fn test_delete_unverified_counts_removed() {
    let repo = InMemoryOtpRepository::new();
    let account_id = Uuid::new_v4();

    repo.create(record(account_id, OtpPurpose::AccountVerification, "A")).await.unwrap();
    repo.create(record(account_id, OtpPurpose::AccountVerification, "B")).await.unwrap();

    let removed = repo
        .delete_unverified(account_id, OtpPurpose::AccountVerification)
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert!(repo
        .find_latest_unverified(account_id, OtpPurpose::AccountVerification)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_failure_injection() {
    let repo = InMemoryOtpRepository::new();
    repo.set_should_fail(true);

    let result = repo
        .find_latest_unverified(Uuid::new_v4(), OtpPurpose::PasswordReset)
        .await;
    assert!(result.is_err());
}
