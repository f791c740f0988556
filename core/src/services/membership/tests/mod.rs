//! Unit tests for membership service

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::membership::MembershipTier;
use crate::errors::{DomainError, MembershipError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository, InMemoryMembershipRepository};
use crate::services::membership::MembershipService;

async fn setup() -> (MembershipService<InMemoryMembershipRepository, InMemoryAccountRepository>, Account) {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let account = accounts
        .create(Account::new(
            "pat@example.com".to_string(),
            "Pat".to_string(),
            "Quinn".to_string(),
            "hash".to_string(),
        ))
        .await
        .unwrap();
    let service = MembershipService::new(Arc::new(InMemoryMembershipRepository::new()), accounts);
    (service, account)
}

#[tokio::test]
async fn test_join_creates_membership() {
    let (service, account) = setup().await;

    let joined = service.join(account.id, MembershipTier::Premium).await.unwrap();

    assert_eq!(joined.membership.tier, MembershipTier::Premium);
    assert_eq!(
        joined.message,
        "Welcome, Pat. You've successfully joined the membership!"
    );
    assert_eq!(
        service.get(account.id).await.unwrap().unwrap().id,
        joined.membership.id
    );
}

#[tokio::test]
async fn test_join_twice_is_rejected() {
    let (service, account) = setup().await;
    service.join(account.id, MembershipTier::Basic).await.unwrap();

    let result = service.join(account.id, MembershipTier::Vip).await;
    assert!(matches!(
        result,
        Err(DomainError::Membership(MembershipError::AlreadyMember))
    ));
}

#[tokio::test]
async fn test_join_unknown_account() {
    let (service, _account) = setup().await;

    let result = service.join(Uuid::new_v4(), MembershipTier::Basic).await;
    let error = result.unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(error.error_code(), "ACCOUNT_NOT_FOUND");
}

#[tokio::test]
async fn test_get_without_membership() {
    let (service, account) = setup().await;
    assert!(service.get(account.id).await.unwrap().is_none());
}
