//! Unit tests for the in-memory membership repository

use uuid::Uuid;

use crate::domain::entities::membership::{Membership, MembershipTier};
use crate::errors::{DomainError, MembershipError};
use crate::repositories::membership::{InMemoryMembershipRepository, MembershipRepository};

#[tokio::test]
async fn test_one_membership_per_account() {
    let repo = InMemoryMembershipRepository::new();
    let account_id = Uuid::new_v4();

    repo.create(Membership::new(account_id, MembershipTier::Basic)).await.unwrap();
    let second = repo.create(Membership::new(account_id, MembershipTier::Vip)).await;

    assert!(matches!(
        second,
        Err(DomainError::Membership(MembershipError::AlreadyMember))
    ));
    let stored = repo.find_by_account(account_id).await.unwrap().unwrap();
    assert_eq!(stored.tier, MembershipTier::Basic);
}
