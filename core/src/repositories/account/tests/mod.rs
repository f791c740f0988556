//! Unit tests for the in-memory account repository

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};
use crate::repositories::account::{AccountRepository, InMemoryAccountRepository};

fn account(email: &str) -> Account {
    Account::new(email.to_string(), "Sam".into(), "Lee".into(), "hash".into())
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryAccountRepository::new();
    let created = repo.create(account("sam@example.com")).await.unwrap();

    let by_email = repo.find_by_email("sam@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert!(repo.find_by_id(created.id).await.unwrap().is_some());
    assert!(repo.exists_by_email("sam@example.com").await.unwrap());
    assert!(!repo.exists_by_email("other@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = InMemoryAccountRepository::new();
    repo.create(account("sam@example.com")).await.unwrap();

    let result = repo.create(account("sam@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_update_persists_changes() {
    let repo = InMemoryAccountRepository::new();
    let mut created = repo.create(account("sam@example.com")).await.unwrap();

    created.activate();
    repo.update(created.clone()).await.unwrap();

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(stored.is_verified && stored.is_active);
}

#[tokio::test]
async fn test_update_unknown_account() {
    let repo = InMemoryAccountRepository::new();
    let result = repo.update(account("ghost@example.com")).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
