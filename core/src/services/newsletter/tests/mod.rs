//! Unit tests for newsletter service

use std::sync::Arc;

use crate::errors::{DomainError, ValidationError};
use crate::repositories::InMemoryNewsletterRepository;
use crate::services::newsletter::{NewsletterService, SubscriptionOutcome};

fn service() -> NewsletterService<InMemoryNewsletterRepository> {
    NewsletterService::new(Arc::new(InMemoryNewsletterRepository::new()))
}

#[tokio::test]
async fn test_subscribe_new_email() {
    let service = service();

    let outcome = service.subscribe(" Fan@Example.com ").await.unwrap();
    assert!(matches!(outcome, SubscriptionOutcome::Subscribed(_)));
    assert_eq!(outcome.subscriber().email, "fan@example.com");
    assert_eq!(outcome.message(), "Successfully subscribed to the newsletter!");
}

#[tokio::test]
async fn test_subscribe_twice() {
    let service = service();
    service.subscribe("fan@example.com").await.unwrap();

    let outcome = service.subscribe("FAN@example.com").await.unwrap();
    assert!(matches!(outcome, SubscriptionOutcome::AlreadySubscribed(_)));
}

#[tokio::test]
async fn test_unsubscribe_then_resubscribe() {
    let service = service();
    let first = service.subscribe("fan@example.com").await.unwrap();

    let removed = service.unsubscribe("fan@example.com").await.unwrap();
    assert!(!removed.is_active);

    let outcome = service.subscribe("fan@example.com").await.unwrap();
    assert!(matches!(outcome, SubscriptionOutcome::Reactivated(_)));
    assert_eq!(outcome.subscriber().id, first.subscriber().id);
    assert!(outcome.subscriber().is_active);
}

#[tokio::test]
async fn test_subscribe_validation() {
    let service = service();

    let empty = service.subscribe("   ").await;
    assert!(matches!(
        empty,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));

    let invalid = service.subscribe("fan-at-example.com").await;
    assert!(matches!(
        invalid,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
}

#[tokio::test]
async fn test_unsubscribe_unknown_email() {
    let service = service();
    let result = service.unsubscribe("nobody@example.com").await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
