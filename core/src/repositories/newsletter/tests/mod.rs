//! Unit tests for the in-memory newsletter repository

use crate::domain::entities::newsletter::NewsletterSubscriber;
use crate::repositories::newsletter::{InMemoryNewsletterRepository, NewsletterRepository};

#[tokio::test]
async fn test_create_update_find() {
    let repo = InMemoryNewsletterRepository::new();
    let mut subscriber = repo
        .create(NewsletterSubscriber::new("fan@example.com".into()))
        .await
        .unwrap();

    assert!(repo
        .create(NewsletterSubscriber::new("fan@example.com".into()))
        .await
        .is_err());

    subscriber.deactivate();
    repo.update(subscriber).await.unwrap();

    let stored = repo.find_by_email("fan@example.com").await.unwrap().unwrap();
    assert!(!stored.is_active);
}
