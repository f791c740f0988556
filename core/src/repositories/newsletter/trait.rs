//! Newsletter repository trait.

use async_trait::async_trait;

use crate::domain::entities::newsletter::NewsletterSubscriber;
use crate::errors::DomainError;

/// Repository trait for newsletter subscribers, unique by email
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    /// Find a subscriber by normalized email, active or not
    async fn find_by_email(&self, email: &str)
        -> Result<Option<NewsletterSubscriber>, DomainError>;

    async fn create(&self, subscriber: NewsletterSubscriber)
        -> Result<NewsletterSubscriber, DomainError>;

    async fn update(&self, subscriber: NewsletterSubscriber)
        -> Result<NewsletterSubscriber, DomainError>;
}
