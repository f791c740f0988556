//! Newsletter service implementation

use std::sync::Arc;

use apex_shared::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::newsletter::NewsletterSubscriber;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::NewsletterRepository;

/// What `subscribe` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    Subscribed(NewsletterSubscriber),
    AlreadySubscribed(NewsletterSubscriber),
    Reactivated(NewsletterSubscriber),
}

impl SubscriptionOutcome {
    pub fn subscriber(&self) -> &NewsletterSubscriber {
        match self {
            SubscriptionOutcome::Subscribed(s)
            | SubscriptionOutcome::AlreadySubscribed(s)
            | SubscriptionOutcome::Reactivated(s) => s,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SubscriptionOutcome::Subscribed(_) => "Successfully subscribed to the newsletter!",
            SubscriptionOutcome::AlreadySubscribed(_) => {
                "This email is already subscribed to the newsletter."
            }
            SubscriptionOutcome::Reactivated(_) => "Welcome back! Your subscription is active again.",
        }
    }
}

/// Manages the newsletter list
pub struct NewsletterService<N: NewsletterRepository> {
    repository: Arc<N>,
}

impl<N: NewsletterRepository> NewsletterService<N> {
    pub fn new(repository: Arc<N>) -> Self {
        Self { repository }
    }

    fn parse_email(email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(email)
    }

    /// Add an email to the list, or reactivate it
    pub async fn subscribe(&self, email: &str) -> DomainResult<SubscriptionOutcome> {
        let email = Self::parse_email(email)?;

        let outcome = match self.repository.find_by_email(&email).await? {
            Some(existing) if existing.is_active => SubscriptionOutcome::AlreadySubscribed(existing),
            Some(mut existing) => {
                existing.reactivate();
                SubscriptionOutcome::Reactivated(self.repository.update(existing).await?)
            }
            None => {
                let subscriber = NewsletterSubscriber::new(email);
                SubscriptionOutcome::Subscribed(self.repository.create(subscriber).await?)
            }
        };

        tracing::info!(
            email = %mask_email(&outcome.subscriber().email),
            outcome = outcome.message(),
            event = "newsletter_subscribe",
            "Newsletter subscription processed"
        );

        Ok(outcome)
    }

    /// Remove an email from the list; the row is kept inactive
    pub async fn unsubscribe(&self, email: &str) -> DomainResult<NewsletterSubscriber> {
        let email = Self::parse_email(email)?;

        let mut subscriber = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "Newsletter subscription".to_string(),
            })?;

        subscriber.deactivate();
        let subscriber = self.repository.update(subscriber).await?;

        tracing::info!(
            email = %mask_email(&subscriber.email),
            event = "newsletter_unsubscribe",
            "Newsletter subscription deactivated"
        );

        Ok(subscriber)
    }
}
