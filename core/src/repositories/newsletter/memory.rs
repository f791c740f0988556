//! In-memory implementation of NewsletterRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::newsletter::NewsletterSubscriber;
use crate::errors::DomainError;

use super::r#trait::NewsletterRepository;

/// Subscribers held in process memory, keyed by email
pub struct InMemoryNewsletterRepository {
    subscribers: Arc<RwLock<HashMap<String, NewsletterSubscriber>>>,
}

impl InMemoryNewsletterRepository {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryNewsletterRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, DomainError> {
        let subscribers = self.subscribers.read().await;
        Ok(subscribers.get(email).cloned())
    }

    async fn create(
        &self,
        subscriber: NewsletterSubscriber,
    ) -> Result<NewsletterSubscriber, DomainError> {
        let mut subscribers = self.subscribers.write().await;

        if subscribers.contains_key(&subscriber.email) {
            return Err(DomainError::Validation {
                message: format!("Subscriber {} already exists", subscriber.email),
            });
        }

        subscribers.insert(subscriber.email.clone(), subscriber.clone());
        Ok(subscriber)
    }

    async fn update(
        &self,
        subscriber: NewsletterSubscriber,
    ) -> Result<NewsletterSubscriber, DomainError> {
        let mut subscribers = self.subscribers.write().await;

        match subscribers.get_mut(&subscriber.email) {
            Some(stored) => {
                *stored = subscriber.clone();
                Ok(subscriber)
            }
            None => Err(DomainError::NotFound {
                resource: format!("Newsletter subscriber {}", subscriber.email),
            }),
        }
    }
}
