//! MySQL implementation of the NewsletterRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use apex_core::domain::entities::newsletter::NewsletterSubscriber;
use apex_core::errors::DomainError;
use apex_core::repositories::NewsletterRepository;

use super::{db_error, is_duplicate_key};

pub struct MySqlNewsletterRepository {
    pool: MySqlPool,
}

impl MySqlNewsletterRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_subscriber(row: &sqlx::mysql::MySqlRow) -> Result<NewsletterSubscriber, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(NewsletterSubscriber {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid subscriber UUID: {}", e) })?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?,
            subscribed_at: row
                .try_get::<DateTime<Utc>, _>("subscribed_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get subscribed_at: {}", e) })?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_active: {}", e) })?,
        })
    }
}

#[async_trait]
impl NewsletterRepository for MySqlNewsletterRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<NewsletterSubscriber>, DomainError> {
        let query = r#"
            SELECT id, email, subscribed_at, is_active
            FROM newsletter_subscribers
            WHERE email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find newsletter subscriber"))?;

        row.as_ref().map(Self::row_to_subscriber).transpose()
    }

    async fn create(&self, subscriber: NewsletterSubscriber) -> Result<NewsletterSubscriber, DomainError> {
        let query = r#"
            INSERT INTO newsletter_subscribers (id, email, subscribed_at, is_active)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(subscriber.id.to_string())
            .bind(&subscriber.email)
            .bind(subscriber.subscribed_at)
            .bind(subscriber.is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DomainError::Validation {
                        message: format!("Subscriber {} already exists", subscriber.email),
                    }
                } else {
                    DomainError::Internal { message: format!("Failed to create subscriber: {}", e) }
                }
            })?;

        Ok(subscriber)
    }

    async fn update(&self, subscriber: NewsletterSubscriber) -> Result<NewsletterSubscriber, DomainError> {
        let query = r#"
            UPDATE newsletter_subscribers
            SET subscribed_at = ?, is_active = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(subscriber.subscribed_at)
            .bind(subscriber.is_active)
            .bind(subscriber.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update subscriber"))?;

        if result.rows_affected() == 0 && self.find_by_email(&subscriber.email).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("Newsletter subscriber {}", subscriber.email),
            });
        }

        Ok(subscriber)
    }
}
