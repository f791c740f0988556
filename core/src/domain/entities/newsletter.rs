//! Newsletter subscriber entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Email address on the newsletter list
///
/// Unsubscribing only clears `is_active`, so a later subscribe reactivates
/// the same row instead of creating a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: Uuid,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
    pub is_active: bool,
}

impl NewsletterSubscriber {
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            subscribed_at: Utc::now(),
            is_active: true,
        }
    }

    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.subscribed_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
