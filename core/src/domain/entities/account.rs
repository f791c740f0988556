//! Account entity representing a registered gym member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered account, identified by a unique email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Normalized (trimmed, lowercased) email address
    pub email: String,

    pub first_name: String,

    pub last_name: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email address has been confirmed with an OTP
    pub is_verified: bool,

    /// Whether the account may log in
    pub is_active: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account that still needs email verification
    ///
    /// # Arguments
    ///
    /// * `email` - Normalized email address
    /// * `first_name` - Given name
    /// * `last_name` - Family name
    /// * `password_hash` - bcrypt hash of the chosen password
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            password_hash,
            is_verified: false,
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account as verified and active
    pub fn activate(&mut self) {
        self.is_verified = true;
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
