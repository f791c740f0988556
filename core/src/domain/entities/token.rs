//! Token entities for JWT-based sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Account email at issue time
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Whether the account is verified
    pub is_verified: bool,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account's UUID
    /// * `email` - The account's email address
    /// * `is_verified` - Whether the account is verified
    /// * `lifetime` - How long the token stays valid
    /// * `issuer` / `audience` - Values checked on decode
    pub fn new_access_token(
        account_id: Uuid,
        email: &str,
        is_verified: bool,
        lifetime: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            is_verified,
        }
    }

    /// Gets the account ID from the claims
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token entity stored in the database
///
/// Only the SHA-256 hash of the opaque token handed to the client is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: Uuid,

    /// Account this token belongs to
    pub account_id: Uuid,

    /// Hashed token value
    pub token_hash: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked (logout)
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token valid for `lifetime`
    pub fn new(account_id: Uuid, token_hash: String, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            account_id,
            token_hash,
            created_at: now,
            expires_at: now + lifetime,
            is_revoked: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// A token is valid if it hasn't expired and hasn't been revoked
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            access_expires_in: access_lifetime.num_seconds(),
            refresh_expires_in: refresh_lifetime.num_seconds(),
        }
    }
}
