//! Authentication configuration: JWT issuance and password hashing

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// bcrypt accepts costs in this range
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens (HS256)
    pub secret: String,

    /// Access token expiry in minutes
    pub access_token_minutes: i64,

    /// Refresh token expiry in days
    pub refresh_token_days: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_minutes: 15,
            refresh_token_days: 7,
            issuer: String::from("apex-gym"),
            audience: String::from("apex-gym-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_days = days;
        self
    }

    /// Secret is blank or the built-in development value
    pub fn has_placeholder_secret(&self) -> bool {
        self.secret.trim().is_empty() || self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// bcrypt cost factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Check values the hashing and signing code cannot work with
    pub fn validate(&self, require_real_secret: bool) -> Result<(), String> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(format!(
                "auth.bcrypt_cost must be between {} and {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST
            ));
        }
        if require_real_secret && self.jwt.has_placeholder_secret() {
            return Err("auth.jwt.secret must be set (APEX__AUTH__JWT__SECRET)".to_string());
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    12
}
