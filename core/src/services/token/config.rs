//! Configuration for the token service

use apex_shared::JwtConfig;
use chrono::Duration;
use jsonwebtoken::Algorithm;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            access_token_expiry_minutes: config.access_token_minutes,
            refresh_token_expiry_days: config.refresh_token_days,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}

impl TokenServiceConfig {
    pub fn access_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    pub fn refresh_lifetime(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}
