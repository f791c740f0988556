//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT issuance and password hashing
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email delivery for OTP notifications
//! - `environment` - Deployment environment detection
//! - `logging` - Tracing output settings
//! - `otp` - One-time password step, validity and tolerance windows
//! - `rate_limit` - Per-email throttles on credential and OTP operations

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod logging;
pub mod otp;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use rate_limit::{ActionLimit, RateLimitConfig};

/// Prefix for environment variable overrides (`APEX__OTP__VALIDITY_MINUTES=15`)
pub const ENV_PREFIX: &str = "APEX";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Error raised while assembling the layered configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Invalid(String),

    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// One-time password configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Throttles on login and OTP operations
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            otp: OtpConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/apex_gym_dev"),
            otp: OtpConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    ///
    /// The JWT secret and SMTP host are left blank; `validate` rejects the
    /// preset until both are supplied through a config file or `APEX__*`
    /// variables.
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://prod-db:3306/apex_gym").with_max_connections(50),
            otp: OtpConfig::default(),
            auth: AuthConfig {
                jwt: JwtConfig::new(""),
                ..Default::default()
            },
            email: EmailConfig {
                provider: EmailProvider::Smtp,
                ..Default::default()
            },
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Preset for an environment, before file and env overrides
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load configuration: environment preset, then `config/<env>.toml` if present,
    /// then `APEX__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = Environment::from_env();
        let preset = config::Config::try_from(&Self::for_environment(env))?;

        let settings = config::Config::builder()
            .add_source(preset)
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations the services cannot run with
    ///
    /// Production additionally requires a real JWT secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate().map_err(ConfigError::Invalid)?;
        self.auth
            .validate(self.environment.is_production())
            .map_err(ConfigError::Invalid)?;
        self.email.validate().map_err(ConfigError::Invalid)?;
        self.rate_limit.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.otp.step_seconds, 600);
        assert_eq!(config.otp.validity_minutes, 10);
    }

    fn deployable_production() -> AppConfig {
        let mut config = AppConfig::production();
        config.auth.jwt = JwtConfig::new("a-real-secret");
        config.email.smtp_host = "smtp.apexgym.com".to_string();
        config
    }

    #[test]
    fn test_production_preset_needs_overrides() {
        let err = AppConfig::production().validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(deployable_production().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_placeholder_secrets() {
        let mut config = deployable_production();
        config.auth.jwt = JwtConfig::default();
        assert!(config.validate().unwrap_err().to_string().contains("jwt.secret"));

        config.auth.jwt = JwtConfig::new("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smtp_without_host_rejected() {
        let mut config = deployable_production();
        config.email.smtp_host.clear();
        assert!(config.validate().unwrap_err().to_string().contains("smtp_host"));
    }

    #[test]
    fn test_invalid_bcrypt_cost_rejected() {
        let mut config = AppConfig::development();
        config.auth.bcrypt_cost = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_staging_preset() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = AppConfig::development();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.database.url, config.database.url);
        assert_eq!(parsed.otp.verification_window, 1);
    }
}
