//! Shared utilities and common types for the Apex Gym server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Input validation utilities (email normalisation, field checks)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ActionLimit, AppConfig, AuthConfig, ConfigError, DatabaseConfig, EmailConfig, EmailProvider,
    Environment, JwtConfig, LogFormat, LoggingConfig, OtpConfig, RateLimitConfig,
};
pub use utils::{email, validation};
pub use utils::validation::{FieldError, Validate, ValidationErrors};
