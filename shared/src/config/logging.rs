//! Tracing output settings consumed by the infra telemetry setup

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event, for log shippers
    Json,
    /// Multi-line human output
    Pretty,
    /// Single-line human output
    Compact,
}

/// Subscriber settings
///
/// `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `info,apex_core=debug`
    pub level: String,

    #[serde(default = "LoggingConfig::default_format")]
    pub format: LogFormat,

    /// ANSI colors; ignored by the JSON format
    #[serde(default)]
    pub colored: bool,

    /// Attach file and line to each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    fn default_format() -> LogFormat {
        LogFormat::Compact
    }

    /// Verbose colored output locally, JSON once deployed
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: "debug,sqlx=warn".to_string(),
                format: LogFormat::Pretty,
                colored: true,
                source_location: true,
            },
            Environment::Staging | Environment::Production => Self {
                level: if env.is_production() { "info" } else { "debug" }.to_string(),
                format: LogFormat::Json,
                colored: false,
                source_location: false,
            },
        }
    }
}
