//! Deployment environment selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variables consulted, in order, to pick the environment
const ENVIRONMENT_VARS: [&str; 2] = ["APEX_ENV", "ENVIRONMENT"];

/// Where the service is deployed; selects the configuration preset and
/// the `config/<environment>.toml` overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// Name used for config file lookups
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// First parseable value of `APEX_ENV` or `ENVIRONMENT`, else development
    pub fn from_env() -> Self {
        ENVIRONMENT_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find_map(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Unknown environment '{}'", other)),
        }
    }
}
