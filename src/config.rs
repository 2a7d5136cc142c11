//! Host-side configuration for the reporter
//!
//! Job identifiers arrive per invocation from the orchestrator; these are
//! the knobs the hosting process sets once, from its environment.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Reporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URI of the plan/timeline backend.
    pub plan_uri: String,

    /// Base URI of the hub-specific status backend.
    pub hub_uri: String,

    /// Auth token the injected clients present to the backend.
    pub auth_token: String,

    /// Optional record-name filter. When set, timeline addressing switches
    /// from the job's subtree to every record matching this name.
    pub record_name: Option<String>,

    /// Logging settings
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plan_uri: "http://localhost:8080".to_string(),
            hub_uri: "http://localhost:8080".to_string(),
            auth_token: String::new(),
            record_name: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(uri) = env::var("PLAN_STATUS_PLAN_URI") {
            config.plan_uri = uri;
        }
        if let Ok(uri) = env::var("PLAN_STATUS_HUB_URI") {
            config.hub_uri = uri;
        }

        // Auth token (required)
        config.auth_token = env::var("PLAN_STATUS_TOKEN")
            .map_err(|_| ConfigError::Missing("PLAN_STATUS_TOKEN".to_string()))?;

        if let Ok(name) = env::var("PLAN_STATUS_RECORD_NAME") {
            if name.is_empty() {
                return Err(ConfigError::Invalid(
                    "PLAN_STATUS_RECORD_NAME cannot be empty".to_string(),
                ));
            }
            config.record_name = Some(name);
        }

        if let Ok(level) = env::var("PLAN_STATUS_LOG_LEVEL") {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plan_uri.is_empty() {
            return Err(ConfigError::Invalid("plan_uri cannot be empty".to_string()));
        }

        if self.hub_uri.is_empty() {
            return Err(ConfigError::Invalid("hub_uri cannot be empty".to_string()));
        }

        if self.auth_token.is_empty() {
            return Err(ConfigError::Invalid(
                "auth_token cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.plan_uri, "http://localhost:8080");
        assert!(config.record_name.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.auth_token = "test-token".to_string();
        assert!(config.validate().is_ok());

        config.auth_token = "".to_string();
        assert!(config.validate().is_err());

        config.auth_token = "token".to_string();
        config.plan_uri = "".to_string();
        assert!(config.validate().is_err());
    }
}
