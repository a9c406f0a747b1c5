// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::PathBuf;

use datadog_logs_config::{ConfigError, DEFAULT_DEPRECATED_CONFIG};

pub const DEFAULT_CONFD_PATH: &str = "/etc/datadog-agent/conf.d";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors that stop the logs agent from starting
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load integration configs: {0}")]
    Load(#[from] ConfigError),
}

/// Settings of the logs agent process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Directory holding the integration configs
    pub confd_path: PathBuf,
    /// Base name of the config file skipped in the conf.d directory
    pub deprecated_config: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            confd_path: PathBuf::from(DEFAULT_CONFD_PATH),
            deprecated_config: DEFAULT_DEPRECATED_CONFIG.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AgentConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, AgentError> {
        let confd_path = env::var("DD_CONFD_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFD_PATH));
        let deprecated_config = env::var("DD_LOGS_DEPRECATED_CONFIG")
            .unwrap_or_else(|_| DEFAULT_DEPRECATED_CONFIG.to_string());
        let log_level = env::var("DD_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        let config = Self {
            confd_path,
            deprecated_config,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.confd_path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(AgentError::InvalidConfig(
                "DD_CONFD_PATH cannot be empty".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(AgentError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}
