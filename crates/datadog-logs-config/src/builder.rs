// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Loads the log sources of every integration config found in a conf.d directory.
//!
//! ```text
//!   conf.d/*.yaml ──> parse ──> validate source ──> compile rules ──> tags payload
//!                                                                        │
//!                                       Registry[LOGS_RULES] <── aggregate
//! ```
//!
//! Loading is all-or-nothing: the first parse or validation error is returned and
//! the registry is left untouched.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::{
    providers::{Format, Yaml},
    Figment,
};
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::integration_config::{IntegrationConfig, LogSource};
use crate::registry::{Registry, LOGS_RULES};

/// Extension of the integration config files.
pub const INTEGRATION_CONFIG_EXTENSION: &str = "yaml";

/// Base name of the former logs-agent config file, which can still sit in conf.d
/// but does not describe an integration.
pub const DEFAULT_DEPRECATED_CONFIG: &str = "datadog";

/// Lists the integration configs available in `confd_path`.
///
/// Returns the base names (without extension) of the `.yaml` files, sorted by file
/// name, skipping `deprecated_config`. A missing directory yields no configs; any
/// other listing failure is returned.
pub fn available_integration_configs(
    confd_path: &Path,
    deprecated_config: &str,
) -> Result<Vec<String>, ConfigError> {
    let entries = match std::fs::read_dir(confd_path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Integration configs directory {} does not exist, no log source configured",
                confd_path.display()
            );
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ConfigError::ReadDir {
                path: confd_path.to_path_buf(),
                source,
            })
        }
    };

    let mut file_names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConfigError::ReadDir {
            path: confd_path.to_path_buf(),
            source,
        })?;
        // Follows symlinks, conf.d entries are often links to packaged configs.
        if !entry.path().is_file() {
            debug!("Skipping {}, not a regular file", entry.path().display());
            continue;
        }
        match entry.file_name().into_string() {
            Ok(file_name) => file_names.push(file_name),
            Err(file_name) => debug!("Skipping non UTF-8 file name {:?}", file_name),
        }
    }
    file_names.sort();

    Ok(file_names
        .into_iter()
        .filter_map(|file_name| {
            let (name, extension) = file_name.rsplit_once('.')?;
            (extension == INTEGRATION_CONFIG_EXTENSION && name != deprecated_config)
                .then(|| name.to_string())
        })
        .collect())
}

/// Parses one integration config file.
///
/// The file is read at exactly `path`: a missing file or a directory is an error.
pub fn parse_integration_config(path: &Path) -> Result<IntegrationConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    Figment::new()
        .merge(Yaml::string(&contents))
        .extract::<IntegrationConfig>()
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
}

/// Builds the log sources of the logs agent from a conf.d directory.
#[derive(Clone, Debug)]
pub struct LogsConfigBuilder {
    confd_path: PathBuf,
    deprecated_config: String,
}

impl LogsConfigBuilder {
    #[must_use]
    pub fn new(confd_path: impl Into<PathBuf>) -> Self {
        Self {
            confd_path: confd_path.into(),
            deprecated_config: DEFAULT_DEPRECATED_CONFIG.to_string(),
        }
    }

    /// Overrides the base name of the config file skipped during discovery.
    #[must_use]
    pub fn with_deprecated_config(mut self, deprecated_config: impl Into<String>) -> Self {
        self.deprecated_config = deprecated_config.into();
        self
    }

    #[must_use]
    pub fn confd_path(&self) -> &Path {
        &self.confd_path
    }

    pub fn discover(&self) -> Result<Vec<String>, ConfigError> {
        available_integration_configs(&self.confd_path, &self.deprecated_config)
    }

    /// Parses and validates every integration config, without publishing anything.
    ///
    /// Sources are returned in file order, then in declaration order within a file.
    pub fn load(&self) -> Result<Vec<Arc<LogSource>>, ConfigError> {
        let mut log_sources = Vec::new();

        for name in self.discover()? {
            let path = self
                .confd_path
                .join(format!("{name}.{INTEGRATION_CONFIG_EXTENSION}"));
            debug!("Loading integration config {}", path.display());

            let integration_config = parse_integration_config(&path)?;
            for config in integration_config.logs {
                let log_source = LogSource::try_from(config)?;
                debug!(
                    "Configured {} log source from {} with {} processing rule(s)",
                    log_source.kind,
                    name,
                    log_source.processing_rules.len()
                );
                log_sources.push(Arc::new(log_source));
            }
        }

        Ok(log_sources)
    }

    /// Loads the integration configs and stores the log sources in `registry` under
    /// [`LOGS_RULES`], replacing what a previous build stored there.
    pub fn build(&self, registry: &mut Registry) -> Result<(), ConfigError> {
        let log_sources = self.load()?;
        info!(
            "Loaded {} log source(s) from {}",
            log_sources.len(),
            self.confd_path.display()
        );
        registry.set(LOGS_RULES, log_sources);
        Ok(())
    }
}

/// Looks for all yaml configs in `confd_path` and stores the log sources they
/// declare in `registry`.
pub fn build_logs_agent_integrations_configs(
    registry: &mut Registry,
    confd_path: impl Into<PathBuf>,
) -> Result<(), ConfigError> {
    LogsConfigBuilder::new(confd_path).build(registry)
}
