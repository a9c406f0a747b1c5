// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use crate::integration_config::SourceKind;

/// Errors raised while loading the integration configs of a conf.d directory.
///
/// Any of these aborts the whole load: nothing is published to the registry
/// when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to list integration configs in {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read integration config {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse integration config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("A source must have a valid type (got {0})")]
    InvalidSourceType(String),

    #[error("A file source must have a path")]
    MissingPath,

    #[error("A {0} source must have a port")]
    MissingPort(SourceKind),

    #[error("LogsAgent misconfigured: all log processing rules need a name")]
    RuleMissingName,

    #[error("LogsAgent misconfigured: type must be set for log processing rule `{name}`")]
    RuleMissingType { name: String },

    #[error("LogsAgent misconfigured: type {kind} is unsupported for log processing rule `{name}`")]
    RuleUnsupportedType { kind: String, name: String },

    #[error("LogsAgent misconfigured: invalid pattern for log processing rule `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors returned by typed reads from the [`crate::registry::Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("No value registered under `{0}`, integration configs were not loaded")]
    NotLoaded(&'static str),

    #[error("Value registered under `{0}` does not have the expected type")]
    TypeMismatch(&'static str),
}
