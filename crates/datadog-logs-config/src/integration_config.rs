// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Integration config files and the log sources they declare.
//!
//! Each `<integration>.yaml` file of the conf.d directory may declare log sources:
//!
//! ```yaml
//! logs:
//!   - type: file
//!     path: /var/log/nginx/access.log
//!     service: nginx
//!     source: nginx
//!     source_category: webserver
//!     tags: env:prod
//!   - type: tcp
//!     port: 10514
//! ```
//!
//! Files are parsed into [`IntegrationConfig`], then every declared
//! [`IntegrationConfigLogSource`] is validated into a [`LogSource`].

use std::fmt;

use serde::Deserialize;
use serde_aux::prelude::{deserialize_default_from_null, deserialize_number_from_string};

use crate::deserialize::deserialize_string_from_scalar;
use crate::error::ConfigError;
use crate::processing_rule::{validate_processing_rules, ProcessingRule, ProcessingRuleConfig};
use crate::tags_payload::build_tags_payload;

pub const FILE_TYPE: &str = "file";
pub const TCP_TYPE: &str = "tcp";
pub const UDP_TYPE: &str = "udp";

/// Shape of one integration config file. Only the logs part is read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub logs: Vec<IntegrationConfigLogSource>,
}

/// A log source as declared in an integration config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntegrationConfigLogSource {
    #[serde(rename = "type", deserialize_with = "deserialize_string_from_scalar")]
    pub kind: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub path: String,

    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub service: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub logset: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub source: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub source_category: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub tags: String,
    #[serde(
        rename = "log_processing_rules",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub processing_rules: Vec<ProcessingRuleConfig>,
}

/// Where the lines of a log source come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// A file to tail.
    File,
    /// A TCP port to listen to.
    Tcp,
    /// A UDP port to listen to.
    Udp,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::File => FILE_TYPE,
            SourceKind::Tcp => TCP_TYPE,
            SourceKind::Udp => UDP_TYPE,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated log source, ready to be handed to a tailer or a listener.
///
/// `path` is only meaningful for [`SourceKind::File`], `port` only for
/// [`SourceKind::Tcp`] and [`SourceKind::Udp`].
#[derive(Clone, Debug)]
pub struct LogSource {
    pub kind: SourceKind,
    pub port: u16,
    pub path: String,
    pub service: String,
    pub logset: String,
    pub source: String,
    pub source_category: String,
    pub tags: String,
    /// Annotation bytes inserted into each forwarded line, see [`build_tags_payload`].
    pub tags_payload: Vec<u8>,
    pub processing_rules: Vec<ProcessingRule>,
}

impl TryFrom<IntegrationConfigLogSource> for LogSource {
    type Error = ConfigError;

    fn try_from(config: IntegrationConfigLogSource) -> Result<Self, Self::Error> {
        let kind = validate_source(&config)?;
        let processing_rules = validate_processing_rules(config.processing_rules)?;
        let tags_payload = build_tags_payload(&config.tags, &config.source, &config.source_category);

        Ok(LogSource {
            kind,
            port: config.port,
            path: config.path,
            service: config.service,
            logset: config.logset,
            source: config.source,
            source_category: config.source_category,
            tags: config.tags,
            tags_payload,
            processing_rules,
        })
    }
}

/// Checks the type of a source and the field that type requires.
pub fn validate_source(config: &IntegrationConfigLogSource) -> Result<SourceKind, ConfigError> {
    let kind = match config.kind.as_str() {
        FILE_TYPE => SourceKind::File,
        TCP_TYPE => SourceKind::Tcp,
        UDP_TYPE => SourceKind::Udp,
        other => return Err(ConfigError::InvalidSourceType(other.to_string())),
    };

    match kind {
        SourceKind::File if config.path.is_empty() => Err(ConfigError::MissingPath),
        SourceKind::Tcp | SourceKind::Udp if config.port == 0 => {
            Err(ConfigError::MissingPort(kind))
        }
        _ => Ok(kind),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::processing_rule::RuleKind;

    fn source(kind: &str) -> IntegrationConfigLogSource {
        IntegrationConfigLogSource {
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_file_source() {
        let mut config = source(FILE_TYPE);
        assert!(matches!(
            validate_source(&config),
            Err(ConfigError::MissingPath)
        ));

        config.path = "/var/log/app.log".to_string();
        assert_eq!(validate_source(&config).unwrap(), SourceKind::File);
    }

    #[test]
    fn test_validate_network_sources() {
        for (kind, expected) in [(TCP_TYPE, SourceKind::Tcp), (UDP_TYPE, SourceKind::Udp)] {
            let mut config = source(kind);
            match validate_source(&config) {
                Err(ConfigError::MissingPort(k)) => assert_eq!(k, expected),
                other => panic!("expected missing port for {kind}, got {other:?}"),
            }

            config.port = 10514;
            assert_eq!(validate_source(&config).unwrap(), expected);
        }
    }

    #[test]
    fn test_network_source_ignores_path() {
        let mut config = source(TCP_TYPE);
        config.path = "/var/log/app.log".to_string();
        assert!(matches!(
            validate_source(&config),
            Err(ConfigError::MissingPort(SourceKind::Tcp))
        ));
    }

    #[test]
    fn test_validate_invalid_type() {
        for kind in ["", "syslog", "FILE"] {
            let err = validate_source(&source(kind)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidSourceType(ref got) if got == kind),
                "type {kind:?}"
            );
        }
    }

    #[test]
    fn test_try_from_builds_payload_and_rules() {
        let config = IntegrationConfigLogSource {
            kind: FILE_TYPE.to_string(),
            path: "/var/log/nginx/access.log".to_string(),
            service: "nginx".to_string(),
            source: "nginx".to_string(),
            source_category: "webserver".to_string(),
            tags: "env:prod".to_string(),
            processing_rules: vec![ProcessingRuleConfig {
                kind: "exclude_at_match".to_string(),
                name: "health".to_string(),
                pattern: "GET /health".to_string(),
                replace_placeholder: String::new(),
            }],
            ..Default::default()
        };

        let log_source = LogSource::try_from(config).unwrap();
        assert_eq!(log_source.kind, SourceKind::File);
        assert_eq!(log_source.service, "nginx");
        assert_eq!(
            log_source.tags_payload,
            br#"[dd ddsource="nginx"][dd ddsourcecategory="webserver"][dd ddtags="env:prod"]"#
        );
        assert_eq!(log_source.processing_rules.len(), 1);
        assert_eq!(log_source.processing_rules[0].kind, RuleKind::ExcludeAtMatch);
    }

    #[test]
    fn test_try_from_without_tags() {
        let config = IntegrationConfigLogSource {
            kind: UDP_TYPE.to_string(),
            port: 514,
            ..Default::default()
        };

        let log_source = LogSource::try_from(config).unwrap();
        assert_eq!(log_source.tags_payload, b"-");
        assert!(log_source.processing_rules.is_empty());
    }

    #[test]
    fn test_try_from_rejects_source_before_rules() {
        let config = IntegrationConfigLogSource {
            kind: FILE_TYPE.to_string(),
            processing_rules: vec![ProcessingRuleConfig::default()],
            ..Default::default()
        };

        assert!(matches!(
            LogSource::try_from(config),
            Err(ConfigError::MissingPath)
        ));
    }

    #[test]
    fn test_try_from_rejects_invalid_rule() {
        let config = IntegrationConfigLogSource {
            kind: TCP_TYPE.to_string(),
            port: 10514,
            processing_rules: vec![ProcessingRuleConfig {
                kind: "mask_sequences".to_string(),
                name: "broken".to_string(),
                pattern: "(unclosed".to_string(),
                replace_placeholder: "***".to_string(),
            }],
            ..Default::default()
        };

        assert!(matches!(
            LogSource::try_from(config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
