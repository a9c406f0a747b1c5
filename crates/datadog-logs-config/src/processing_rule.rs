// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Log processing rules declared on a log source.
//!
//! Rules are declared under `log_processing_rules` and are applied, in order, to each
//! line read from the source:
//!
//! - **exclude_at_match**: drop lines matching the pattern
//! - **mask_sequences**: replace matched sequences with `replace_placeholder`
//!
//! ```yaml
//! logs:
//!   - type: file
//!     path: /var/log/app.log
//!     log_processing_rules:
//!       - type: exclude_at_match
//!         name: exclude_health_checks
//!         pattern: "GET /health"
//!       - type: mask_sequences
//!         name: mask_credit_cards
//!         pattern: '\d{4}-\d{4}-\d{4}-\d{4}'
//!         replace_placeholder: "[CREDIT_CARD_REDACTED]"
//! ```
//!
//! Every rule is validated and its pattern compiled once, when the integration
//! configs are loaded. A malformed pattern fails the load.

use std::borrow::Cow;
use std::fmt;

use regex::bytes::Regex;
use serde::Deserialize;

use crate::deserialize::deserialize_string_from_scalar;
use crate::error::ConfigError;

pub const EXCLUDE_AT_MATCH: &str = "exclude_at_match";
pub const MASK_SEQUENCES: &str = "mask_sequences";

/// Action taken when the pattern of a rule matches a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// Drop the log line.
    ExcludeAtMatch,
    /// Replace every match with the rule placeholder.
    MaskSequences,
}

impl RuleKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::ExcludeAtMatch => EXCLUDE_AT_MATCH,
            RuleKind::MaskSequences => MASK_SEQUENCES,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A processing rule as written in an integration config file.
///
/// Fields default to empty so that incomplete rules reach validation and get a
/// descriptive error instead of a parse failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessingRuleConfig {
    #[serde(rename = "type", deserialize_with = "deserialize_string_from_scalar")]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub pattern: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub replace_placeholder: String,
}

/// A validated processing rule with its pattern compiled.
#[derive(Clone, Debug)]
pub struct ProcessingRule {
    pub kind: RuleKind,
    pub name: String,
    pub pattern: String,
    pub replace_placeholder: String,
    pub regex: Regex,
    /// Placeholder as raw bytes, only set for [`RuleKind::MaskSequences`].
    pub replace_placeholder_bytes: Option<Vec<u8>>,
}

impl ProcessingRule {
    /// Validates a declared rule and compiles its pattern.
    pub fn compile(config: ProcessingRuleConfig) -> Result<Self, ConfigError> {
        if config.name.is_empty() {
            return Err(ConfigError::RuleMissingName);
        }

        let kind = match config.kind.as_str() {
            EXCLUDE_AT_MATCH => RuleKind::ExcludeAtMatch,
            MASK_SEQUENCES => RuleKind::MaskSequences,
            "" => return Err(ConfigError::RuleMissingType { name: config.name }),
            _ => {
                return Err(ConfigError::RuleUnsupportedType {
                    kind: config.kind,
                    name: config.name,
                })
            }
        };

        let regex = Regex::new(&config.pattern).map_err(|source| ConfigError::InvalidPattern {
            name: config.name.clone(),
            source,
        })?;

        let replace_placeholder_bytes = match kind {
            RuleKind::MaskSequences => Some(config.replace_placeholder.as_bytes().to_vec()),
            RuleKind::ExcludeAtMatch => None,
        };

        Ok(ProcessingRule {
            kind,
            name: config.name,
            pattern: config.pattern,
            replace_placeholder: config.replace_placeholder,
            regex,
            replace_placeholder_bytes,
        })
    }

    /// Returns true if the pattern matches anywhere in `content`.
    #[must_use]
    pub fn is_match(&self, content: &[u8]) -> bool {
        self.regex.is_match(content)
    }

    /// Replaces every match in `content` with the placeholder.
    ///
    /// Exclusion rules have no placeholder and return `content` unchanged.
    #[must_use]
    pub fn mask<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]> {
        match &self.replace_placeholder_bytes {
            Some(placeholder) => self.regex.replace_all(content, placeholder.as_slice()),
            None => Cow::Borrowed(content),
        }
    }
}

/// Checks the rules of a source in declaration order and compiles them.
///
/// The first misconfigured rule aborts validation.
pub fn validate_processing_rules(
    rules: Vec<ProcessingRuleConfig>,
) -> Result<Vec<ProcessingRule>, ConfigError> {
    rules.into_iter().map(ProcessingRule::compile).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rule(kind: &str, name: &str, pattern: &str) -> ProcessingRuleConfig {
        ProcessingRuleConfig {
            kind: kind.to_string(),
            name: name.to_string(),
            pattern: pattern.to_string(),
            replace_placeholder: String::new(),
        }
    }

    #[test]
    fn test_compile_exclude_at_match() {
        let compiled = ProcessingRule::compile(rule(EXCLUDE_AT_MATCH, "health", "GET /health"))
            .unwrap();

        assert_eq!(compiled.kind, RuleKind::ExcludeAtMatch);
        assert_eq!(compiled.name, "health");
        assert!(compiled.replace_placeholder_bytes.is_none());
        assert!(compiled.is_match(b"10.0.0.1 GET /health 200"));
        assert!(!compiled.is_match(b"10.0.0.1 GET /users 200"));
    }

    #[test]
    fn test_compile_mask_sequences() {
        let mut config = rule(MASK_SEQUENCES, "mask_cards", r"\d{4}-\d{4}-\d{4}-\d{4}");
        config.replace_placeholder = "[CARD]".to_string();

        let compiled = ProcessingRule::compile(config).unwrap();
        assert_eq!(compiled.kind, RuleKind::MaskSequences);
        assert_eq!(compiled.replace_placeholder_bytes.as_deref(), Some(&b"[CARD]"[..]));
        assert_eq!(
            compiled.mask(b"paid with 1234-5678-1234-5678 today").as_ref(),
            b"paid with [CARD] today"
        );
    }

    #[test]
    fn test_exclude_rule_does_not_mask() {
        let compiled = ProcessingRule::compile(rule(EXCLUDE_AT_MATCH, "drop", "secret")).unwrap();
        assert_eq!(compiled.mask(b"secret").as_ref(), b"secret");
    }

    #[test]
    fn test_missing_name() {
        for kind in [EXCLUDE_AT_MATCH, MASK_SEQUENCES, "", "unknown"] {
            let err = ProcessingRule::compile(rule(kind, "", "pattern")).unwrap_err();
            assert!(matches!(err, ConfigError::RuleMissingName), "kind {kind:?}");
        }
    }

    #[test]
    fn test_missing_type() {
        let err = ProcessingRule::compile(rule("", "no_type", "pattern")).unwrap_err();
        assert!(matches!(err, ConfigError::RuleMissingType { ref name } if name == "no_type"));
    }

    #[test]
    fn test_unsupported_type() {
        let err = ProcessingRule::compile(rule("include_at_match", "only_errors", "ERROR"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RuleUnsupportedType { ref kind, ref name }
                if kind == "include_at_match" && name == "only_errors"
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = ProcessingRule::compile(rule(EXCLUDE_AT_MATCH, "broken", "(")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_validate_stops_at_first_invalid_rule() {
        let rules = vec![
            rule(EXCLUDE_AT_MATCH, "first", "a"),
            rule("", "second", "b"),
            rule(EXCLUDE_AT_MATCH, "", "c"),
        ];

        let err = validate_processing_rules(rules).unwrap_err();
        assert!(matches!(err, ConfigError::RuleMissingType { ref name } if name == "second"));
    }

    #[test]
    fn test_validate_keeps_declaration_order() {
        let rules = vec![
            rule(MASK_SEQUENCES, "first", "a"),
            rule(EXCLUDE_AT_MATCH, "second", "b"),
        ];

        let compiled = validate_processing_rules(rules).unwrap();
        let names: Vec<&str> = compiled.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_validate_empty() {
        assert!(validate_processing_rules(Vec::new()).unwrap().is_empty());
    }
}
