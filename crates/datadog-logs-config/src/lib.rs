// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! # Datadog Logs Config
//!
//! Loads the log sources of the logs agent from the integration configs of a
//! conf.d directory.
//!
//! Every `*.yaml` file may declare a `logs` section listing file, tcp or udp
//! sources. Each source is validated, its processing rules are compiled and its
//! tags payload is precomputed. The resulting list is stored in a [`Registry`]
//! that consumers (tailers, listeners, forwarders) read with
//! [`get_logs_sources`].
//!
//! ```no_run
//! use datadog_logs_config::{get_logs_sources, LogsConfigBuilder, Registry};
//!
//! let mut registry = Registry::new();
//! LogsConfigBuilder::new("/etc/datadog-agent/conf.d").build(&mut registry)?;
//!
//! for source in get_logs_sources(&registry)? {
//!     println!("{} {}", source.kind, source.path);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod deserialize;
pub mod error;
pub mod integration_config;
pub mod logger;
pub mod message;
pub mod processing_rule;
pub mod registry;
pub mod tags_payload;

pub use builder::{
    available_integration_configs, build_logs_agent_integrations_configs, LogsConfigBuilder,
    DEFAULT_DEPRECATED_CONFIG,
};
pub use error::{ConfigError, RegistryError};
pub use integration_config::{IntegrationConfig, IntegrationConfigLogSource, LogSource, SourceKind};
pub use message::Message;
pub use processing_rule::{ProcessingRule, ProcessingRuleConfig, RuleKind};
pub use registry::{get_logs_sources, Registry, LOGS_RULES};
pub use tags_payload::build_tags_payload;
