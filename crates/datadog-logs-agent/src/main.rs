// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

mod config;

use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use datadog_logs_config::{get_logs_sources, logger, LogsConfigBuilder, Registry, SourceKind};

use crate::config::{AgentConfig, AgentError};

pub fn main() -> ExitCode {
    let log_level = std::env::var("DD_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or_else(|_| config::DEFAULT_LOG_LEVEL.to_string());
    let env_filter = EnvFilter::try_new(&log_level)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL));

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .event_format(logger::Formatter)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AgentError> {
    let config = AgentConfig::from_env()?;
    debug!("Starting logs agent with {:?}", config);

    let mut registry = Registry::new();
    LogsConfigBuilder::new(&config.confd_path)
        .with_deprecated_config(&config.deprecated_config)
        .build(&mut registry)?;

    let sources = get_logs_sources(&registry)
        .map_err(|e| AgentError::InvalidConfig(e.to_string()))?;
    for source in sources {
        let origin = match source.kind {
            SourceKind::File => source.path.clone(),
            SourceKind::Tcp | SourceKind::Udp => format!("port {}", source.port),
        };
        info!(
            "Log source {} {} service={} rules={}",
            source.kind,
            origin,
            source.service,
            source.processing_rules.len()
        );
    }

    Ok(())
}
