// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Settings store handing the loaded log sources to their consumers.
//!
//! The registry is an explicit value owned by the caller: the loader writes to it
//! through `&mut Registry`, readers get `&Registry` (or an `Arc<Registry>`) once
//! loading is done. Reads therefore always happen after the write completed.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::integration_config::LogSource;

/// Key under which the validated log sources are stored.
pub const LOGS_RULES: &str = "LogsRules";

/// Process-wide key/value settings store.
#[derive(Default)]
pub struct Registry {
    values: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set<T: Any + Send + Sync>(&mut self, key: &'static str, value: T) {
        self.values.insert(key, Box::new(value));
    }

    /// Returns the value stored under `key` if it has type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &'static str) -> Result<&T, RegistryError> {
        self.values
            .get(key)
            .ok_or(RegistryError::NotLoaded(key))?
            .downcast_ref::<T>()
            .ok_or(RegistryError::TypeMismatch(key))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("Registry").field("keys", &keys).finish()
    }
}

/// Returns the log sources published by the integration configs loader.
///
/// Fails with [`RegistryError::NotLoaded`] when the configs were never loaded into
/// this registry.
pub fn get_logs_sources(registry: &Registry) -> Result<&[Arc<LogSource>], RegistryError> {
    registry
        .get::<Vec<Arc<LogSource>>>(LOGS_RULES)
        .map(Vec::as_slice)
}
