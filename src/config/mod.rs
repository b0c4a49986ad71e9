// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Accessor configuration.
//!
//! # Sources
//!
//! ```text
//! Priority (low -> high)
//! 1. defaults              scope = process
//! 2. <PREFIX>_* variables  process environment, or an injected map
//! 3. set(key, value)       explicit overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! TYPED_ENV_SCOPE=user     -> scope = User
//! TYPED_ENV_SCOPE=MACHINE  -> scope = Machine (case-insensitive)
//! TYPED_ENV_OTHER=1        -> error (unknown field)
//! ```

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::Scope;

/// Settings for building a [`VariableAccessor`](crate::accessor::VariableAccessor).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessorConfig {
    /// Table the accessor targets.
    pub scope: Scope,
}

impl AccessorConfig {
    /// Create a new configuration loader.
    ///
    /// # Example
    ///
    /// ```
    /// use typed_env::config::AccessorConfig;
    /// use typed_env::store::Scope;
    ///
    /// let config = AccessorConfig::builder().set("scope", "user")?.build()?;
    /// assert_eq!(config.scope(), Scope::User);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> AccessorConfigLoader {
        AccessorConfigLoader::new()
    }

    /// The configured scope.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }
}

/// Builder for loading [`AccessorConfig`] from prefixed variables and overrides.
pub struct AccessorConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    source_map: Option<HashMap<String, String>>,
}

impl AccessorConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            source_map: None,
        }
    }

    /// Reads `<prefix>_SCOPE` when building.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Reads prefixed variables from `map` instead of the process environment.
    ///
    /// Has no effect without [`with_env_prefix`](Self::with_env_prefix).
    #[must_use]
    pub fn with_source_map(mut self, map: HashMap<String, String>) -> Self {
        self.source_map = Some(map);
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Builds the configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A prefixed variable names an unknown field.
    /// - The scope is not one of `process`, `user` or `machine`.
    pub fn build(self) -> Result<AccessorConfig> {
        let builder = match &self.env_prefix {
            Some(prefix) => {
                let source = self
                    .source_map
                    .map(|map| map.into_iter().collect::<config::Map<_, _>>());
                self.builder.add_source(
                    config::Environment::with_prefix(prefix)
                        .separator("_")
                        .source(source),
                )
            }
            None => self.builder,
        };
        let config: AccessorConfig = builder.build()?.try_deserialize()?;
        tracing::debug!(scope = %config.scope, "loaded accessor configuration");
        Ok(config)
    }
}

impl Default for AccessorConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
