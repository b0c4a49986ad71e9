// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;

use super::{AccessorConfig, AccessorConfigLoader};
use crate::accessor::VariableAccessor;
use crate::store::Scope;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_default_config() {
    assert_eq!(AccessorConfig::default().scope(), Scope::Process);
    let loaded = AccessorConfigLoader::new().build().unwrap();
    assert_eq!(loaded, AccessorConfig::default());
}

#[test]
fn test_scope_from_prefixed_variable() {
    let config = AccessorConfig::builder()
        .with_env_prefix("APP")
        .with_source_map(vars(&[("APP_SCOPE", "Machine"), ("OTHER_SCOPE", "user")]))
        .build()
        .unwrap();
    assert_eq!(config.scope(), Scope::Machine);
}

#[test]
fn test_override_wins_over_variables() {
    let config = AccessorConfig::builder()
        .with_env_prefix("APP")
        .with_source_map(vars(&[("APP_SCOPE", "machine")]))
        .set("scope", "user")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.scope(), Scope::User);
}

#[test]
fn test_source_map_without_prefix_is_ignored() {
    let config = AccessorConfig::builder()
        .with_source_map(vars(&[("SCOPE", "machine")]))
        .build()
        .unwrap();
    assert_eq!(config.scope(), Scope::Process);
}

#[test]
fn test_unknown_scope_is_rejected() {
    let err = AccessorConfig::builder()
        .set("scope", "session")
        .unwrap()
        .build()
        .unwrap_err();
    assert!(
        format!("{err:#}").contains("unknown scope 'session'"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    let result = AccessorConfig::builder()
        .with_env_prefix("APP")
        .with_source_map(vars(&[("APP_SCOPE", "user"), ("APP_COLOUR", "red")]))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_accessor_from_config() {
    let config = AccessorConfig {
        scope: Scope::User,
    };
    let accessor = VariableAccessor::from_config(&config);
    assert_eq!(accessor.scope(), Scope::User);
}
