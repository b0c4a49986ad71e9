// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading from the process environment.

use serial_test::serial;
use typed_env::config::AccessorConfig;
use typed_env::{Scope, VariableAccessor};

const SCOPE_VAR: &str = "TYPED_ENV_IT_CFG_SCOPE";

fn with_scope_var<T>(value: &str, f: impl FnOnce() -> T) -> T {
    // SAFETY: tests that mutate the environment are serialized.
    unsafe { std::env::set_var(SCOPE_VAR, value) };
    let result = f();
    // SAFETY: same as above.
    unsafe { std::env::remove_var(SCOPE_VAR) };
    result
}

#[test]
#[serial]
fn config_reads_prefixed_process_variable() {
    let config = with_scope_var("User", || {
        AccessorConfig::builder()
            .with_env_prefix("TYPED_ENV_IT_CFG")
            .build()
    })
    .unwrap();
    assert_eq!(config.scope(), Scope::User);
    assert_eq!(VariableAccessor::from_config(&config).scope(), Scope::User);
}

#[test]
#[serial]
fn config_rejects_bad_process_variable() {
    let result = with_scope_var("everywhere", || {
        AccessorConfig::builder()
            .with_env_prefix("TYPED_ENV_IT_CFG")
            .build()
    });
    assert!(result.is_err());
}

#[test]
#[serial]
fn config_without_variable_defaults_to_process() {
    let config = AccessorConfig::builder()
        .with_env_prefix("TYPED_ENV_IT_CFG")
        .build()
        .unwrap();
    assert_eq!(config.scope(), Scope::Process);
}
