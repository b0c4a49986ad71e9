// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests against the real process environment.
//!
//! Every test touching the process environment is `#[serial]` and uses its
//! own `TYPED_ENV_IT_*` name.

use chrono::{NaiveDate, TimeDelta};
use serial_test::serial;
use strum::{EnumString, FromRepr};
use typed_env::{Scope, VarError, VariableAccessor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, FromRepr)]
#[repr(u8)]
enum Mode {
    Fast = 1,
    Safe = 2,
}

typed_env::impl_enum_variable!(Mode => u8);

/// Removes the variable when dropped, even if the test panics.
struct Cleanup(&'static str);

impl Drop for Cleanup {
    fn drop(&mut self) {
        // SAFETY: tests that mutate the environment are serialized.
        unsafe { std::env::remove_var(self.0) };
    }
}

// =============================================================================
// Round trips through the process table
// =============================================================================

#[test]
#[serial]
fn process_set_get_delete() {
    const NAME: &str = "TYPED_ENV_IT_ROUND_TRIP";
    let _cleanup = Cleanup(NAME);
    let env = VariableAccessor::new();

    env.set(NAME, "TestValue").unwrap();
    assert_eq!(std::env::var(NAME).as_deref(), Ok("TestValue"));
    assert!(env.exists(NAME).unwrap());
    assert_eq!(env.get_string(NAME).unwrap(), "TestValue");

    env.delete(NAME).unwrap();
    assert!(std::env::var_os(NAME).is_none());
    assert!(!env.exists(NAME).unwrap());
    assert!(env.delete_existing(NAME).unwrap_err().is_not_found());
}

#[test]
#[serial]
fn process_values_set_outside_are_visible() {
    const NAME: &str = "TYPED_ENV_IT_EXTERNAL";
    let _cleanup = Cleanup(NAME);
    // SAFETY: serialized test.
    unsafe { std::env::set_var(NAME, "42") };

    let env = VariableAccessor::with_scope(Scope::Process);
    assert_eq!(env.get_i32(NAME).unwrap(), 42);
    assert_eq!(env.get_u8(NAME).unwrap(), 42);
    assert!(env.get_bool(NAME).unwrap_err().is_unexpected_type());
    assert!(env.get_bool_or_default(NAME, true).unwrap());
}

#[test]
#[serial]
fn process_typed_values() {
    const NAME: &str = "TYPED_ENV_IT_TYPED";
    let _cleanup = Cleanup(NAME);
    let env = VariableAccessor::new();

    env.set(NAME, "Safe").unwrap();
    assert_eq!(env.get_enum::<Mode>(NAME).unwrap(), Mode::Safe);
    env.set(NAME, 1).unwrap();
    assert_eq!(env.get_enum::<Mode>(NAME).unwrap(), Mode::Fast);

    env.set(NAME, "2022-01-10 08:30").unwrap();
    let expected = NaiveDate::from_ymd_opt(2022, 1, 10)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    assert_eq!(env.get_date_time(NAME, "yyyy-MM-dd HH:mm").unwrap(), expected);

    env.set(NAME, "1.02:03:04").unwrap();
    assert_eq!(
        env.get_time_span(NAME, "d\\.hh\\:mm\\:ss").unwrap(),
        TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::minutes(3) + TimeDelta::seconds(4)
    );
}

#[test]
#[serial]
fn process_unexpected_type_details() {
    const NAME: &str = "TYPED_ENV_IT_DETAILS";
    let _cleanup = Cleanup(NAME);
    let env = VariableAccessor::new();
    env.set(NAME, "not-a-number").unwrap();

    let VarError::UnexpectedType(err) = env.get_i64(NAME).unwrap_err() else {
        panic!("expected UnexpectedType");
    };
    assert_eq!(err.name(), NAME);
    assert_eq!(err.value(), "not-a-number");
    assert_eq!(err.expected(), "i64");
}

#[cfg(not(windows))]
#[test]
#[serial]
fn process_empty_value_exists() {
    const NAME: &str = "TYPED_ENV_IT_EMPTY";
    let _cleanup = Cleanup(NAME);
    let env = VariableAccessor::new();

    env.set(NAME, "").unwrap();
    assert!(env.exists(NAME).unwrap());
    assert_eq!(env.get_string(NAME).unwrap(), "");
    assert_eq!(env.get_i32_or_default(NAME, 8).unwrap(), 8);
}

// =============================================================================
// Persistent scopes
// =============================================================================

#[cfg(not(windows))]
#[test]
fn persistent_scopes_are_empty_off_windows() {
    for scope in [Scope::User, Scope::Machine] {
        let env = VariableAccessor::with_scope(scope);
        env.set("TYPED_ENV_IT_PERSISTENT", "ignored").unwrap();
        assert!(!env.exists("TYPED_ENV_IT_PERSISTENT").unwrap());
        assert!(!env.exists("PATH").unwrap());
    }
}
