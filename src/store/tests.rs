// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the store module.

use std::sync::Arc;

use serial_test::serial;

use super::{EnvStore, MemoryStore, Scope, SystemStore};

#[test]
fn test_memory_store_set_get_remove() {
    let store = MemoryStore::new();
    store
        .set_var("KEY", Some("value"), Scope::Process)
        .unwrap();
    assert_eq!(
        store.var("KEY", Scope::Process).unwrap().as_deref(),
        Some("value")
    );

    store.set_var("KEY", None, Scope::Process).unwrap();
    assert_eq!(store.var("KEY", Scope::Process).unwrap(), None);

    // Removing again is a no-op.
    store.set_var("KEY", None, Scope::Process).unwrap();
    assert!(store.is_empty(Scope::Process));
}

#[test]
fn test_memory_store_scopes_are_isolated() {
    let store = MemoryStore::new();
    store.set_var("KEY", Some("user"), Scope::User).unwrap();
    store
        .set_var("KEY", Some("machine"), Scope::Machine)
        .unwrap();

    assert_eq!(store.var("KEY", Scope::Process).unwrap(), None);
    assert_eq!(store.var("KEY", Scope::User).unwrap().as_deref(), Some("user"));
    assert_eq!(
        store.var("KEY", Scope::Machine).unwrap().as_deref(),
        Some("machine")
    );
    assert_eq!(store.len(Scope::User), 1);
    assert_eq!(store.len(Scope::Machine), 1);
}

#[test]
fn test_memory_store_overwrite_and_clear() {
    let store = MemoryStore::from_process_vars([("A", "1"), ("B", "2")]);
    assert_eq!(store.len(Scope::Process), 2);

    store.set_var("A", Some("3"), Scope::Process).unwrap();
    assert_eq!(store.var("A", Scope::Process).unwrap().as_deref(), Some("3"));

    store.clear();
    assert!(store.is_empty(Scope::Process));
}

#[test]
fn test_memory_store_keys_are_case_sensitive() {
    let store = MemoryStore::from_process_vars([("Key", "v")]);
    assert_eq!(store.var("KEY", Scope::Process).unwrap(), None);
}

#[test]
fn test_store_through_references() {
    fn read<S: EnvStore>(store: S) -> Option<String> {
        store.var("SHARED", Scope::Process).unwrap()
    }

    let store = Arc::new(MemoryStore::from_process_vars([("SHARED", "yes")]));
    assert_eq!(read(&*store).as_deref(), Some("yes"));
    assert_eq!(read(Arc::clone(&store)).as_deref(), Some("yes"));
}

#[test]
#[serial]
fn test_system_store_process_round_trip() {
    let name = "TYPED_ENV_STORE_TEST_ROUND_TRIP";
    let store = SystemStore;

    store.set_var(name, Some("value"), Scope::Process).unwrap();
    assert_eq!(std::env::var(name).as_deref(), Ok("value"));
    assert_eq!(
        store.var(name, Scope::Process).unwrap().as_deref(),
        Some("value")
    );

    store.set_var(name, None, Scope::Process).unwrap();
    assert!(std::env::var_os(name).is_none());
    assert_eq!(store.var(name, Scope::Process).unwrap(), None);
}

#[test]
#[serial]
fn test_system_store_delegates_to_std() {
    let store = SystemStore;
    let std_result = std::env::var("PATH").ok();
    assert_eq!(store.var("PATH", Scope::Process).unwrap(), std_result);
}

#[cfg(not(windows))]
#[test]
fn test_system_store_persistent_scopes_are_empty_off_windows() {
    let store = SystemStore;
    let name = "TYPED_ENV_STORE_TEST_USER_SCOPE";

    store.set_var(name, Some("ignored"), Scope::User).unwrap();
    assert_eq!(store.var(name, Scope::User).unwrap(), None);
    assert_eq!(store.var(name, Scope::Machine).unwrap(), None);
    assert!(std::env::var_os(name).is_none());
}

#[test]
fn test_scope_parse_and_display() {
    assert_eq!("process".parse::<Scope>(), Ok(Scope::Process));
    assert_eq!("User".parse::<Scope>(), Ok(Scope::User));
    assert_eq!(" MACHINE ".parse::<Scope>(), Ok(Scope::Machine));
    assert_eq!(Scope::default(), Scope::Process);
    assert_eq!(Scope::Machine.to_string(), "machine");

    let err = "session".parse::<Scope>().unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"unknown scope 'session', expected one of: process, user, machine"
    );
}
