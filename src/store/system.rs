// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The operating system's environment tables.

use super::{EnvStore, Scope};

/// Zero-sized store that delegates to the host environment.
///
/// Process scope uses `std::env`. User and Machine scopes use the registry
/// on Windows; other platforms have no such tables, so reads there return
/// `None` and writes are ignored.
///
/// # Process Scope Writes
/// [`EnvStore::set_var`] with [`Scope::Process`] calls `std::env::set_var` or
/// `remove_var`. Outside Windows the caller must ensure no other thread reads
/// or writes the process environment for the duration of the call, including
/// through libc (`getenv` from DNS resolution or time zone handling).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStore;

impl EnvStore for SystemStore {
    fn var(&self, name: &str, scope: Scope) -> std::io::Result<Option<String>> {
        match scope {
            Scope::Process => Ok(process_var(name)),
            Scope::User | Scope::Machine => persistent_var(name, scope),
        }
    }

    fn set_var(&self, name: &str, value: Option<&str>, scope: Scope) -> std::io::Result<()> {
        match scope {
            Scope::Process => {
                set_process_var(name, value);
                Ok(())
            }
            Scope::User | Scope::Machine => set_persistent_var(name, value, scope),
        }
    }
}

fn process_var(name: &str) -> Option<String> {
    let value = std::env::var_os(name)?;
    Some(value.into_string().unwrap_or_else(|raw| {
        tracing::warn!(name, "environment variable is not valid unicode, converting lossily");
        raw.to_string_lossy().into_owned()
    }))
}

fn set_process_var(name: &str, value: Option<&str>) {
    // SAFETY: sound only while no other thread touches the process
    // environment. That precondition is not checked here; it is passed on to
    // callers through the "Process Scope Writes" section of `SystemStore` and
    // `VariableAccessor`.
    unsafe {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
}

#[cfg(windows)]
fn persistent_var(name: &str, scope: Scope) -> std::io::Result<Option<String>> {
    super::registry::read(name, scope)
}

#[cfg(windows)]
fn set_persistent_var(name: &str, value: Option<&str>, scope: Scope) -> std::io::Result<()> {
    super::registry::write(name, value, scope)
}

#[cfg(not(windows))]
#[allow(clippy::unnecessary_wraps)]
const fn persistent_var(_name: &str, _scope: Scope) -> std::io::Result<Option<String>> {
    Ok(None)
}

#[cfg(not(windows))]
#[allow(clippy::unnecessary_wraps)]
fn set_persistent_var(name: &str, _value: Option<&str>, scope: Scope) -> std::io::Result<()> {
    tracing::debug!(name, %scope, "no persistent environment table on this platform, ignoring write");
    Ok(())
}
