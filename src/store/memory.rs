// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process store that never touches the host environment.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{EnvStore, Scope};

/// Won't touch the global process environment.
///
/// Every scope gets its own table. Keys are case-sensitive.
///
/// # Thread Safety
/// `MemoryStore` is `Send` and `Sync`; writes are serialized by a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    vars: Mutex<BTreeMap<(Scope, String), String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose Process table holds `vars`.
    #[must_use]
    pub fn from_process_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| ((Scope::Process, k.into()), v.into()))
            .collect();
        Self {
            vars: Mutex::new(vars),
        }
    }

    /// Returns the number of variables in `scope`.
    #[must_use]
    pub fn len(&self, scope: Scope) -> usize {
        self.lock().keys().filter(|(s, _)| *s == scope).count()
    }

    /// Returns true if `scope` holds no variables.
    #[must_use]
    pub fn is_empty(&self, scope: Scope) -> bool {
        self.len(scope) == 0
    }

    /// Removes every variable from every scope.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<(Scope, String), String>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.vars.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnvStore for MemoryStore {
    fn var(&self, name: &str, scope: Scope) -> std::io::Result<Option<String>> {
        Ok(self.lock().get(&(scope, name.to_string())).cloned())
    }

    fn set_var(&self, name: &str, value: Option<&str>, scope: Scope) -> std::io::Result<()> {
        let mut vars = self.lock();
        let key = (scope, name.to_string());
        match value {
            Some(value) => {
                vars.insert(key, value.to_string());
            }
            None => {
                vars.remove(&key);
            }
        }
        Ok(())
    }
}
