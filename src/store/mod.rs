// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable stores.
//!
//! # Architecture
//!
//! ```text
//! EnvStore (trait)
//!   var(name, scope)               -> Option<String>
//!   set_var(name, Some(v), scope)  -> write
//!   set_var(name, None, scope)     -> delete
//!
//! SystemStore   Process -> std::env
//!               User    -> HKCU\Environment        (Windows)
//!               Machine -> HKLM\...\Environment    (Windows)
//!               User/Machine elsewhere: absent, writes ignored
//! MemoryStore   Mutex<BTreeMap<(Scope, name), value>>
//! ```

mod memory;
#[cfg(windows)]
mod registry;
mod scope;
mod system;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use scope::{ParseScopeError, Scope};
pub use system::SystemStore;

/// A mutable mapping from variable name to value, partitioned by [`Scope`].
///
/// Implementations perform no validation; names reaching a store have
/// already been checked by the accessor.
///
/// # Thread Safety
///
/// Does **not** require `Send + Sync`. Add the bounds at your call site.
pub trait EnvStore {
    /// Reads a variable, returning `None` when it is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying table cannot be read.
    fn var(&self, name: &str, scope: Scope) -> std::io::Result<Option<String>>;

    /// Writes a variable. `None` removes it; removing a missing variable is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying table cannot be written.
    fn set_var(&self, name: &str, value: Option<&str>, scope: Scope) -> std::io::Result<()>;
}

impl<S: EnvStore + ?Sized> EnvStore for &S {
    fn var(&self, name: &str, scope: Scope) -> std::io::Result<Option<String>> {
        (**self).var(name, scope)
    }

    fn set_var(&self, name: &str, value: Option<&str>, scope: Scope) -> std::io::Result<()> {
        (**self).set_var(name, value, scope)
    }
}

impl<S: EnvStore + ?Sized> EnvStore for std::sync::Arc<S> {
    fn var(&self, name: &str, scope: Scope) -> std::io::Result<Option<String>> {
        (**self).var(name, scope)
    }

    fn set_var(&self, name: &str, value: Option<&str>, scope: Scope) -> std::io::Result<()> {
        (**self).set_var(name, value, scope)
    }
}
