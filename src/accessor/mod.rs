// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed, scope-aware access to environment variables.
//!
//! # Architecture
//!
//! ```text
//! VariableAccessor<S: EnvStore = SystemStore>
//!   scope (fixed at construction) + store handle, nothing cached
//!
//! strict:   validate -> get_string -----> NotFound
//!                          |
//!                      T::from_variable -> UnexpectedType{name, value, T}
//!
//! lenient:  validate -> get_string_or_default
//!                          |  absent or unparsable -> caller's default
//!
//! writes:   validate name/value -> store.set_var (None deletes)
//! ```
//!
//! `InvalidArgument` and `Store` errors are returned by every variant.

use std::fmt::Display;

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::config::AccessorConfig;
use crate::error::{UnexpectedTypeError, VarError, VarResult};
use crate::parse::enums::parse_enum;
use crate::parse::{EnumVariable, FromVariable, ParseFailure, parse_date_time, parse_time_span};
use crate::store::{EnvStore, Scope, SystemStore};

/// Longest accepted variable name, in UTF-16 code units.
pub const MAX_NAME_LEN: usize = 32_767;

/// Reads and writes environment variables as typed values.
///
/// Holds only its [`Scope`] and a handle to the store; every call goes
/// straight to the store, so reads always reflect its current state.
///
/// # Thread Safety
/// Safe to share when `S` is. Nothing in the accessor guards the variables
/// themselves; concurrent writers race at the store's granularity.
///
/// # Process Scope Writes
/// With [`SystemStore`] and [`Scope::Process`], [`set`](Self::set),
/// [`set_optional`](Self::set_optional), [`delete`](Self::delete) and
/// [`delete_existing`](Self::delete_existing) call `std::env::set_var` /
/// `remove_var`. On every platform except Windows the caller must ensure no
/// other thread reads or writes the process environment during the call,
/// including C code calling `getenv` (DNS resolution, time zone lookup).
/// Write before spawning threads, or use [`MemoryStore`](crate::store::MemoryStore)
/// in multithreaded code.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableAccessor<S = SystemStore> {
    store: S,
    scope: Scope,
}

impl VariableAccessor<SystemStore> {
    /// Accessor for the current process environment.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_scope(Scope::Process)
    }

    /// Accessor for the host table selected by `scope`.
    #[must_use]
    pub const fn with_scope(scope: Scope) -> Self {
        Self {
            store: SystemStore,
            scope,
        }
    }

    /// Accessor built from loaded configuration.
    #[must_use]
    pub const fn from_config(config: &AccessorConfig) -> Self {
        Self::with_scope(config.scope())
    }
}

/// Generates a strict getter and its lenient counterpart for a [`FromVariable`] type.
macro_rules! typed_getters {
    ($($ty:ty => $get:ident, $get_or_default:ident;)+) => {
        $(
            #[doc = concat!("Reads the variable as `", stringify!($ty), "`.")]
            ///
            /// # Errors
            ///
            /// Returns [`VarError::NotFound`] if it is not set and
            /// [`VarError::UnexpectedType`] if its value does not parse.
            pub fn $get(&self, name: &str) -> VarResult<$ty> {
                self.get::<$ty>(name)
            }

            #[doc = concat!("Reads the variable as `", stringify!($ty), "`, or returns `default`.")]
            ///
            /// # Errors
            ///
            /// Returns only argument and store errors.
            pub fn $get_or_default(&self, name: &str, default: $ty) -> VarResult<$ty> {
                self.get_or_default::<$ty>(name, default)
            }
        )+
    };
}

impl<S: EnvStore> VariableAccessor<S> {
    /// Accessor over a caller-provided store.
    #[must_use]
    pub const fn with_store(store: S, scope: Scope) -> Self {
        Self { store, scope }
    }

    /// The table this accessor targets.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // --- Existence and writes ---

    /// Returns true if the variable has a value in this scope.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] for an invalid name.
    pub fn exists(&self, name: &str) -> VarResult<bool> {
        Ok(self.get_string_or_default(name, None)?.is_some())
    }

    /// Writes `value`'s display form.
    ///
    /// See [Process Scope Writes](Self#process-scope-writes) for the
    /// precondition on the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] for an invalid name or a value
    /// containing NUL.
    pub fn set(&self, name: &str, value: impl Display) -> VarResult<()> {
        self.set_optional(name, Some(value))
    }

    /// Writes `value`'s display form, or deletes the variable when `value` is `None`.
    ///
    /// See [Process Scope Writes](Self#process-scope-writes) for the
    /// precondition on the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] for an invalid name or a value
    /// containing NUL.
    pub fn set_optional<V: Display>(&self, name: &str, value: Option<V>) -> VarResult<()> {
        validate_name(name)?;
        let value = value.map(|v| v.to_string());
        if value.as_deref().is_some_and(|v| v.contains('\0')) {
            return Err(VarError::invalid_argument("value contains a NUL character"));
        }

        tracing::debug!(
            name,
            scope = %self.scope,
            delete = value.is_none(),
            "writing environment variable"
        );
        self.store.set_var(name, value.as_deref(), self.scope)?;
        Ok(())
    }

    /// Deletes the variable. Deleting a missing variable is a no-op.
    ///
    /// See [Process Scope Writes](Self#process-scope-writes) for the
    /// precondition on the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] for an invalid name.
    pub fn delete(&self, name: &str) -> VarResult<()> {
        self.set_optional::<&str>(name, None)
    }

    /// Deletes the variable, failing if it does not exist.
    ///
    /// See [Process Scope Writes](Self#process-scope-writes) for the
    /// precondition on the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::NotFound`] if the variable is not set.
    pub fn delete_existing(&self, name: &str) -> VarResult<()> {
        if !self.exists(name)? {
            return Err(VarError::not_found(name));
        }
        self.delete(name)
    }

    // --- Strings ---

    /// Reads the raw value.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::NotFound`] if the variable is not set.
    pub fn get_string(&self, name: &str) -> VarResult<String> {
        self.get_string_or_default(name, None)?
            .ok_or_else(|| VarError::not_found(name))
    }

    /// Reads the raw value, or returns `default` if the variable is not set.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] for an invalid name.
    pub fn get_string_or_default(
        &self,
        name: &str,
        default: Option<&str>,
    ) -> VarResult<Option<String>> {
        validate_name(name)?;
        let value = self.store.var(name, self.scope)?;
        Ok(value.or_else(|| default.map(str::to_owned)))
    }

    // --- Generic ---

    /// Reads the variable as any [`FromVariable`] type.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::NotFound`] if it is not set and
    /// [`VarError::UnexpectedType`] if its value does not parse.
    pub fn get<T: FromVariable>(&self, name: &str) -> VarResult<T> {
        let raw = self.get_string(name)?;
        T::from_variable(&raw).map_err(|failure| unexpected(name, raw, T::TYPE_NAME, failure))
    }

    /// Reads the variable as any [`FromVariable`] type, or returns `default`
    /// if it is not set or does not parse.
    ///
    /// # Errors
    ///
    /// Returns only argument and store errors.
    pub fn get_or_default<T: FromVariable>(&self, name: &str, default: T) -> VarResult<T> {
        let parsed = self
            .get_string_or_default(name, None)?
            .and_then(|raw| T::from_variable(&raw).ok());
        Ok(or_default(name, T::TYPE_NAME, parsed, default))
    }

    typed_getters! {
        bool => get_bool, get_bool_or_default;
        u8 => get_u8, get_u8_or_default;
        i16 => get_i16, get_i16_or_default;
        i32 => get_i32, get_i32_or_default;
        i64 => get_i64, get_i64_or_default;
        f32 => get_f32, get_f32_or_default;
        f64 => get_f64, get_f64_or_default;
        Decimal => get_decimal, get_decimal_or_default;
        char => get_char, get_char_or_default;
        Url => get_url, get_url_or_default;
        Uuid => get_uuid, get_uuid_or_default;
    }

    // --- Enums ---

    /// Reads the variable as a declared variant of `T`, by exact name or discriminant.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::NotFound`] if it is not set and
    /// [`VarError::UnexpectedType`] if the value names no declared variant.
    pub fn get_enum<T: EnumVariable>(&self, name: &str) -> VarResult<T> {
        let raw = self.get_string(name)?;
        parse_enum::<T>(&raw)
            .ok_or_else(|| unexpected(name, raw, T::TYPE_NAME, ParseFailure::rejected()))
    }

    /// Reads the variable as a declared variant of `T`, or returns `default`.
    ///
    /// A missing variable returns `default` before any parsing is attempted.
    ///
    /// # Errors
    ///
    /// Returns only argument and store errors.
    pub fn get_enum_or_default<T: EnumVariable>(&self, name: &str, default: T) -> VarResult<T> {
        if !self.exists(name)? {
            return Ok(or_default(name, T::TYPE_NAME, None, default));
        }
        let parsed = self
            .get_string_or_default(name, None)?
            .as_deref()
            .and_then(parse_enum::<T>);
        Ok(or_default(name, T::TYPE_NAME, parsed, default))
    }

    // --- Date/time and durations ---

    /// Reads the variable as a date/time in exactly `format`.
    ///
    /// See [`parse_date_time`] for the pattern language.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] if `format` is empty,
    /// [`VarError::NotFound`] if the variable is not set and
    /// [`VarError::UnexpectedType`] if the value does not match `format`.
    pub fn get_date_time(&self, name: &str, format: &str) -> VarResult<NaiveDateTime> {
        validate_format(format)?;
        let raw = self.get_string(name)?;
        parse_date_time(&raw, format).map_err(|err| {
            unexpected(name, raw, "NaiveDateTime", ParseFailure::caused_by(err))
        })
    }

    /// Reads the variable as a date/time in exactly `format`, or returns `default`.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] if `format` is empty.
    pub fn get_date_time_or_default(
        &self,
        name: &str,
        format: &str,
        default: NaiveDateTime,
    ) -> VarResult<NaiveDateTime> {
        validate_format(format)?;
        let parsed = self
            .get_string_or_default(name, None)?
            .and_then(|raw| parse_date_time(&raw, format).ok());
        Ok(or_default(name, "NaiveDateTime", parsed, default))
    }

    /// Reads the variable as a duration in exactly `format`.
    ///
    /// See [`parse_time_span`] for the pattern language.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] if `format` is empty,
    /// [`VarError::NotFound`] if the variable is not set and
    /// [`VarError::UnexpectedType`] if the value does not match `format`.
    pub fn get_time_span(&self, name: &str, format: &str) -> VarResult<TimeDelta> {
        validate_format(format)?;
        let raw = self.get_string(name)?;
        parse_time_span(&raw, format)
            .map_err(|err| unexpected(name, raw, "TimeDelta", ParseFailure::caused_by(err)))
    }

    /// Reads the variable as a duration in exactly `format`, or returns `default`.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidArgument`] if `format` is empty.
    pub fn get_time_span_or_default(
        &self,
        name: &str,
        format: &str,
        default: TimeDelta,
    ) -> VarResult<TimeDelta> {
        validate_format(format)?;
        let parsed = self
            .get_string_or_default(name, None)?
            .and_then(|raw| parse_time_span(&raw, format).ok());
        Ok(or_default(name, "TimeDelta", parsed, default))
    }
}

fn or_default<T>(name: &str, expected: &'static str, parsed: Option<T>, default: T) -> T {
    parsed.unwrap_or_else(|| {
        tracing::trace!(name, expected, "using default value");
        default
    })
}

fn unexpected(name: &str, raw: String, expected: &'static str, failure: ParseFailure) -> VarError {
    UnexpectedTypeError::new(name, raw, expected, failure.into_source()).into()
}

fn validate_name(name: &str) -> VarResult<()> {
    if name.is_empty() {
        return Err(VarError::invalid_argument("name was empty"));
    }
    if name.contains('=') {
        return Err(VarError::invalid_argument("name contains '='"));
    }
    if name.contains('\0') {
        return Err(VarError::invalid_argument("name contains a NUL character"));
    }
    if name.encode_utf16().count() > MAX_NAME_LEN {
        return Err(VarError::invalid_argument("name is too long"));
    }
    Ok(())
}

fn validate_format(format: &str) -> VarResult<()> {
    if format.trim().is_empty() {
        return Err(VarError::invalid_argument("format was empty"));
    }
    Ok(())
}
