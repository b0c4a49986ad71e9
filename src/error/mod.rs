// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 VarError (~24 bytes)
//!                        |
//!     +-------------+----+-----------+----------+
//!     v             v                v          v
//! InvalidArgument NotFound    UnexpectedType     Store
//!  &'static str   Box<str>   Box<UnexpectedType> Box<io::Error>
//!
//! Lenient (OrDefault) getters absorb: NotFound, UnexpectedType
//! Always fatal:                       InvalidArgument, Store
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`, used by the config and logging layers.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`VarError`].
pub type VarResult<T> = std::result::Result<T, VarError>;

/// Boxed error used as the cause of a failed parse.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`VariableAccessor`](crate::accessor::VariableAccessor).
///
/// Payloads are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum VarError {
    /// A name, value or format argument was rejected before the store was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The variable does not exist in the accessor's scope.
    #[error("environment variable '{0}' does not exist")]
    NotFound(Box<str>),

    /// The variable exists but its value does not parse as the requested type.
    #[error(transparent)]
    UnexpectedType(Box<UnexpectedTypeError>),

    /// The underlying environment table could not be read or written.
    #[error("environment store error: {0}")]
    Store(Box<std::io::Error>),
}

impl VarError {
    pub(crate) const fn invalid_argument(reason: &'static str) -> Self {
        Self::InvalidArgument(reason)
    }

    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound(name.into())
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub const fn is_unexpected_type(&self) -> bool {
        matches!(self, Self::UnexpectedType(_))
    }

    /// Whether a lenient getter replaces this error with the caller's default.
    #[must_use]
    pub const fn is_absorbed_by_default(&self) -> bool {
        self.is_not_found() || self.is_unexpected_type()
    }
}

impl From<UnexpectedTypeError> for VarError {
    fn from(err: UnexpectedTypeError) -> Self {
        Self::UnexpectedType(Box::new(err))
    }
}

impl From<std::io::Error> for VarError {
    fn from(err: std::io::Error) -> Self {
        Self::Store(Box::new(err))
    }
}

/// A variable's raw value did not parse as the expected type.
#[derive(Debug, Error)]
#[error("environment variable '{name}' value '{value}' is not of expected type: {expected}")]
pub struct UnexpectedTypeError {
    name: String,
    value: String,
    expected: &'static str,
    #[source]
    source: Option<BoxError>,
}

impl UnexpectedTypeError {
    pub(crate) fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
        source: Option<BoxError>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expected,
            source,
        }
    }

    /// Name of the variable that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value as read from the store.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Name of the type the value was expected to parse as.
    #[must_use]
    pub const fn expected(&self) -> &'static str {
        self.expected
    }
}

#[cfg(test)]
mod tests;
