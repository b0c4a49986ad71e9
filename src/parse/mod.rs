// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parse strategies from a raw variable value to a typed value.
//!
//! ```text
//! raw &str --FromVariable::from_variable--> T
//!                     |
//!                 ParseFailure (optional cause)
//!                     |
//!   accessor wraps it as VarError::UnexpectedType{name, value, T::TYPE_NAME}
//!
//! bool        true/false, any case, surrounding whitespace ignored
//! integers    base 10, optional sign, overflow rejected
//! f32 f64     Rust float grammar      Decimal   [+-]digits[.digits] only
//! char        exactly one character
//! Url         absolute URL            Uuid      32 hex digits, -, {} or ()
//! enums       see `enums`             date/time, durations: see `format`
//! ```

pub mod enums;
pub mod format;


use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::error::BoxError;

pub use enums::EnumVariable;
pub use format::{FormatError, parse_date_time, parse_time_span};

/// A value that can be read from the text of an environment variable.
pub trait FromVariable: Sized {
    /// Type name reported when parsing fails.
    const TYPE_NAME: &'static str;

    /// Parses the raw value of a variable.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] if `raw` is not a valid `Self`.
    fn from_variable(raw: &str) -> Result<Self, ParseFailure>;
}

/// A raw value was rejected, optionally with the parser's own error.
#[derive(Debug, Default)]
pub struct ParseFailure(Option<BoxError>);

impl ParseFailure {
    /// Rejection without an underlying error.
    #[must_use]
    pub const fn rejected() -> Self {
        Self(None)
    }

    /// Rejection caused by `source`.
    pub fn caused_by(source: impl Into<BoxError>) -> Self {
        Self(Some(source.into()))
    }

    /// Returns the underlying parser error, if any.
    #[must_use]
    pub fn into_source(self) -> Option<BoxError> {
        self.0
    }
}

impl FromVariable for String {
    const TYPE_NAME: &'static str = "String";

    fn from_variable(raw: &str) -> Result<Self, ParseFailure> {
        Ok(raw.to_owned())
    }
}

impl FromVariable for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_variable(raw: &str) -> Result<Self, ParseFailure> {
        let token = raw.trim_matches(|c: char| c.is_whitespace() || c == '\0');
        if token.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if token.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ParseFailure::rejected())
        }
    }
}

/// Implements [`FromVariable`] through `FromStr` after trimming surrounding whitespace.
macro_rules! impl_from_variable_trimmed {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl FromVariable for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_variable(raw: &str) -> Result<Self, ParseFailure> {
                    raw.trim_ascii().parse::<$ty>().map_err(ParseFailure::caused_by)
                }
            }
        )+
    };
}

impl_from_variable_trimmed! {
    u8 => "u8",
    i8 => "i8",
    u16 => "u16",
    i16 => "i16",
    u32 => "u32",
    i32 => "i32",
    u64 => "u64",
    i64 => "i64",
    f32 => "f32",
    f64 => "f64",
}

impl FromVariable for Decimal {
    const TYPE_NAME: &'static str = "Decimal";

    fn from_variable(raw: &str) -> Result<Self, ParseFailure> {
        let token = raw.trim_ascii();
        if !is_plain_decimal(token) {
            return Err(ParseFailure::rejected());
        }
        token.parse::<Self>().map_err(ParseFailure::caused_by)
    }
}

/// `[+-]?digits[.digits]`: no exponent, no digit separators.
fn is_plain_decimal(s: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(unsigned),
    }
}

impl FromVariable for char {
    const TYPE_NAME: &'static str = "char";

    fn from_variable(raw: &str) -> Result<Self, ParseFailure> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ParseFailure::rejected()),
        }
    }
}

impl FromVariable for Url {
    const TYPE_NAME: &'static str = "Url";

    fn from_variable(raw: &str) -> Result<Self, ParseFailure> {
        Self::parse(raw).map_err(ParseFailure::caused_by)
    }
}

impl FromVariable for Uuid {
    const TYPE_NAME: &'static str = "Uuid";

    fn from_variable(raw: &str) -> Result<Self, ParseFailure> {
        let trimmed = raw.trim_ascii();
        let inner = strip_enclosing(trimmed, '{', '}')
            .or_else(|| strip_enclosing(trimmed, '(', ')'))
            .unwrap_or(trimmed);
        // `try_parse` would also take `urn:uuid:` and a second pair of braces.
        if inner.contains([':', '{', '}']) {
            return Err(ParseFailure::rejected());
        }
        Self::try_parse(inner).map_err(ParseFailure::caused_by)
    }
}

fn strip_enclosing(s: &str, open: char, close: char) -> Option<&str> {
    s.strip_prefix(open)?.strip_suffix(close)
}
