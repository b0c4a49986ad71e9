// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exact-format parsing for date/time and duration values.
//!
//! ```text
//! pattern "yyyy-MM-dd'T'HH:mm"
//!        |
//!     tokenize
//!        v
//! [Field(y,4) Lit(-) Field(M,2) Lit(-) Field(d,2) Lit(T) Field(H,2) Lit(:) Field(m,2)]
//!        |
//!   datetime / timespan walk tokens over a Cursor
//!        v
//! NaiveDateTime / TimeDelta   (input must be consumed exactly)
//! ```
//!
//! Quoting: `'text'`, `"text"`, `\c` escape one character, `%c` marks a
//! lone one-letter specifier.

mod datetime;
mod timespan;


pub use datetime::parse_date_time;
pub use timespan::parse_time_span;

/// Failure to parse a value against a format pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The pattern itself is malformed or uses an unsupported specifier.
    #[error("invalid format pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },

    /// The input does not follow the pattern.
    #[error("input does not match format at offset {offset}: {reason}")]
    Mismatch { offset: usize, reason: &'static str },

    /// A field parsed but its value is outside the valid range.
    #[error("{0} is out of range")]
    OutOfRange(&'static str),

    /// The fields read do not form a single valid date/time.
    #[error("invalid date/time: {0}")]
    Resolve(#[from] chrono::format::ParseError),
}

impl FormatError {
    fn invalid_pattern(pattern: &str, reason: &'static str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}

/// One element of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// A run of `count` identical ASCII letters, e.g. `yyyy`.
    Field { letter: char, count: usize },
    /// A character the input must contain verbatim.
    Literal(char),
}

pub(crate) fn tokenize(pattern: &str) -> Result<Vec<Token>, FormatError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => loop {
                match chars.next() {
                    Some(q) if q == c => break,
                    Some('\\') => {
                        let escaped = chars
                            .next()
                            .ok_or_else(|| FormatError::invalid_pattern(pattern, "trailing escape"))?;
                        tokens.push(Token::Literal(escaped));
                    }
                    Some(other) => tokens.push(Token::Literal(other)),
                    None => {
                        return Err(FormatError::invalid_pattern(pattern, "unterminated quote"));
                    }
                }
            },
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| FormatError::invalid_pattern(pattern, "trailing escape"))?;
                tokens.push(Token::Literal(escaped));
            }
            '%' => match chars.next() {
                Some(letter) if letter.is_ascii_alphabetic() => {
                    tokens.push(Token::Field { letter, count: 1 });
                }
                _ => {
                    return Err(FormatError::invalid_pattern(
                        pattern,
                        "'%' must be followed by a specifier",
                    ));
                }
            },
            letter if letter.is_ascii_alphabetic() => {
                let mut count = 1;
                while chars.next_if_eq(&letter).is_some() {
                    count += 1;
                }
                tokens.push(Token::Field { letter, count });
            }
            other => tokens.push(Token::Literal(other)),
        }
    }

    Ok(tokens)
}

/// Forward-only reader over the input being parsed.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    pub(crate) const fn offset(&self) -> usize {
        self.offset
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    const fn mismatch(&self, reason: &'static str) -> FormatError {
        FormatError::Mismatch {
            offset: self.offset,
            reason,
        }
    }

    /// Reads between `min` and `max` ASCII digits, greedily.
    pub(crate) fn digits(&mut self, min: usize, max: usize) -> Result<u64, FormatError> {
        let len = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min || len == 0 {
            return Err(self.mismatch("expected digits"));
        }

        let value = self.rest()[..len]
            .bytes()
            .try_fold(0u64, |acc, b| {
                acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
            })
            .ok_or(FormatError::OutOfRange("numeric field"))?;
        self.offset += len;
        Ok(value)
    }

    /// Reads a fraction of a second with `min..=max` digits, returned in nanoseconds.
    pub(crate) fn fraction(&mut self, min: usize, max: usize) -> Result<u32, FormatError> {
        let len = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return Err(self.mismatch("expected fraction digits"));
        }
        if len == 0 {
            return Ok(0);
        }

        let digits = u32::try_from(len).map_err(|_| FormatError::OutOfRange("fraction"))?;
        let value = self.digits(len, len)?;
        let nanos = u32::try_from(value)
            .ok()
            .and_then(|v| v.checked_mul(10u32.pow(9 - digits)))
            .ok_or(FormatError::OutOfRange("fraction"))?;
        Ok(nanos)
    }

    /// Consumes `expected` verbatim.
    pub(crate) fn literal(&mut self, expected: char) -> Result<(), FormatError> {
        if self.rest().starts_with(expected) {
            self.offset += expected.len_utf8();
            Ok(())
        } else {
            Err(self.mismatch("literal does not match"))
        }
    }

    /// Consumes the longest case-insensitive match among `words`, returning its index.
    pub(crate) fn keyword(&mut self, words: &[&str]) -> Result<usize, FormatError> {
        let rest = self.rest();
        let found = words
            .iter()
            .enumerate()
            .filter(|(_, word)| {
                rest.get(..word.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(word))
            })
            .max_by_key(|(_, word)| word.len());

        match found {
            Some((index, word)) => {
                self.offset += word.len();
                Ok(index)
            }
            None => Err(self.mismatch("expected a name")),
        }
    }

    /// Fails unless the whole input has been consumed.
    pub(crate) fn finish(&self) -> Result<(), FormatError> {
        if self.rest().is_empty() {
            Ok(())
        } else {
            Err(self.mismatch("unexpected trailing input"))
        }
    }
}

/// Stores `value` in `slot`, rejecting a second, different value for the same field.
pub(crate) fn assign<T: PartialEq>(
    slot: &mut Option<T>,
    value: T,
    offset: usize,
) -> Result<(), FormatError> {
    match slot {
        Some(existing) if *existing != value => Err(FormatError::Mismatch {
            offset,
            reason: "field appears twice with different values",
        }),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

/// Digit bounds for a numeric specifier: one letter reads one or two digits,
/// longer runs read exactly that many.
pub(crate) const fn width(count: usize) -> (usize, usize) {
    if count == 1 { (1, 2) } else { (count, count) }
}

/// Checks a parsed value against an inclusive upper bound.
pub(crate) fn bounded(value: u64, max: u64, what: &'static str) -> Result<u32, FormatError> {
    if value > max {
        return Err(FormatError::OutOfRange(what));
    }
    u32::try_from(value).map_err(|_| FormatError::OutOfRange(what))
}
