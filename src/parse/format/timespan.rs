// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Duration patterns.
//!
//! ```text
//! d..dddddddd  days (at least N digits, at most 8)
//! h hh         hours 0-23
//! m mm         minutes 0-59
//! s ss         seconds 0-59
//! f/F          fraction, as for date/time
//! ```
//!
//! Any other letter must be quoted or escaped.

use chrono::TimeDelta;

use super::{Cursor, FormatError, Token, assign, bounded, tokenize, width};

const SPECIFIERS: &str = "dhmsfF";
const MAX_DAY_DIGITS: usize = 8;
const MAX_FRACTION_DIGITS: usize = 7;

#[derive(Debug, Default)]
struct Fields {
    days: Option<u32>,
    hours: Option<u32>,
    minutes: Option<u32>,
    seconds: Option<u32>,
    nanos: Option<u32>,
}

/// Parses `input` against `pattern` exactly.
///
/// # Errors
///
/// Returns [`FormatError`] if the pattern is malformed or uses a letter that
/// is not a duration specifier, or if the input does not follow it.
pub fn parse_time_span(input: &str, pattern: &str) -> Result<TimeDelta, FormatError> {
    let tokens = tokenize(pattern)?;
    if tokens
        .iter()
        .any(|token| matches!(token, Token::Field { letter, .. } if !SPECIFIERS.contains(*letter)))
    {
        return Err(unrecognized(pattern));
    }

    let mut cursor = Cursor::new(input);
    let mut fields = Fields::default();

    for token in tokens {
        match token {
            Token::Literal(c) => cursor.literal(c)?,
            Token::Field { letter, count } => {
                let at = cursor.offset();
                match letter {
                    'd' => {
                        if count > MAX_DAY_DIGITS {
                            return Err(FormatError::invalid_pattern(pattern, "day field is too long"));
                        }
                        let days = bounded(cursor.digits(count, MAX_DAY_DIGITS)?, 99_999_999, "days")?;
                        assign(&mut fields.days, days, at)?;
                    }
                    'h' | 'm' | 's' => {
                        if count > 2 {
                            return Err(FormatError::invalid_pattern(
                                pattern,
                                "time field is longer than two letters",
                            ));
                        }
                        let (min, max) = width(count);
                        let raw = cursor.digits(min, max)?;
                        let (slot, limit, what) = match letter {
                            'h' => (&mut fields.hours, 23, "hours"),
                            'm' => (&mut fields.minutes, 59, "minutes"),
                            _ => (&mut fields.seconds, 59, "seconds"),
                        };
                        assign(slot, bounded(raw, limit, what)?, at)?;
                    }
                    'f' | 'F' => {
                        if count > MAX_FRACTION_DIGITS {
                            return Err(FormatError::invalid_pattern(
                                pattern,
                                "fraction field is too long",
                            ));
                        }
                        let min = if letter == 'f' { count } else { 0 };
                        let nanos = cursor.fraction(min, count)?;
                        assign(&mut fields.nanos, nanos, at)?;
                    }
                    _ => return Err(unrecognized(pattern)),
                }
            }
        }
    }
    cursor.finish()?;

    fields.build()
}

fn unrecognized(pattern: &str) -> FormatError {
    FormatError::invalid_pattern(pattern, "unrecognized specifier, quote or escape literal letters")
}

impl Fields {
    fn build(self) -> Result<TimeDelta, FormatError> {
        let part = |value: Option<u32>| i64::from(value.unwrap_or(0));
        [
            TimeDelta::try_days(part(self.days)),
            TimeDelta::try_hours(part(self.hours)),
            TimeDelta::try_minutes(part(self.minutes)),
            TimeDelta::try_seconds(part(self.seconds)),
            Some(TimeDelta::nanoseconds(part(self.nanos))),
        ]
        .into_iter()
        .try_fold(TimeDelta::zero(), |total, next| total.checked_add(&next?))
        .ok_or(FormatError::OutOfRange("duration"))
    }
}
