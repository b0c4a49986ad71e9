// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Date/time patterns.
//!
//! ```text
//! y yy yyyy   year (1-2 digit years: 00-49 -> 20xx, 50-99 -> 19xx)
//! M MM        month        MMM MMMM  month name (English)
//! d dd        day          ddd dddd  weekday name (must match date)
//! h hh        hour 1-12    H HH      hour 0-23
//! m mm        minute       s ss      second
//! f..fffffff  exact fraction digits   F..FFFFFFF optional fraction digits
//! t tt        A/P, AM/PM
//! g z K       unsupported
//! ```
//!
//! Fields are read with exact widths here and resolved by
//! `chrono::format::Parsed`, which rejects conflicting hours, a weekday that
//! does not match the date, and dates that do not exist.

use chrono::format::Parsed;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};

use super::{Cursor, FormatError, Token, bounded, tokenize, width};

static MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

const MAX_FRACTION_DIGITS: usize = 7;
const MAX_YEAR_DIGITS: usize = 9;

/// Parses `input` against `pattern` exactly.
///
/// # Errors
///
/// Returns [`FormatError`] if the pattern is malformed, the input does not
/// follow it, or the resulting date/time does not exist.
pub fn parse_date_time(input: &str, pattern: &str) -> Result<NaiveDateTime, FormatError> {
    parse_date_time_on(input, pattern, Local::now().date_naive())
}

/// Like [`parse_date_time`], with `today` supplying missing date fields.
pub(super) fn parse_date_time_on(
    input: &str,
    pattern: &str,
    today: NaiveDate,
) -> Result<NaiveDateTime, FormatError> {
    let tokens = tokenize(pattern)?;
    let mut reader = FieldReader {
        cursor: Cursor::new(input),
        parsed: Parsed::new(),
        has_designator: specifies(&tokens, 't', usize::MAX),
        pattern,
    };

    for &token in &tokens {
        match token {
            Token::Literal(c) => reader.cursor.literal(c)?,
            Token::Field { letter, count } => reader.field(letter, count)?,
        }
    }
    reader.cursor.finish()?;

    resolve(reader.parsed, &tokens, today)
}

/// Whether `tokens` contain `letter` repeated at most `max_count` times.
fn specifies(tokens: &[Token], letter: char, max_count: usize) -> bool {
    tokens
        .iter()
        .any(|token| matches!(*token, Token::Field { letter: l, count } if l == letter && count <= max_count))
}

struct FieldReader<'a> {
    cursor: Cursor<'a>,
    parsed: Parsed,
    has_designator: bool,
    pattern: &'a str,
}

impl FieldReader<'_> {
    fn field(&mut self, letter: char, count: usize) -> Result<(), FormatError> {
        match letter {
            'y' => {
                if count > MAX_YEAR_DIGITS {
                    return Err(FormatError::invalid_pattern(self.pattern, "year field is too long"));
                }
                let (min, max) = width(count);
                let raw = self.cursor.digits(min, max)?;
                let year = if count <= 2 { two_digit_year(raw) } else { signed(raw)? };
                self.parsed.set_year(year)?;
            }
            'M' => {
                let month = if count >= 3 {
                    let names: Vec<&str> = if count == 3 {
                        MONTHS.iter().map(|m| &m[..3]).collect()
                    } else {
                        MONTHS.to_vec()
                    };
                    let index = self.cursor.keyword(&names)?;
                    i64::try_from(index).map_err(|_| FormatError::OutOfRange("month"))? + 1
                } else {
                    self.number(count)?
                };
                self.parsed.set_month(month)?;
            }
            'd' if count >= 3 => {
                let names: Vec<&str> = WEEKDAYS
                    .iter()
                    .map(|(_, name)| if count == 3 { &name[..3] } else { *name })
                    .collect();
                self.parsed.set_weekday(WEEKDAYS[self.cursor.keyword(&names)?].0)?;
            }
            'd' => {
                let day = self.number(count)?;
                self.parsed.set_day(day)?;
            }
            'h' => {
                let hour = self.number(count.min(2))?;
                if self.has_designator {
                    self.parsed.set_hour12(hour)?;
                } else {
                    // Without AM/PM the 12-hour value is taken as is.
                    let hour = bounded(hour.unsigned_abs(), 12, "hour")?;
                    self.parsed.set_hour(i64::from(hour))?;
                }
            }
            'H' => {
                let hour = self.number(count.min(2))?;
                self.parsed.set_hour(hour)?;
            }
            'm' => {
                let minute = self.number(count.min(2))?;
                self.parsed.set_minute(minute)?;
            }
            's' => {
                // `Parsed` admits a leap second; exact formats do not.
                let second = bounded(self.number(count.min(2))?.unsigned_abs(), 59, "second")?;
                self.parsed.set_second(i64::from(second))?;
            }
            'f' | 'F' => {
                if count > MAX_FRACTION_DIGITS {
                    return Err(FormatError::invalid_pattern(self.pattern, "fraction field is too long"));
                }
                let min = if letter == 'f' { count } else { 0 };
                let nanos = self.cursor.fraction(min, count)?;
                self.parsed.set_nanosecond(i64::from(nanos))?;
            }
            't' => {
                let designators: [&str; 2] = if count == 1 { ["A", "P"] } else { ["AM", "PM"] };
                let pm = self.cursor.keyword(&designators)? == 1;
                self.parsed.set_ampm(pm)?;
            }
            'g' | 'z' | 'K' => {
                return Err(FormatError::invalid_pattern(
                    self.pattern,
                    "era and offset specifiers are not supported",
                ));
            }
            other => {
                for _ in 0..count {
                    self.cursor.literal(other)?;
                }
            }
        }
        Ok(())
    }

    /// Reads a numeric field of `count` letters.
    fn number(&mut self, count: usize) -> Result<i64, FormatError> {
        let (min, max) = width(count);
        signed(self.cursor.digits(min, max)?)
    }
}

/// Fills the fields the pattern leaves out, then lets `Parsed` check the rest.
fn resolve(mut parsed: Parsed, tokens: &[Token], today: NaiveDate) -> Result<NaiveDateTime, FormatError> {
    let has_year = specifies(tokens, 'y', usize::MAX);
    let has_month = specifies(tokens, 'M', usize::MAX);
    let has_day = specifies(tokens, 'd', 2);

    if !(has_year || has_month || has_day) {
        parsed.set_year(i64::from(today.year()))?;
        parsed.set_month(i64::from(today.month()))?;
        parsed.set_day(i64::from(today.day()))?;
    } else {
        if !has_year {
            parsed.set_year(i64::from(today.year()))?;
        }
        if !has_month {
            parsed.set_month(1)?;
        }
        if !has_day {
            parsed.set_day(1)?;
        }
    }

    if !(specifies(tokens, 'h', usize::MAX) || specifies(tokens, 'H', usize::MAX)) {
        // A lone designator means 12 AM or 12 PM.
        if specifies(tokens, 't', usize::MAX) {
            parsed.set_hour12(12)?;
        } else {
            parsed.set_hour(0)?;
        }
    }
    if !specifies(tokens, 'm', usize::MAX) {
        parsed.set_minute(0)?;
    }

    let date = parsed.to_naive_date()?;
    let time = parsed.to_naive_time()?;
    Ok(date.and_time(time))
}

fn signed(value: u64) -> Result<i64, FormatError> {
    i64::try_from(value).map_err(|_| FormatError::OutOfRange("numeric field"))
}

/// Maps a one- or two-digit year into 1950..=2049.
fn two_digit_year(raw: u64) -> i64 {
    // `raw` has at most two digits here.
    let raw = i64::try_from(raw).unwrap_or(0);
    if raw < 50 { 2000 + raw } else { 1900 + raw }
}
