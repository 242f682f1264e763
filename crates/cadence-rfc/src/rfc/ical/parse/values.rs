//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! Error sources are intentionally discarded during parsing (`map_err_ignore`)
//! until richer error types are implemented for value-level parsing.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers intentionally discard error sources pending richer error types"
)]

use std::num::NonZeroU32;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, RecurrenceRule,
};

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    let err = || ParseError::new(ParseErrorKind::InvalidDate, line, col);
    if s.len() != 8 || !all_digits(s) {
        return Err(err());
    }

    let year = s[0..4].parse::<u16>().map_err(|_| err())?;
    let month = s[4..6].parse::<u8>().map_err(|_| err())?;
    let day = s[6..8].parse::<u8>().map_err(|_| err())?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(err());
    }

    Ok(Date { year, month, day })
}

/// Parses a TIME value (RFC 5545 §3.3.12) into `(hour, minute, second, is_utc)`.
fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<(u8, u8, u8, bool)> {
    let err = || ParseError::new(ParseErrorKind::InvalidTime, line, col);
    let (time_str, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time_str.len() != 6 || !all_digits(time_str) {
        return Err(err());
    }

    let hour = time_str[0..2].parse::<u8>().map_err(|_| err())?;
    let minute = time_str[2..4].parse::<u8>().map_err(|_| err())?;
    let second = time_str[4..6].parse::<u8>().map_err(|_| err())?;

    // Allow 60 for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(err());
    }

    Ok((hour, minute, second, is_utc))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// TZID is a property parameter, so the caller passes it in.
///
/// ## Errors
/// Returns an error if the string is not a valid datetime format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let (date_str, time_str) = s
        .split_once('T')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(date_str, line, col)?;
    let (hour, minute, second, is_utc) = parse_time(time_str, line, col + date_str.len() + 1)?;

    let form = if is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime::new(date, hour, minute, second, form))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: [+|-]P[nW] or [+|-]P[nD][T[nH][nM][nS]]
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);

    let (negative, rest) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    };
    let rest = rest.strip_prefix('P').ok_or_else(err)?;

    let mut dur = Duration {
        negative,
        ..Duration::zero()
    };
    let mut in_time = false;
    let mut seen_component = false;
    let mut digits = String::new();

    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if c == 'T' {
            if in_time || !digits.is_empty() {
                return Err(err());
            }
            in_time = true;
            continue;
        }

        let n = digits.parse::<u32>().map_err(|_| err())?;
        digits.clear();
        match (c, in_time) {
            ('W', false) => dur.weeks = n,
            ('D', false) => dur.days = n,
            ('H', true) => dur.hours = n,
            ('M', true) => dur.minutes = n,
            ('S', true) => dur.seconds = n,
            _ => return Err(err()),
        }
        seen_component = true;
    }

    if !digits.is_empty() || !seen_component {
        return Err(err());
    }

    Ok(dur)
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, col))
}

/// Parses a RECUR (RRULE) value (RFC 5545 §3.3.10).
///
/// `FREQ`, `INTERVAL`, `BYDAY`, `BYMONTHDAY` and `COUNT` are typed; every
/// other rule part is kept verbatim, in order, for the iteration engine.
///
/// ## Errors
/// Returns an error for a missing or unknown `FREQ`, a part without `=`,
/// a non-positive `INTERVAL`/`COUNT`, a malformed `BYDAY` ordinal, a bad
/// `BYMONTHDAY` entry, or `COUNT` together with `UNTIL`.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<RecurrenceRule> {
    let err = |kind| ParseError::new(kind, line, col);

    let mut frequency = None;
    let mut interval = None;
    let mut count = None;
    let mut day_list = None;
    let mut monthdays = Vec::new();
    let mut extra_parts: Vec<(String, &str)> = Vec::new();

    for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').ok_or_else(|| {
            err(ParseErrorKind::InvalidRRule).with_context(format!("rule part '{part}' has no '='"))
        })?;

        match key.to_ascii_uppercase().as_str() {
            "FREQ" => {
                frequency = Some(Frequency::parse(value).ok_or_else(|| {
                    err(ParseErrorKind::InvalidFrequency).with_context(value.to_string())
                })?);
            }
            "INTERVAL" => interval = Some(parse_positive(value, "INTERVAL", line, col)?),
            "COUNT" => count = Some(parse_positive(value, "COUNT", line, col)?),
            "BYDAY" => day_list = Some(value),
            "BYMONTHDAY" => monthdays = parse_monthday_list(value, line, col)?,
            other => extra_parts.push((other.to_string(), value)),
        }
    }

    let frequency =
        frequency.ok_or_else(|| err(ParseErrorKind::InvalidRRule).with_context("missing FREQ"))?;

    if count.is_some() && extra_parts.iter().any(|(key, _)| key == "UNTIL") {
        return Err(err(ParseErrorKind::UntilCountConflict));
    }

    let mut rule = RecurrenceRule::new(frequency);
    if let Some(interval) = interval {
        rule = rule.with_interval(interval);
    }
    if let Some(days) = day_list {
        rule = rule
            .with_day_list(days.split(','))
            .map_err(|e| e.at(line, col))?;
    }
    rule = rule
        .with_monthdays(monthdays)
        .map_err(|e| e.at(line, col))?;
    if let Some(count) = count {
        rule = rule.with_count(count);
    }

    Ok(extra_parts
        .into_iter()
        .fold(rule, |rule, (key, value)| rule.with_extra_part(&key, value)))
}

fn parse_positive(value: &str, part: &str, line: usize, col: usize) -> ParseResult<NonZeroU32> {
    value.trim().parse::<NonZeroU32>().map_err(|_| {
        ParseError::new(ParseErrorKind::InvalidRRule, line, col)
            .with_context(format!("{part} must be a positive integer, got '{value}'"))
    })
}

fn parse_monthday_list(s: &str, line: usize, col: usize) -> ParseResult<Vec<i8>> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<i8>().map_err(|_| {
                ParseError::new(ParseErrorKind::InvalidMonthDay, line, col)
                    .with_context(format!("'{v}' is not a day of the month"))
            })
        })
        .collect()
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
