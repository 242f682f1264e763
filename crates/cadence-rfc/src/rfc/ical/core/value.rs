//! Property values (RFC 5545 §3.3).

use std::fmt;

use chrono::NaiveDate;

use super::{DateTime, Duration, RecurrenceRule};

/// `VALUE=DATE`: a day with no time of day. Fields are not range checked;
/// [`Date::to_naive`] is where an impossible day is caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// `None` for days such as Feb 30.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// A typed property value. The text it was read from lives next to it on
/// the property, so writing back never depends on these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Date(Date),
    DateTime(DateTime),
    Duration(Duration),
    Integer(i32),
    Recur(Box<RecurrenceRule>),
    /// Unescaped TEXT.
    Text(String),
    /// Anything not typed by the parser, kept as written.
    Verbatim(String),
}

impl Value {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_datetime(&self) -> Option<&DateTime> {
        if let Self::DateTime(dt) = self {
            Some(dt)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<&Date> {
        if let Self::Date(date) = self {
            Some(date)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_duration(&self) -> Option<&Duration> {
        if let Self::Duration(duration) = self {
            Some(duration)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_recur(&self) -> Option<&RecurrenceRule> {
        if let Self::Recur(rule) = self {
            Some(rule)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_verbatim(&self) -> bool {
        matches!(self, Self::Verbatim(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_display_is_basic_format() {
        assert_eq!(Date::new(2026, 1, 23).to_string(), "20260123");
    }

    #[test]
    fn impossible_day_has_no_naive_date() {
        assert!(Date::new(2026, 2, 30).to_naive().is_none());
        assert_eq!(
            Date::new(2024, 2, 29).to_naive(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn accessors_match_only_their_variant() {
        let value = Value::Text("Standup".to_string());
        assert_eq!(value.as_text(), Some("Standup"));
        assert!(value.as_duration().is_none());
        assert!(Value::Verbatim("x".to_string()).is_verbatim());
    }
}
