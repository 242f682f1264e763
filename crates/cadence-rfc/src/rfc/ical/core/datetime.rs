//! DATE-TIME values (RFC 5545 §3.3.5).

use std::fmt;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Utc};

use super::Date;

/// How a DATE-TIME relates to a timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeForm {
    /// `19980118T230000`: wall-clock time with no zone attached.
    Floating,
    /// `19980119T070000Z`
    Utc,
    /// `TZID=America/New_York:19980119T020000`
    Zoned { tzid: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub hour: u8,
    pub minute: u8,
    /// Up to 60 for a leap second.
    pub second: u8,
    pub form: DateTimeForm,
}

impl DateTime {
    #[must_use]
    pub const fn new(date: Date, hour: u8, minute: u8, second: u8, form: DateTimeForm) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            form,
        }
    }

    /// ## Summary
    /// Takes the wall-clock fields of `naive` and writes them in `form`.
    ///
    /// Years outside 0..=9999 have no iCalendar spelling and are clamped.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "chrono keeps month, day and time fields in range and the year is clamped"
    )]
    pub fn from_naive(naive: NaiveDateTime, form: DateTimeForm) -> Self {
        let date = Date::new(
            naive.year().clamp(0, 9999) as u16,
            naive.month() as u8,
            naive.day() as u8,
        );
        Self::new(
            date,
            naive.hour() as u8,
            naive.minute() as u8,
            naive.second() as u8,
            form,
        )
    }

    #[must_use]
    pub fn from_utc(instant: chrono::DateTime<Utc>) -> Self {
        Self::from_naive(instant.naive_utc(), DateTimeForm::Utc)
    }

    /// Wall-clock value with no zone applied. `None` for impossible fields
    /// such as Feb 30 or hour 25; a leap second reads as second 59.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let time = NaiveTime::from_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second.min(59)),
        )?;
        Some(self.date.to_naive()?.and_time(time))
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    #[must_use]
    pub const fn is_floating(&self) -> bool {
        matches!(self.form, DateTimeForm::Floating)
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        if let DateTimeForm::Zoned { tzid } = &self.form {
            Some(tzid)
        } else {
            None
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zulu = if self.is_utc() { "Z" } else { "" };
        write!(
            f,
            "{}T{:02}{:02}{:02}{zulu}",
            self.date, self.hour, self.minute, self.second
        )
    }
}
