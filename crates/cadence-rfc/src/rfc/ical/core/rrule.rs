//! Recurrence rule value type (RFC 5545 §3.3.10, §3.8.5.3).
//!
//! Only the rule parts the scheduler edits are typed (`FREQ`, `INTERVAL`,
//! `BYDAY`, `BYMONTHDAY`, `COUNT`). Every other part is carried verbatim and
//! written back after the typed ones so the iteration engine still sees it.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{WeekdaySet, WeekdaySlot, parse_day_token};
use crate::rfc::ical::parse::{ParseError, ParseErrorKind, ParseResult, parse_rrule};

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week, in ISO order (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Zero-based position, Monday = 0.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            "SU" => Self::Sunday,
            _ => return None,
        })
    }

    /// Returns all weekdays in order (Monday through Sunday).
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
            Weekday::Sunday => Self::Sun,
        }
    }
}

/// Recurrence rule (RFC 5545 §3.3.10).
///
/// Absent `BYDAY`/`BYMONTHDAY` stay absent: an empty list is never stored,
/// so a rule always writes back the same parts it was read with.
///
/// `BYDAY` is kept as the full list of `(weekday, slot)` entries in rule
/// order, which is what iteration and `Display` use. [`WeekdaySet`] is the
/// one-slot-per-weekday view of that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: NonZeroU32,
    days: Vec<(Weekday, WeekdaySlot)>,
    weekdays: Option<WeekdaySet>,
    monthdays: Option<Vec<i8>>,
    count: Option<NonZeroU32>,
    extra_parts: Vec<(String, String)>,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency and every other part at its default.
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: NonZeroU32::MIN,
            days: Vec::new(),
            weekdays: None,
            monthdays: None,
            count: None,
            extra_parts: Vec::new(),
        }
    }

    /// ## Summary
    /// Builds a rule from structured fields, as an editor would supply them.
    ///
    /// `day_list` uses `BYDAY` tokens (`MO`, `2TU`, `-1FR`). Empty lists leave
    /// the corresponding rule part absent.
    ///
    /// ## Errors
    /// Returns a parse error for a zero interval, a malformed weekday ordinal,
    /// or a month day outside `1..=31` / `-31..=-1`.
    pub fn from_parts<S: AsRef<str>>(
        frequency: Frequency,
        interval: u32,
        day_list: &[S],
        monthdays: &[i8],
    ) -> ParseResult<Self> {
        let interval = NonZeroU32::new(interval).ok_or_else(|| {
            ParseError::unpositioned(ParseErrorKind::InvalidRRule)
                .with_context("INTERVAL must be positive")
        })?;
        Self::new(frequency)
            .with_interval(interval)
            .with_day_list(day_list)?
            .with_monthdays(monthdays.to_vec())
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval.get()
    }

    /// One slot per weekday. For `BYDAY=1MO,3MO` this holds `3MO`; use
    /// [`Self::day_list`] for every entry.
    #[must_use]
    pub const fn weekdays(&self) -> Option<&WeekdaySet> {
        self.weekdays.as_ref()
    }

    /// The `BYDAY` tokens in rule order, empty when the part is absent.
    #[must_use]
    pub fn day_list(&self) -> Vec<String> {
        self.days
            .iter()
            .filter_map(|(weekday, slot)| slot.token(*weekday))
            .collect()
    }

    #[must_use]
    pub fn monthdays(&self) -> Option<&[i8]> {
        self.monthdays.as_deref()
    }

    #[must_use]
    pub fn count(&self) -> Option<u32> {
        self.count.map(NonZeroU32::get)
    }

    /// Rule parts carried verbatim, as `(NAME, value)` in original order.
    #[must_use]
    pub fn extra_parts(&self) -> &[(String, String)] {
        &self.extra_parts
    }

    /// Returns the value of a verbatim rule part (e.g. `UNTIL`).
    #[must_use]
    pub fn extra_part(&self, name: &str) -> Option<&str> {
        self.extra_parts
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: NonZeroU32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the weekday selection. A set with every slot unset removes `BYDAY`.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.days = weekdays
            .iter()
            .filter(|(_, slot)| *slot != WeekdaySlot::Unset)
            .collect();
        self.weekdays = (!weekdays.is_default()).then_some(weekdays);
        self
    }

    /// ## Summary
    /// Sets `BYDAY` from tokens such as `1MO`, `3MO`, `-1FR`, keeping every
    /// distinct entry in order. Unknown weekday codes are skipped; a list
    /// with nothing left removes `BYDAY`.
    ///
    /// ## Errors
    /// Returns `InvalidWeekday` for a malformed ordinal.
    pub fn with_day_list<I, S>(mut self, tokens: I) -> ParseResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut days = Vec::new();
        for token in tokens {
            if let Some(day) = parse_day_token(token.as_ref())?
                && !days.contains(&day)
            {
                days.push(day);
            }
        }

        let set = days
            .iter()
            .fold(WeekdaySet::new(), |set, (weekday, slot)| set.set_weekday(*weekday, *slot));
        self.weekdays = (!set.is_default()).then_some(set);
        self.days = days;
        Ok(self)
    }

    #[must_use]
    pub fn without_weekdays(mut self) -> Self {
        self.days.clear();
        self.weekdays = None;
        self
    }

    /// ## Summary
    /// Sets the month days, sorted and de-duplicated. An empty list removes `BYMONTHDAY`.
    ///
    /// ## Errors
    /// Returns `InvalidMonthDay` for zero or any value outside `-31..=31`.
    pub fn with_monthdays(mut self, mut monthdays: Vec<i8>) -> ParseResult<Self> {
        if let Some(bad) = monthdays.iter().find(|d| !is_valid_monthday(**d)) {
            return Err(ParseError::unpositioned(ParseErrorKind::InvalidMonthDay)
                .with_context(format!("{bad} is not a day of the month")));
        }
        monthdays.sort_unstable();
        monthdays.dedup();
        self.monthdays = (!monthdays.is_empty()).then_some(monthdays);
        Ok(self)
    }

    #[must_use]
    pub const fn with_count(mut self, count: NonZeroU32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets a rule part the model does not type. The name is upper-cased; an
    /// existing part of that name keeps its position and takes the new value.
    #[must_use]
    pub fn with_extra_part(mut self, name: &str, value: impl Into<String>) -> Self {
        let name = name.to_ascii_uppercase();
        let value = value.into();
        match self.extra_parts.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.extra_parts.push((name, value)),
        }
        self
    }
}

const fn is_valid_monthday(day: i8) -> bool {
    matches!(day, 1..=31 | -31..=-1)
}

impl FromStr for RecurrenceRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rrule(s, 0, 0)
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.frequency)?;

        if self.interval.get() != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }

        if !self.days.is_empty() {
            write!(f, ";BYDAY={}", self.day_list().join(","))?;
        }

        if let Some(monthdays) = &self.monthdays {
            let s: Vec<_> = monthdays.iter().map(ToString::to_string).collect();
            write!(f, ";BYMONTHDAY={}", s.join(","))?;
        }

        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }

        for (name, value) in &self.extra_parts {
            write!(f, ";{name}={value}")?;
        }

        Ok(())
    }
}
