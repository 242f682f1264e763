//! Weekday selection for the `BYDAY` rule part.

use std::fmt;

use chrono::{Datelike, TimeZone};

use super::Weekday;
use crate::rfc::ical::parse::{ParseError, ParseErrorKind, ParseResult};

/// Largest ordinal `BYDAY` accepts (RFC 5545 §3.3.10, weeks in a year).
const MAX_ORDINAL: i8 = 53;

/// State of one weekday within a [`WeekdaySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeekdaySlot {
    /// Not selected.
    #[default]
    Unset,
    /// Every such weekday in the period (`MO`).
    Any,
    /// The n-th such weekday in the period, negative counts from the end (`2MO`, `-1FR`).
    Ordinal(i8),
}

impl WeekdaySlot {
    /// The `BYDAY` token for this slot on `weekday`; `None` when unset.
    #[must_use]
    pub fn token(self, weekday: Weekday) -> Option<String> {
        match self {
            Self::Unset => None,
            Self::Any => Some(weekday.as_str().to_string()),
            Self::Ordinal(n) => Some(format!("{n}{weekday}")),
        }
    }
}

/// ## Summary
/// Decodes one `BYDAY` token such as `MO`, `+2TU` or `-1FR` (case-insensitive).
///
/// Returns `None` for a token too short to hold a weekday code or with an
/// unknown code.
///
/// ## Errors
/// Returns `InvalidWeekday` when an ordinal prefix is not an integer, is
/// zero, or lies outside `-53..=53`.
pub fn parse_day_token(token: &str) -> ParseResult<Option<(Weekday, WeekdaySlot)>> {
    let token = token.trim();
    let Some((split, _)) = token.char_indices().rev().nth(1) else {
        tracing::debug!(token, "Ignoring weekday token that is too short");
        return Ok(None);
    };
    let (prefix, code) = token.split_at(split);

    let Some(weekday) = Weekday::parse(code) else {
        tracing::debug!(token, "Ignoring unknown weekday code");
        return Ok(None);
    };

    let slot = if prefix.is_empty() {
        WeekdaySlot::Any
    } else {
        WeekdaySlot::Ordinal(parse_ordinal(prefix, token)?)
    };
    Ok(Some((weekday, slot)))
}

/// Seven fixed weekday slots, Monday through Sunday.
///
/// The set is a value type: every modifier returns a new set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet {
    slots: [WeekdaySlot; 7],
}

impl WeekdaySet {
    /// Creates a set with every slot unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [WeekdaySlot::Unset; 7],
        }
    }

    /// ## Summary
    /// Builds a set from `BYDAY` tokens such as `MO`, `+2TU` or `-1FR` (case-insensitive).
    ///
    /// Tokens with an unknown weekday code are skipped. Returns `None` when no
    /// weekday ends up selected, including for an empty list. Each weekday has
    /// a single slot, so for `1MO,3MO` the set holds `3MO`; a
    /// [`RecurrenceRule`](super::RecurrenceRule) keeps the full list.
    ///
    /// ## Errors
    /// Returns `InvalidWeekday` for a malformed ordinal, see [`parse_day_token`].
    pub fn from_day_list<I, S>(parts: I) -> ParseResult<Option<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for part in parts {
            if let Some((weekday, slot)) = parse_day_token(part.as_ref())? {
                set.slots[weekday.index()] = slot;
            }
        }
        Ok((!set.is_default()).then_some(set))
    }

    /// Returns one token per selected weekday, Monday first.
    #[must_use]
    pub fn to_day_list(&self) -> Vec<String> {
        self.iter()
            .filter_map(|(weekday, slot)| slot.token(weekday))
            .collect()
    }

    #[must_use]
    pub const fn get(&self, weekday: Weekday) -> WeekdaySlot {
        self.slots[weekday.index()]
    }

    /// Returns a copy with one slot replaced.
    #[must_use]
    pub const fn set_weekday(&self, weekday: Weekday, slot: WeekdaySlot) -> Self {
        let mut slots = self.slots;
        slots[weekday.index()] = slot;
        Self { slots }
    }

    /// Returns a copy with `weekday` selected for every week.
    #[must_use]
    pub const fn set_weekday_any(&self, weekday: Weekday) -> Self {
        self.set_weekday(weekday, WeekdaySlot::Any)
    }

    /// Returns a copy with the instant's local weekday selected.
    #[must_use]
    pub fn set_from_instant<Tz: TimeZone>(&self, instant: &chrono::DateTime<Tz>) -> Self {
        self.set_weekday_any(instant.weekday().into())
    }

    /// The first selected weekday, Monday first.
    #[must_use]
    pub fn selected_weekday(&self) -> Option<Weekday> {
        self.iter()
            .find(|(_, slot)| *slot != WeekdaySlot::Unset)
            .map(|(weekday, _)| weekday)
    }

    /// Whether every slot is unset.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.slots.iter().all(|slot| *slot == WeekdaySlot::Unset)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, WeekdaySlot)> + '_ {
        Weekday::all()
            .into_iter()
            .map(|weekday| (weekday, self.get(weekday)))
    }
}

fn parse_ordinal(prefix: &str, token: &str) -> ParseResult<i8> {
    let invalid = || {
        ParseError::unpositioned(ParseErrorKind::InvalidWeekday)
            .with_context(format!("bad ordinal in '{token}'"))
    };
    let n = prefix.parse::<i8>().map_err(|_e| invalid())?;
    if n == 0 || !(-MAX_ORDINAL..=MAX_ORDINAL).contains(&n) {
        return Err(invalid());
    }
    Ok(n)
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_day_list().join(","))
    }
}
