//! Recurrence iteration backed by the `rrule` crate.

use std::borrow::Cow;

use chrono::{DateTime, TimeDelta, Utc};
use rrule::{RRule, RRuleSet, Unvalidated};

use super::timezone::{ConversionError, localize_lenient};
use crate::error::RfcResult;
use crate::rfc::ical::core::RecurrenceRule;
use crate::rfc::ical::parse::{parse_date, parse_datetime};

/// Error raised for a single degenerate draw from a rule iterator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IterationError {
    /// The iterator produced an instant that is not after the previous one.
    #[error("rule produced {0} again or out of order")]
    RepeatedDate(DateTime<Utc>),
}

/// A stream of occurrence candidates where a single draw may fail.
pub trait OccurrenceSource {
    /// ## Summary
    /// Draws the next candidate.
    ///
    /// `Ok(None)` means the stream is exhausted.
    ///
    /// ## Errors
    /// Returns an error when this draw produced no usable candidate. Later
    /// draws may still succeed.
    fn draw(&mut self) -> Result<Option<DateTime<Utc>>, IterationError>;
}

/// A recurrence rule anchored to a start instant and evaluation timezone.
///
/// Evaluating in the start's own zone keeps wall-clock times stable across
/// DST transitions.
#[derive(Debug, Clone)]
pub struct RuleExpansion {
    set: RRuleSet,
}

impl RuleExpansion {
    /// ## Summary
    /// Builds the iteration engine's rule set for `rule` starting at `start`.
    ///
    /// A floating or DATE `UNTIL` is read as local to `zone`.
    ///
    /// ## Errors
    /// Returns an error for a malformed `UNTIL`, or if the iteration engine
    /// rejects the rule, e.g. a rule part combination it does not support.
    pub fn new(rule: &RecurrenceRule, start: DateTime<Utc>, zone: chrono_tz::Tz) -> RfcResult<Self> {
        let text = with_utc_until(rule, zone)?.to_string();
        let unvalidated: RRule<Unvalidated> = text.parse()?;
        let dt_start = start.with_timezone(&rrule::Tz::Tz(zone));
        let set = unvalidated.build(dt_start)?;

        tracing::trace!(rule = %text, %start, %zone, "Built rule expansion");

        Ok(Self { set })
    }

    /// ## Summary
    /// Restricts iteration to candidates at or after `now`.
    #[must_use]
    pub fn starting_at(self, now: DateTime<Utc>) -> Self {
        // The engine's lower bound is exclusive; candidates are whole seconds
        let bound = (now - TimeDelta::seconds(1)).with_timezone(&rrule::Tz::UTC);
        Self {
            set: self.set.after(bound),
        }
    }

    /// Returns a fresh cursor over the rule's occurrences.
    #[must_use]
    pub fn cursor(&self) -> RuleCursor<'_> {
        RuleCursor {
            inner: (&self.set).into_iter(),
            previous: None,
        }
    }
}

/// The engine only accepts a UTC `UNTIL` next to a zoned start, so a
/// floating DATE-TIME is localized in `zone` and a DATE becomes the last
/// second of that day there.
fn with_utc_until(rule: &RecurrenceRule, zone: chrono_tz::Tz) -> RfcResult<Cow<'_, RecurrenceRule>> {
    let Some(until) = rule.extra_part("UNTIL") else {
        return Ok(Cow::Borrowed(rule));
    };
    if until.ends_with('Z') {
        return Ok(Cow::Borrowed(rule));
    }

    let local = if until.contains('T') {
        parse_datetime(until, None, 0, 0)?.to_naive()
    } else {
        parse_date(until, 0, 0)?
            .to_naive()
            .and_then(|day| day.and_hms_opt(23, 59, 59))
    }
    .ok_or_else(|| ConversionError::InvalidDateTime(until.to_string()))?;

    let anchored = localize_lenient(local, zone)?
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    tracing::trace!(until, %anchored, %zone, "Anchored local UNTIL");

    Ok(Cow::Owned(rule.clone().with_extra_part("UNTIL", anchored)))
}

/// Forward cursor over a [`RuleExpansion`] that reports repeated instants.
pub struct RuleCursor<'a> {
    inner: <&'a RRuleSet as IntoIterator>::IntoIter,
    previous: Option<DateTime<Utc>>,
}

impl OccurrenceSource for RuleCursor<'_> {
    fn draw(&mut self) -> Result<Option<DateTime<Utc>>, IterationError> {
        let Some(candidate) = self.inner.next() else {
            return Ok(None);
        };
        let candidate = candidate.with_timezone(&Utc);

        if let Some(previous) = self.previous
            && candidate <= previous
        {
            return Err(IterationError::RepeatedDate(candidate));
        }

        self.previous = Some(candidate);
        Ok(Some(candidate))
    }
}
