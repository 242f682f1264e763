//! Drawing occurrences from a rule iterator under a bounded retry budget.
//!
//! A single draw can fail when the iterator repeats an instant. Such draws
//! are discarded; once more than [`MAX_CONSECUTIVE_FAILURES`] fail in a row
//! the search gives up instead of erroring.

use cadence_core::constants::MAX_CONSECUTIVE_FAILURES;
use cadence_rfc::rfc::ical::expand::OccurrenceSource;
use chrono::{DateTime, Utc};

/// Counts consecutive failed draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    limit: u8,
    failures: u8,
}

impl RetryBudget {
    #[must_use]
    pub const fn new(limit: u8) -> Self {
        Self { limit, failures: 0 }
    }

    /// Records a failed draw. Returns `false` once the budget is exhausted.
    pub const fn record_failure(&mut self) -> bool {
        self.failures = self.failures.saturating_add(1);
        self.failures <= self.limit
    }

    pub const fn reset(&mut self) {
        self.failures = 0;
    }

    #[must_use]
    pub const fn failures(&self) -> u8 {
        self.failures
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::new(MAX_CONSECUTIVE_FAILURES)
    }
}

enum Draw {
    Candidate(DateTime<Utc>),
    Exhausted,
    GaveUp,
}

fn draw_with_retry<S: OccurrenceSource + ?Sized>(source: &mut S, budget: &mut RetryBudget) -> Draw {
    loop {
        match source.draw() {
            Ok(Some(candidate)) => {
                budget.reset();
                return Draw::Candidate(candidate);
            }
            Ok(None) => return Draw::Exhausted,
            Err(error) => {
                if !budget.record_failure() {
                    tracing::warn!(
                        failures = budget.failures(),
                        %error,
                        "Giving up on occurrence search after repeated failed draws"
                    );
                    return Draw::GaveUp;
                }
                tracing::debug!(failures = budget.failures(), %error, "Discarding failed draw");
            }
        }
    }
}

/// ## Summary
/// Returns the first candidate at or after `now`.
///
/// `None` when the source is exhausted or the retry budget runs out.
pub fn first_at_or_after<S: OccurrenceSource + ?Sized>(
    source: &mut S,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let mut budget = RetryBudget::default();
    loop {
        match draw_with_retry(source, &mut budget) {
            Draw::Candidate(candidate) if candidate >= now => return Some(candidate),
            Draw::Candidate(_) => {}
            Draw::Exhausted | Draw::GaveUp => return None,
        }
    }
}

/// ## Summary
/// Collects candidates in `[now, until]` in the order the source yields them.
///
/// Stops at the first candidate after `until`, when the source is exhausted,
/// or when the retry budget runs out (keeping what was collected).
pub fn collect_between<S: OccurrenceSource + ?Sized>(
    source: &mut S,
    now: DateTime<Utc>,
    until: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let mut budget = RetryBudget::default();
    let mut collected = Vec::new();

    loop {
        match draw_with_retry(source, &mut budget) {
            Draw::Candidate(candidate) if candidate > until => break,
            Draw::Candidate(candidate) if candidate >= now => collected.push(candidate),
            Draw::Candidate(_) => {}
            Draw::Exhausted | Draw::GaveUp => break,
        }
    }

    tracing::trace!(count = collected.len(), %now, %until, "Collected occurrences");
    collected
}
