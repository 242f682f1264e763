//! UTC instants with a display timezone.

use std::fmt;

use cadence_rfc::rfc::ical::core::Weekday;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// A point in time stored in UTC, shown in `zone`.
///
/// Equality compares the instant and the zone; use [`Instant::utc`] to
/// compare points in time alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instant {
    utc: DateTime<Utc>,
    zone: Tz,
}

impl Instant {
    #[must_use]
    pub const fn new(utc: DateTime<Utc>, zone: Tz) -> Self {
        Self { utc, zone }
    }

    /// An instant shown in UTC.
    #[must_use]
    pub const fn in_utc(utc: DateTime<Utc>) -> Self {
        Self::new(utc, Tz::UTC)
    }

    #[must_use]
    pub const fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    #[must_use]
    pub const fn zone(&self) -> Tz {
        self.zone
    }

    /// Wall-clock view in the instant's zone.
    #[must_use]
    pub fn local(&self) -> DateTime<Tz> {
        self.utc.with_timezone(&self.zone)
    }

    /// The same instant shown in another zone.
    #[must_use]
    pub const fn project(&self, zone: Tz) -> Self {
        Self::new(self.utc, zone)
    }

    /// Local ISO weekday.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        chrono::Datelike::weekday(&self.local()).into()
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.local().to_rfc3339(), self.zone)
    }
}
