//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_DAY_I64: i64 = 86_400;

/// Duration value (RFC 5545 §3.3.6).
///
/// iCalendar durations are written either week-based (`P1W`) or
/// day/time-based (`P1DT2H30M`). Year and month designators do not exist
/// because their length varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    /// Whether this duration is negative.
    pub negative: bool,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self {
            hours,
            ..Self::zero()
        }
    }

    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self {
            minutes,
            ..Self::zero()
        }
    }

    #[must_use]
    pub const fn builder() -> DurationBuilder {
        DurationBuilder::new()
    }

    /// ## Summary
    /// Decomposes a signed number of seconds into days, hours, minutes and seconds.
    ///
    /// Weeks are never produced so the result always serializes in day/time form.
    #[must_use]
    pub fn from_seconds(total: i64) -> Self {
        let magnitude = total.unsigned_abs();
        let clamp = |n: u64| u32::try_from(n).unwrap_or(u32::MAX);
        Self {
            negative: total < 0,
            weeks: 0,
            days: clamp(magnitude / SECONDS_PER_DAY),
            hours: clamp(magnitude % SECONDS_PER_DAY / SECONDS_PER_HOUR),
            minutes: clamp(magnitude % SECONDS_PER_HOUR / SECONDS_PER_MINUTE),
            seconds: clamp(magnitude % SECONDS_PER_MINUTE),
        }
    }

    #[must_use]
    pub const fn is_week_based(&self) -> bool {
        self.weeks > 0
    }

    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// Returns the total duration as seconds.
    #[must_use]
    pub fn as_seconds(&self) -> i64 {
        let total = i64::from(self.weeks) * 7 * SECONDS_PER_DAY_I64
            + i64::from(self.days) * SECONDS_PER_DAY_I64
            + i64::from(self.hours) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);

        if self.negative { -total } else { total }
    }

    /// Converts to a chrono span of exact seconds (days are always 24 hours).
    #[must_use]
    pub fn to_time_delta(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::seconds(self.as_seconds())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        let has_time = self.hours > 0 || self.minutes > 0 || self.seconds > 0;
        if self.weeks > 0 && self.days == 0 && !has_time {
            return write!(f, "{}W", self.weeks);
        }

        // RFC 5545 does not allow W next to other designators.
        let days = self.weeks.saturating_mul(7).saturating_add(self.days);
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if has_time {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if days == 0 {
            write!(f, "0D")?;
        } else {
            // Whole days only, already written
        }
        Ok(())
    }
}

/// Builder for constructing `Duration` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationBuilder {
    inner: Duration,
}

impl DurationBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Duration::zero(),
        }
    }

    #[must_use]
    pub const fn negative(mut self) -> Self {
        self.inner.negative = true;
        self
    }

    #[must_use]
    pub const fn weeks(mut self, weeks: u32) -> Self {
        self.inner.weeks = weeks;
        self
    }

    #[must_use]
    pub const fn days(mut self, days: u32) -> Self {
        self.inner.days = days;
        self
    }

    #[must_use]
    pub const fn hours(mut self, hours: u32) -> Self {
        self.inner.hours = hours;
        self
    }

    #[must_use]
    pub const fn minutes(mut self, minutes: u32) -> Self {
        self.inner.minutes = minutes;
        self
    }

    #[must_use]
    pub const fn seconds(mut self, seconds: u32) -> Self {
        self.inner.seconds = seconds;
        self
    }

    #[must_use]
    pub const fn build(self) -> Duration {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_display_weeks() {
        assert_eq!(Duration::builder().weeks(2).build().to_string(), "P2W");
    }

    #[test]
    fn duration_display_days_time() {
        let d = Duration::builder().days(1).hours(2).minutes(30).build();
        assert_eq!(d.to_string(), "P1DT2H30M");
    }

    #[test]
    fn duration_display_mixed_weeks_become_days() {
        let d = Duration::builder().weeks(1).days(2).hours(3).build();
        assert_eq!(d.to_string(), "P9DT3H");
    }

    #[test]
    fn duration_display_negative_and_zero() {
        assert_eq!(Duration::minutes(15).negate().to_string(), "-PT15M");
        assert_eq!(Duration::zero().to_string(), "P0D");
    }

    #[test]
    fn duration_as_seconds() {
        let d = Duration::builder()
            .weeks(1)
            .days(1)
            .hours(2)
            .minutes(30)
            .seconds(5)
            .build();
        assert_eq!(d.as_seconds(), 604_800 + 86_400 + 7_200 + 1_800 + 5);
        assert_eq!(Duration::minutes(15).negate().as_seconds(), -900);
    }

    #[test]
    fn from_seconds_decomposes() {
        let d = Duration::from_seconds(86_400 + 3_600 + 61);
        assert_eq!((d.days, d.hours, d.minutes, d.seconds), (1, 1, 1, 1));
        assert!(!d.negative);
        assert_eq!(d.to_string(), "P1DT1H1M1S");

        let d = Duration::from_seconds(-5_400);
        assert!(d.negative);
        assert_eq!(d.to_string(), "-PT1H30M");
        assert_eq!(d.to_time_delta(), chrono::TimeDelta::seconds(-5_400));
    }
}
