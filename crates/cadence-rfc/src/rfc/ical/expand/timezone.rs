//! Timezone resolution and UTC conversion for iCalendar date-times.
//!
//! TZIDs are resolved against the IANA database shipped with `chrono-tz`.
//! A small table maps the Windows names some clients emit.

use chrono::{DateTime, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::str::FromStr;

use crate::rfc::ical::core::{self, DateTimeForm};

/// Error during timezone conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Ambiguous time during DST fold.
    #[error("Ambiguous time (DST fold): {0}")]
    AmbiguousTime(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),

    /// Invalid datetime format.
    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),
}

/// Resolver for timezone identifiers.
///
/// Maintains a cache of resolved timezones keyed by the TZID as written.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// Vendor-prefixed and common Windows TZIDs are normalized first.
    ///
    /// ## Errors
    ///
    /// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions to avoid repeated parsing.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ConversionError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(normalized.trim())
            .map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))?;

        tracing::trace!(tzid, resolved = %tz, "Resolved timezone");
        self.cache.insert(tzid.to_string(), tz);

        Ok(tz)
    }
}

/// Normalizes common CalDAV/iCalendar timezone identifiers to IANA names.
fn normalize_tzid(tzid: &str) -> &str {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    match stripped {
        "Eastern Standard Time" => "America/New_York",
        "Central Standard Time" => "America/Chicago",
        "Mountain Standard Time" => "America/Denver",
        "Pacific Standard Time" => "America/Los_Angeles",
        "GMT Standard Time" => "Europe/London",
        "W. Europe Standard Time" => "Europe/Berlin",
        "Romance Standard Time" => "Europe/Paris",
        "Central European Standard Time" => "Europe/Warsaw",
        "Tokyo Standard Time" => "Asia/Tokyo",
        "AUS Eastern Standard Time" => "Australia/Sydney",
        other => other,
    }
}

/// ## Summary
/// Interprets a wall-clock time in `tz`, shifting times inside a DST gap
/// forward by one hour. A time inside a DST fold takes the earlier instant.
///
/// ## Errors
///
/// Returns `ConversionError::NonExistentTime` if the shifted time still
/// does not exist.
pub fn localize_lenient(local_time: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, ConversionError> {
    match localize(local_time, tz) {
        Err(ConversionError::NonExistentTime(_)) => {
            let shifted = local_time + chrono::TimeDelta::hours(1);
            tracing::debug!(%local_time, %shifted, %tz, "Shifted time out of DST gap");
            localize(shifted, tz)
        }
        other => other,
    }
}

fn localize(local_time: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, ConversionError> {
    match tz.from_local_datetime(&local_time) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{local_time} in timezone {tz}"
        ))),
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // RFC 5545 §3.3.5: the first occurrence of a repeated time is meant
        LocalResult::Ambiguous(earlier, _later) => Ok(earlier.with_timezone(&Utc)),
    }
}

/// ## Summary
/// Converts a local datetime to UTC using the specified timezone.
///
/// ## Errors
///
/// Returns an error if the timezone cannot be resolved or the local time
/// falls in a DST gap.
///
/// ## Side Effects
///
/// Updates the timezone resolver's cache if a new timezone is resolved.
pub fn convert_to_utc(
    local_time: NaiveDateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime<Utc>, ConversionError> {
    let tz = resolver.resolve(tzid)?;
    localize(local_time, tz)
}

/// ## Summary
/// Converts a local datetime to UTC, shifting DST-gap times forward one hour.
///
/// ## Errors
///
/// Returns an error if the timezone cannot be resolved.
///
/// ## Side Effects
///
/// Updates the timezone resolver's cache if a new timezone is resolved.
pub fn convert_to_utc_lenient(
    local_time: NaiveDateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime<Utc>, ConversionError> {
    let tz = resolver.resolve(tzid)?;
    localize_lenient(local_time, tz)
}

/// ## Summary
/// Resolves a parsed DATE-TIME to a UTC instant.
///
/// UTC values are taken as-is, zoned values are interpreted in their TZID,
/// and floating values in `floating_zone`.
///
/// ## Errors
///
/// Returns an error for an impossible calendar value or an unknown TZID.
pub fn resolve_datetime(
    dt: &core::DateTime,
    floating_zone: Tz,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime<Utc>, ConversionError> {
    let naive = dt
        .to_naive()
        .ok_or_else(|| ConversionError::InvalidDateTime(dt.to_string()))?;

    match &dt.form {
        DateTimeForm::Utc => Ok(naive.and_utc()),
        DateTimeForm::Zoned { tzid } => convert_to_utc_lenient(naive, tzid, resolver),
        DateTimeForm::Floating => localize_lenient(naive, floating_zone),
    }
}

/// ## Summary
/// Resolves an all-day DATE to the instant of local midnight in `tz`.
///
/// ## Errors
///
/// Returns an error for an impossible calendar date.
pub fn resolve_date(date: &core::Date, tz: Tz) -> Result<DateTime<Utc>, ConversionError> {
    let day = date
        .to_naive()
        .ok_or_else(|| ConversionError::InvalidDateTime(date.to_string()))?;
    localize_lenient(day.and_time(NaiveTime::MIN), tz)
}
