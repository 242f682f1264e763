//! A single calendar event and its occurrences.

use cadence_core::constants::PRODUCT_ID;
use cadence_rfc::error::RfcError;
use cadence_rfc::rfc::ical::build::serialize;
use cadence_rfc::rfc::ical::core::{
    Component, DateTime as IcalDateTime, DateTimeForm, Duration, Frequency, ICalendar,
    Property, RecurrenceRule, Value,
};
use cadence_rfc::rfc::ical::expand::{
    RuleExpansion, TimeZoneResolver, resolve_date, resolve_datetime,
};
use cadence_rfc::rfc::ical::parse::parse;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::instant::Instant;
use crate::occurrence::{collect_between, first_at_or_after};

/// VEVENT properties the event models itself. Everything else is kept verbatim.
const MODELLED_PROPERTIES: [&str; 8] = [
    "UID",
    "DTSTAMP",
    "DTSTART",
    "DTEND",
    "DURATION",
    "RRULE",
    "SUMMARY",
    "DESCRIPTION",
];

/// How DTSTART was written, so it is written back the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartForm {
    /// `DTSTART:20190716T040000Z`
    Utc,
    /// `DTSTART:20190716T040000`, local to the display timezone.
    Floating,
    /// `DTSTART;TZID=Europe/Berlin:20190716T040000`
    Zoned(String),
    /// `DTSTART;VALUE=DATE:20190716`
    Date,
}

/// Plain event fields, as an editor or API client would supply them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub start: DateTime<Utc>,
    pub weeks: Option<u32>,
    pub days: Option<u32>,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
    pub frequency: Option<Frequency>,
    pub interval: Option<u32>,
    /// `BYDAY` tokens such as `MO` or `-1FR`.
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default)]
    pub monthdays: Vec<i8>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

impl EventData {
    fn duration(&self) -> Option<Duration> {
        let parts = [self.weeks, self.days, self.hours, self.minutes, self.seconds];
        parts.iter().any(Option::is_some).then(|| {
            Duration::builder()
                .weeks(self.weeks.unwrap_or(0))
                .days(self.days.unwrap_or(0))
                .hours(self.hours.unwrap_or(0))
                .minutes(self.minutes.unwrap_or(0))
                .seconds(self.seconds.unwrap_or(0))
                .build()
        })
    }
}

/// A calendar event, possibly recurring.
///
/// Events are values: every `with_*` method returns a new event and leaves
/// the original untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    uid: String,
    dtstamp: DateTime<Utc>,
    start: Instant,
    start_form: StartForm,
    /// Zone the recurrence rule is evaluated in.
    rule_zone: Tz,
    timezone: Option<Tz>,
    duration: Option<Duration>,
    recurrence: Option<RecurrenceRule>,
    summary: Option<String>,
    description: Option<String>,
    extra_properties: Vec<Property>,
    children: Vec<Component>,
}

impl Event {
    /// ## Summary
    /// Reads the first VEVENT of an iCalendar document.
    ///
    /// A bare local DTSTART is interpreted in `timezone` (UTC when absent),
    /// a `Z` start is an absolute instant that `timezone` only displays, and a
    /// `TZID` start is local to its own zone. The rule is evaluated in that
    /// same zone, so a `Z` start recurs in UTC whatever `timezone` is. A DTEND
    /// without DURATION becomes a DURATION.
    ///
    /// ## Errors
    /// Returns an error for malformed text, an unknown timezone, a missing
    /// VEVENT or DTSTART, or a recurrence rule the iteration engine rejects.
    #[tracing::instrument(skip(text), fields(text_len = text.len()))]
    pub fn from_ical(text: &str, timezone: Option<&str>) -> ScheduleResult<Self> {
        let ical = parse(text).map_err(RfcError::from)?;
        let component = ical.first_event().ok_or(ScheduleError::MissingEvent)?;

        let mut resolver = TimeZoneResolver::new();
        let display = resolve_display_zone(timezone, &mut resolver)?;
        let floating_zone = display.unwrap_or(Tz::UTC);

        let dtstart = component
            .get_property("DTSTART")
            .ok_or(ScheduleError::MissingStart)?;
        let (start_utc, start_form) = match &dtstart.value {
            Value::DateTime(dt) => {
                let utc =
                    resolve_datetime(dt, floating_zone, &mut resolver).map_err(RfcError::from)?;
                let form = match &dt.form {
                    DateTimeForm::Utc => StartForm::Utc,
                    DateTimeForm::Floating => StartForm::Floating,
                    DateTimeForm::Zoned { tzid } => StartForm::Zoned(tzid.clone()),
                };
                (utc, form)
            }
            Value::Date(date) => (
                resolve_date(date, floating_zone).map_err(RfcError::from)?,
                StartForm::Date,
            ),
            _ => return Err(ScheduleError::MissingStart),
        };

        let rule_zone = match &start_form {
            StartForm::Zoned(tzid) => resolver.resolve(tzid).map_err(RfcError::from)?,
            StartForm::Utc => Tz::UTC,
            StartForm::Floating | StartForm::Date => floating_zone,
        };

        let duration = match component.get_property("DURATION").and_then(Property::as_duration) {
            Some(duration) => Some(*duration),
            None => end_as_duration(component, start_utc, floating_zone, &mut resolver)?,
        };

        let recurrence = component
            .get_property("RRULE")
            .and_then(Property::as_recur)
            .cloned();
        if let Some(rule) = &recurrence {
            RuleExpansion::new(rule, start_utc, rule_zone)?;
        }

        let dtstamp = match component.get_property("DTSTAMP").and_then(Property::as_datetime) {
            Some(dt) => resolve_datetime(dt, floating_zone, &mut resolver).map_err(RfcError::from)?,
            None => now(),
        };

        let event = Self {
            uid: component.uid().map_or_else(new_uid, str::to_string),
            dtstamp,
            start: Instant::new(start_utc, display.unwrap_or(rule_zone)),
            start_form,
            rule_zone,
            timezone: display,
            duration,
            recurrence,
            summary: non_blank(component.summary()),
            description: non_blank(component.description()),
            extra_properties: component
                .properties
                .iter()
                .filter(|p| !MODELLED_PROPERTIES.contains(&p.name.as_str()))
                .cloned()
                .collect(),
            children: component.children.clone(),
        };

        tracing::debug!(
            uid = %event.uid,
            start = %event.start,
            recurring = event.is_recurring(),
            "Read event"
        );

        Ok(event)
    }

    /// ## Summary
    /// Builds a new event from plain fields with a fresh UID and DTSTAMP.
    ///
    /// The start is kept to whole seconds. With a display timezone it is
    /// written back with that `TZID` and the rule keeps its wall-clock time
    /// there; without one it is written in UTC form.
    ///
    /// ## Errors
    /// Returns an error for an unknown timezone, a zero interval, malformed
    /// weekday tokens or month days, or a rule the iteration engine rejects.
    pub fn from_data(data: &EventData, timezone: Option<&str>) -> ScheduleResult<Self> {
        let mut resolver = TimeZoneResolver::new();
        let display = resolve_display_zone(timezone, &mut resolver)?;
        let rule_zone = display.unwrap_or(Tz::UTC);
        let start_form = match display {
            Some(zone) if zone != Tz::UTC => StartForm::Zoned(zone.name().to_string()),
            _ => StartForm::Utc,
        };
        let start_utc = data.start.trunc_subsecs(0);

        let recurrence = match data.frequency {
            Some(frequency) => {
                let interval = data.interval.unwrap_or(1);
                if interval == 0 {
                    return Err(ScheduleError::InvalidInterval(interval));
                }
                let rule =
                    RecurrenceRule::from_parts(frequency, interval, &data.weekdays, &data.monthdays)
                        .map_err(RfcError::from)?;
                RuleExpansion::new(&rule, start_utc, rule_zone)?;
                Some(rule)
            }
            None => None,
        };

        Ok(Self {
            uid: new_uid(),
            dtstamp: now(),
            start: Instant::new(start_utc, rule_zone),
            start_form,
            rule_zone,
            timezone: display,
            duration: data.duration(),
            recurrence,
            summary: non_blank(data.summary.as_deref()),
            description: non_blank(data.description.as_deref()),
            extra_properties: Vec::new(),
            children: Vec::new(),
        })
    }

    // Queries

    /// Start in the display timezone, or in the start's own zone when none was given.
    #[must_use]
    pub fn start_date(&self) -> DateTime<Tz> {
        self.start.local()
    }

    #[must_use]
    pub const fn start(&self) -> Instant {
        self.start
    }

    #[must_use]
    pub const fn start_utc(&self) -> DateTime<Utc> {
        self.start.utc()
    }

    #[must_use]
    pub const fn start_form(&self) -> &StartForm {
        &self.start_form
    }

    #[must_use]
    pub const fn duration(&self) -> Option<&Duration> {
        self.duration.as_ref()
    }

    /// Total duration in seconds, 0 when the event has none.
    #[must_use]
    pub fn duration_in_seconds(&self) -> i64 {
        self.duration.as_ref().map_or(0, Duration::as_seconds)
    }

    #[must_use]
    pub fn end_date(&self) -> Option<DateTime<Tz>> {
        let duration = self.duration.as_ref()?;
        Some(self.start_date() + duration.to_time_delta())
    }

    #[must_use]
    pub const fn recurrence(&self) -> Option<&RecurrenceRule> {
        self.recurrence.as_ref()
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[must_use]
    pub const fn dtstamp(&self) -> DateTime<Utc> {
        self.dtstamp
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    // Modifiers

    /// ## Summary
    /// Returns a copy with the recurrence rule replaced or removed.
    ///
    /// ## Errors
    /// Returns an error if the iteration engine rejects the rule.
    pub fn with_recurrence(&self, recurrence: Option<RecurrenceRule>) -> ScheduleResult<Self> {
        if let Some(rule) = &recurrence {
            RuleExpansion::new(rule, self.start_utc(), self.rule_zone)?;
        }
        Ok(Self {
            recurrence,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_duration(&self, duration: Option<Duration>) -> Self {
        Self {
            duration,
            ..self.clone()
        }
    }

    /// Returns a copy with the summary replaced. Blank text removes it.
    #[must_use]
    pub fn with_summary(&self, summary: Option<&str>) -> Self {
        Self {
            summary: non_blank(summary),
            ..self.clone()
        }
    }

    /// Returns a copy with the description replaced. Blank text removes it.
    #[must_use]
    pub fn with_description(&self, description: Option<&str>) -> Self {
        Self {
            description: non_blank(description),
            ..self.clone()
        }
    }

    // Occurrences

    /// Next occurrence at or after the current time.
    #[must_use]
    pub fn next_date(&self) -> Option<Instant> {
        self.next_date_after(now())
    }

    /// ## Summary
    /// First occurrence at or after `now`.
    ///
    /// A non-recurring event occurs once, at its start. For a recurring event
    /// failed draws are retried a bounded number of times; exhausting the
    /// budget returns `None`.
    #[must_use]
    pub fn next_date_after(&self, now: DateTime<Utc>) -> Option<Instant> {
        let Some(rule) = &self.recurrence else {
            return (self.start_utc() >= now).then_some(self.start);
        };

        let expansion = self.expansion(rule)?.starting_at(now);
        first_at_or_after(&mut expansion.cursor(), now).map(|utc| self.project(utc))
    }

    /// Occurrences from the current time up to and including `until`.
    #[must_use]
    pub fn next_dates(&self, until: DateTime<Utc>) -> Vec<Instant> {
        self.next_dates_between(now(), until)
    }

    /// ## Summary
    /// Ascending, duplicate-free occurrences in `[now, until]`.
    ///
    /// Empty for a non-recurring event. Exhausting the retry budget ends the
    /// list early with what was found so far.
    #[must_use]
    pub fn next_dates_between(&self, now: DateTime<Utc>, until: DateTime<Utc>) -> Vec<Instant> {
        let Some(rule) = &self.recurrence else {
            return Vec::new();
        };
        let Some(expansion) = self.expansion(rule) else {
            return Vec::new();
        };

        let expansion = expansion.starting_at(now);
        collect_between(&mut expansion.cursor(), now, until)
            .into_iter()
            .map(|utc| self.project(utc))
            .collect()
    }

    fn expansion(&self, rule: &RecurrenceRule) -> Option<RuleExpansion> {
        RuleExpansion::new(rule, self.start_utc(), self.rule_zone)
            .inspect_err(|error| {
                tracing::warn!(uid = %self.uid, %error, "Recurrence rule could not be expanded");
            })
            .ok()
    }

    fn project(&self, utc: DateTime<Utc>) -> Instant {
        Instant::new(utc, self.start.zone())
    }

    // Serialization

    /// ## Summary
    /// Builds the VEVENT: modelled properties first, then everything else
    /// that was read, unchanged.
    #[must_use]
    pub fn to_component(&self) -> Component {
        let mut event = Component::event();

        event.add_property(Property::text("UID", self.uid.clone()));
        event.add_property(Property::datetime(
            "DTSTAMP",
            IcalDateTime::from_utc(self.dtstamp),
        ));
        event.add_property(self.dtstart_property());

        if let Some(duration) = self.duration {
            event.add_property(Property::duration("DURATION", duration));
        }
        if let Some(rule) = &self.recurrence {
            event.add_property(Property::recur("RRULE", rule.clone()));
        }
        if let Some(summary) = &self.summary {
            event.add_property(Property::text("SUMMARY", summary.clone()));
        }
        if let Some(description) = &self.description {
            event.add_property(Property::text("DESCRIPTION", description.clone()));
        }

        for property in &self.extra_properties {
            event.add_property(property.clone());
        }
        for child in &self.children {
            event.add_child(child.clone());
        }

        event
    }

    /// Serializes the event as a complete VCALENDAR document.
    #[must_use]
    pub fn to_ical_string(&self) -> String {
        let mut ical = ICalendar::new(PRODUCT_ID);
        ical.add_event(self.to_component());
        serialize(&ical)
    }

    fn dtstart_property(&self) -> Property {
        let local = self.start_utc().with_timezone(&self.rule_zone).naive_local();
        match &self.start_form {
            StartForm::Utc => Property::datetime("DTSTART", IcalDateTime::from_utc(self.start_utc())),
            StartForm::Floating => Property::datetime(
                "DTSTART",
                IcalDateTime::from_naive(local, DateTimeForm::Floating),
            ),
            StartForm::Zoned(tzid) => Property::datetime(
                "DTSTART",
                IcalDateTime::from_naive(
                    local,
                    DateTimeForm::Zoned {
                        tzid: tzid.clone(),
                    },
                ),
            ),
            StartForm::Date => {
                let day = IcalDateTime::from_naive(local, DateTimeForm::Floating).date;
                Property::date("DTSTART", day)
            }
        }
    }
}

fn resolve_display_zone(
    timezone: Option<&str>,
    resolver: &mut TimeZoneResolver,
) -> ScheduleResult<Option<Tz>> {
    timezone
        .map(|name| resolver.resolve(name))
        .transpose()
        .map_err(|e| RfcError::from(e).into())
}

/// Converts DTEND into a duration relative to the start.
fn end_as_duration(
    component: &Component,
    start_utc: DateTime<Utc>,
    floating_zone: Tz,
    resolver: &mut TimeZoneResolver,
) -> ScheduleResult<Option<Duration>> {
    let Some(dtend) = component.get_property("DTEND") else {
        return Ok(None);
    };

    let end_utc = match &dtend.value {
        Value::DateTime(dt) => resolve_datetime(dt, floating_zone, resolver),
        Value::Date(date) => resolve_date(date, floating_zone),
        _ => {
            tracing::debug!(value = %dtend.raw_value, "Ignoring DTEND with unsupported value");
            return Ok(None);
        }
    }
    .map_err(RfcError::from)?;

    let span: TimeDelta = end_utc - start_utc;
    Ok(Some(Duration::from_seconds(span.num_seconds())))
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).map(str::to_string)
}

fn new_uid() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
