//! Builds the component tree from content lines.

use std::vec;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::{
    parse_date, parse_datetime, parse_duration, parse_integer, parse_rrule, unescape_text,
};
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property, Value};

/// DATE-TIME properties that also accept `VALUE=DATE`.
const DATE_OR_DATETIME: [&str; 6] = [
    "DTSTART",
    "DTEND",
    "DTSTAMP",
    "CREATED",
    "LAST-MODIFIED",
    "RECURRENCE-ID",
];

const TEXT_PROPERTIES: [&str; 16] = [
    "UID",
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "COMMENT",
    "CONTACT",
    "STATUS",
    "CLASS",
    "TRANSP",
    "PRODID",
    "VERSION",
    "CALSCALE",
    "METHOD",
    "TZID",
    "TZNAME",
    "ACTION",
];

/// ## Summary
/// Parses a VCALENDAR document.
///
/// Properties without a typed reading are kept verbatim, along with unknown
/// components, so the document writes back without loss. Anything after
/// `END:VCALENDAR` is ignored.
///
/// ## Errors
/// Returns an error for a malformed content line or value, a document not
/// wrapped in VCALENDAR, or unbalanced BEGIN/END lines.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let lines = split_lines(input)
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<Vec<_>>>()?;

    tracing::trace!(count = lines.len(), "Content lines read");

    let mut lines = lines.into_iter();
    let (line_num, first) = lines
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))?;

    if first.name != "BEGIN" {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1));
    }
    if ComponentKind::from_name(&first.raw_value) != ComponentKind::Calendar {
        tracing::warn!(component = %first.raw_value, "Document does not start with VCALENDAR");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
            .with_context("expected VCALENDAR"));
    }

    let root = read_component(&mut lines, line_num, &first.raw_value)?;

    let trailing = lines.count();
    if trailing > 0 {
        tracing::debug!(trailing, "Ignoring content after END:VCALENDAR");
    }

    Ok(ICalendar { root })
}

/// Reads properties and nested components up to the matching END line.
fn read_component(
    lines: &mut vec::IntoIter<(usize, ContentLine)>,
    begin_line: usize,
    name: &str,
) -> ParseResult<Component> {
    let mut component = Component::named(name);
    let mut last_line = begin_line;

    while let Some((line_num, cl)) = lines.next() {
        last_line = line_num;

        match cl.name.as_str() {
            "BEGIN" => {
                let child = read_component(lines, line_num, &cl.raw_value)?;
                component.add_child(child);
            }
            "END" if cl.raw_value.eq_ignore_ascii_case(&component.name) => return Ok(component),
            "END" => {
                return Err(
                    ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                        .with_context(format!(
                            "expected END:{}, got END:{}",
                            component.name, cl.raw_value
                        )),
                );
            }
            _ => component.add_property(read_property(cl, line_num)?),
        }
    }

    Err(ParseError::new(ParseErrorKind::MissingEnd, last_line, 1)
        .with_context(format!("missing END:{}", component.name)))
}

fn read_property(cl: ContentLine, line_num: usize) -> ParseResult<Property> {
    let Some(value) = typed_value(&cl, line_num)? else {
        return Ok(Property::from_content_line(cl));
    };

    Ok(Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
    })
}

/// Parses the value when the property has a known type, `None` otherwise.
fn typed_value(cl: &ContentLine, line_num: usize) -> ParseResult<Option<Value>> {
    let raw = cl.raw_value.as_str();
    let name = cl.name.as_str();

    let value = if DATE_OR_DATETIME.contains(&name) {
        let explicit = cl.value_type();
        // A bare 8-character value is a DATE even without VALUE=DATE
        let is_date = explicit.map_or(raw.len() == 8 && !raw.contains('T'), |v| {
            v.eq_ignore_ascii_case("DATE")
        });
        if is_date {
            Value::Date(parse_date(raw, line_num, 1)?)
        } else if explicit.is_none_or(|v| v.eq_ignore_ascii_case("DATE-TIME")) {
            Value::DateTime(parse_datetime(raw, cl.tzid(), line_num, 1)?)
        } else {
            return Ok(None);
        }
    } else if TEXT_PROPERTIES.contains(&name) {
        Value::Text(unescape_text(raw))
    } else {
        match name {
            "DURATION" => Value::Duration(parse_duration(raw, line_num, 1)?),
            "SEQUENCE" | "PRIORITY" => Value::Integer(parse_integer(raw, line_num, 1)?),
            "RRULE" => Value::Recur(Box::new(parse_rrule(raw, line_num, 1)?)),
            _ => return Ok(None),
        }
    };

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Frequency, Weekday, WeekdaySlot};

    const SIMPLE_VEVENT: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:test-uid-123@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T140000Z\r\n\
DTEND:20260123T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test_log::test]
    fn parse_simple_vevent() {
        let ical = parse(SIMPLE_VEVENT).unwrap();

        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));

        let events = ical.events();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.uid(), Some("test-uid-123@example.com"));
        assert_eq!(event.summary(), Some("Test Event"));
        assert!(event.get_property("DTEND").unwrap().as_datetime().unwrap().is_utc());
    }

    #[test_log::test]
    fn parse_with_timezone() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:test@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART;TZID=America/New_York:20260123T090000\r\n\
SUMMARY:Morning Meeting\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        let dt = event.get_property("DTSTART").unwrap().as_datetime().unwrap();
        assert_eq!(dt.tzid(), Some("America/New_York"));
        assert_eq!(dt.hour, 9);
    }

    #[test_log::test]
    fn parse_date_only_start() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:allday@example.com\r\n\
DTSTART;VALUE=DATE:20260501\r\n\
DTEND:20260502\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = ical.first_event().unwrap();
        let start = event.get_property("DTSTART").unwrap().as_date().unwrap();
        assert_eq!((start.year, start.month, start.day), (2026, 5, 1));
        assert!(event.get_property("DTEND").unwrap().as_date().is_some());
    }

    #[test_log::test]
    fn parse_with_rrule() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:recurring@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10\r\n\
SUMMARY:Recurring Meeting\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        let rrule = event.get_property("RRULE").unwrap().as_recur().unwrap();

        assert_eq!(rrule.frequency(), Frequency::Weekly);
        assert_eq!(rrule.count(), Some(10));
        let days = rrule.weekdays().unwrap();
        assert_eq!(days.get(Weekday::Monday), WeekdaySlot::Any);
        assert_eq!(days.get(Weekday::Tuesday), WeekdaySlot::Unset);
    }

    #[test_log::test]
    fn parse_bad_rrule_reports_line() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
RRULE:FREQ=DAILY;INTERVAL=0\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidRRule);
        assert_eq!(err.line, 4);
    }

    #[test_log::test]
    fn parse_with_valarm() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:alarm@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
SUMMARY:Event with Alarm\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT15M\r\n\
DESCRIPTION:Reminder\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        let alarms = event.alarms();
        assert_eq!(alarms.len(), 1);

        let alarm = alarms[0];
        assert_eq!(alarm.get_property("ACTION").unwrap().as_text(), Some("DISPLAY"));
        assert_eq!(alarm.get_property("TRIGGER").unwrap().raw_value, "-PT15M");
    }

    #[test_log::test]
    fn parse_with_escaped_text() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:escaped@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
SUMMARY:Meeting\\, important\r\n\
DESCRIPTION:Line 1\\nLine 2\\nLine 3\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        assert_eq!(event.summary(), Some("Meeting, important"));
        assert_eq!(event.description(), Some("Line 1\nLine 2\nLine 3"));
    }

    #[test_log::test]
    fn parse_with_folded_lines() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:folded@example.com\r\n\
DTSTART:20260123T090000Z\r\n\
SUMMARY:This is a very long summary that needs to be folded across\r\n\
  multiple lines to comply with the 75 octet limit\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let summary = ical.events()[0].summary().unwrap();
        assert!(summary.contains("folded across multiple lines"));
    }

    #[test_log::test]
    fn parse_missing_begin() {
        assert_eq!(
            parse("VERSION:2.0\r\n").unwrap_err().kind,
            ParseErrorKind::MissingBegin
        );
        assert_eq!(parse("").unwrap_err().kind, ParseErrorKind::MissingBegin);
    }

    #[test_log::test]
    fn parse_root_must_be_calendar() {
        let input = "BEGIN:VEVENT\r\nUID:x\r\nEND:VEVENT\r\n";
        assert_eq!(parse(input).unwrap_err().kind, ParseErrorKind::MissingBegin);
    }

    #[test_log::test]
    fn parse_mismatched_end() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
END:VEVENT\r\n";
        assert_eq!(
            parse(input).unwrap_err().kind,
            ParseErrorKind::MismatchedComponent
        );
    }

    #[test_log::test]
    fn parse_missing_end() {
        let input = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:x\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingEnd);
        assert_eq!(err.line, 3);
    }

    #[test_log::test]
    fn parse_preserves_x_properties() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:xprop@example.com\r\n\
DTSTART:20260123T090000Z\r\n\
X-CUSTOM-PROP:Custom Value\r\n\
X-APPLE-STRUCTURED-LOCATION;VALUE=URI:geo:37.7749,-122.4194\r\n\
CATEGORIES:WORK,TEAM\r\n\
SUMMARY:Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        let custom = event.get_property("X-CUSTOM-PROP").unwrap();
        assert!(custom.value.is_verbatim());
        assert_eq!(custom.raw_value, "Custom Value");

        let apple = event.get_property("X-APPLE-STRUCTURED-LOCATION").unwrap();
        assert_eq!(apple.raw_value, "geo:37.7749,-122.4194");
        assert_eq!(apple.param("VALUE"), Some("URI"));

        assert_eq!(event.get_property("CATEGORIES").unwrap().raw_value, "WORK,TEAM");
    }
}
