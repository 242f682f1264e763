//! Writes the component tree back to RFC 5545 text.
//!
//! Well-known properties are emitted first in a fixed order so the output is
//! stable; everything else follows in the order it was read.

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, ComponentKind, ICalendar, Parameter, Property, Value};

const CALENDAR_ORDER: &[&str] = &["VERSION", "PRODID", "CALSCALE", "METHOD"];
const EVENT_ORDER: &[&str] = &[
    "UID",
    "DTSTAMP",
    "DTSTART",
    "DTEND",
    "DURATION",
    "RRULE",
    "SUMMARY",
    "DESCRIPTION",
];
const ALARM_ORDER: &[&str] = &["ACTION", "TRIGGER"];
const PARAM_ORDER: &[&str] = &["VALUE", "TZID"];

#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    serialize_component(&ical.root)
}

/// Serializes a component and, recursively, its children.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut out = String::new();
    write_component(&mut out, component);
    out
}

fn write_component(out: &mut String, component: &Component) {
    let leading = match component.kind {
        ComponentKind::Calendar => CALENDAR_ORDER,
        ComponentKind::Event => EVENT_ORDER,
        ComponentKind::Alarm => ALARM_ORDER,
        ComponentKind::Other => &[],
    };

    out.push_str(&fold_line(&format!("BEGIN:{}", component.name)));
    for prop in leading_first(&component.properties, leading, |p| p.name.as_str()) {
        out.push_str(&serialize_property(prop));
    }
    for child in &component.children {
        write_component(out, child);
    }
    out.push_str(&fold_line(&format!("END:{}", component.name)));
}

/// Serializes one property to a folded, CRLF-terminated content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    for param in leading_first(&prop.params, PARAM_ORDER, |p| p.name.as_str()) {
        line.push(';');
        line.push_str(&serialize_parameter(param));
    }

    line.push(':');
    if let Value::Text(text) = &prop.value {
        line.push_str(&escape_text(text));
    } else {
        line.push_str(&prop.raw_value);
    }

    fold_line(&line)
}

fn serialize_parameter(param: &Parameter) -> String {
    let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
    format!("{}={}", param.name, values.join(","))
}

/// Items named in `leading` first, in that order, then the rest as they came.
fn leading_first<'a, T>(
    items: &'a [T],
    leading: &[&str],
    name: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    let is_leading = |item: &T| leading.iter().any(|n| name(item).eq_ignore_ascii_case(n));

    let mut ordered = Vec::with_capacity(items.len());
    for &wanted in leading {
        ordered.extend(items.iter().filter(|i| name(*i).eq_ignore_ascii_case(wanted)));
    }
    ordered.extend(items.iter().filter(|i| !is_leading(*i)));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Date, DateTime, DateTimeForm, Duration};

    #[test]
    fn serialize_simple_vevent() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        let mut event = Component::event();
        event.add_property(Property::text("UID", "test-uid-123"));
        event.add_property(Property::text("SUMMARY", "Test Event"));
        ical.add_event(event);

        let output = serialize(&ical);

        assert!(output.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//Test//EN\r\n"));
        assert!(output.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
        assert!(output.contains("UID:test-uid-123\r\n"));
        assert!(output.contains("SUMMARY:Test Event\r\n"));
    }

    #[test]
    fn serialize_escapes_text() {
        let mut event = Component::event();
        event.add_property(Property::text("SUMMARY", "Meeting, important"));
        event.add_property(Property::text("DESCRIPTION", "Line 1\nLine 2"));

        let output = serialize_component(&event);

        assert!(output.contains("SUMMARY:Meeting\\, important\r\n"));
        assert!(output.contains("DESCRIPTION:Line 1\\nLine 2\r\n"));
    }

    #[test]
    fn serialize_zoned_start() {
        let dt = DateTime::new(
            Date::new(2019, 7, 16),
            4,
            0,
            0,
            DateTimeForm::Zoned {
                tzid: "Europe/Berlin".to_string(),
            },
        );
        let output = serialize_property(&Property::datetime("DTSTART", dt));
        assert_eq!(output, "DTSTART;TZID=Europe/Berlin:20190716T040000\r\n");
    }

    #[test]
    fn serialize_folds_long_lines() {
        let mut event = Component::event();
        let long_summary = "A".repeat(100);
        event.add_property(Property::text("SUMMARY", &long_summary));

        let output = serialize_component(&event);

        assert!(output.contains("\r\n "));
        let unfolded = output.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("SUMMARY:{long_summary}\r\n")));
    }

    #[test]
    fn canonical_order_puts_schedule_fields_first() {
        let mut event = Component::event();
        event.add_property(Property::text("X-FIRST", "x"));
        event.add_property(Property::text("SUMMARY", "Summary"));
        event.add_property(Property::duration("DURATION", Duration::hours(1)));
        event.add_property(Property::text("UID", "uid"));

        let output = serialize_component(&event);

        let lines: Vec<&str> = output.split("\r\n").collect();
        assert_eq!(
            lines,
            vec![
                "BEGIN:VEVENT",
                "UID:uid",
                "DURATION:PT1H",
                "SUMMARY:Summary",
                "X-FIRST:x",
                "END:VEVENT",
                "",
            ]
        );
    }

    #[test]
    fn param_order_leads_with_value_and_tzid() {
        let mut prop = Property::text("X-TEST", "v");
        prop.set_param(Parameter::new("LANGUAGE", "en"));
        prop.set_param(Parameter::tzid("UTC"));
        assert_eq!(serialize_property(&prop), "X-TEST;TZID=UTC;LANGUAGE=en:v\r\n");
    }
}
