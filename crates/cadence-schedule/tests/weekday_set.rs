use cadence_rfc::rfc::ical::core::{Frequency, Weekday, WeekdaySet, WeekdaySlot};
use cadence_schedule::{Event, EventData, Instant};
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;

#[test_log::test]
fn day_list_round_trip_preserves_ordinals() {
    let tokens = ["-1FR", "MO", "2TU", "su", "+3WE"];

    let set = WeekdaySet::from_day_list(tokens).unwrap().unwrap();
    let written: HashSet<String> = set.to_day_list().into_iter().collect();
    let expected: HashSet<String> = ["-1FR", "MO", "2TU", "SU", "3WE"]
        .into_iter()
        .map(str::to_string)
        .collect();

    assert_eq!(written, expected);
    assert_eq!(WeekdaySet::from_day_list(set.to_day_list()).unwrap(), Some(set));
}

#[test_log::test]
fn set_from_an_event_start_uses_its_local_weekday() {
    // Sunday 23:00 UTC is Monday in Berlin
    let text = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:wd@example.com\r\n\
DTSTART:20260104T230000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    let event = Event::from_ical(text, Some("Europe/Berlin")).unwrap();

    let set = WeekdaySet::new().set_from_instant(&event.start_date());
    assert_eq!(set.selected_weekday(), Some(Weekday::Monday));
    assert_eq!(set.get(Weekday::Sunday), WeekdaySlot::Unset);

    let utc_view = Instant::in_utc(event.start_utc());
    assert_eq!(utc_view.weekday(), Weekday::Sunday);
    assert_eq!(utc_view.project(Tz::Europe__Berlin).weekday(), Weekday::Monday);
}

#[test_log::test]
fn edited_rule_keeps_weekday_selection() {
    let start = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
    let data = EventData {
        start,
        frequency: Some(Frequency::Monthly),
        weekdays: vec!["1MO".to_string()],
        ..EventData::default()
    };
    let event = Event::from_data(&data, None).unwrap();
    let text = event.to_ical_string();
    let reread = Event::from_ical(&text, None).unwrap();

    let weekdays = reread.recurrence().unwrap().weekdays().unwrap();
    assert_eq!(weekdays.get(Weekday::Monday), WeekdaySlot::Ordinal(1));
    assert_eq!(reread.uid(), event.uid());
    assert_eq!(reread.start_utc(), start);
}
