//! Plain-text summary of an event's schedule.

use cadence_schedule::Event;
use chrono::{DateTime, Utc};

/// ## Summary
/// Renders the start, the next occurrence after `now`, and every occurrence
/// up to `until`.
#[must_use]
pub fn render(event: &Event, now: DateTime<Utc>, until: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!(
            "Event:    {} ({})",
            event.uid(),
            event.summary().unwrap_or("untitled")
        ),
        format!("Start:    {}", event.start()),
    ];

    if let Some(end) = event.end_date() {
        lines.push(format!("End:      {}", end.to_rfc3339()));
    }
    if let Some(rule) = event.recurrence() {
        lines.push(format!("Repeats:  {rule}"));
    }

    lines.push(match event.next_date_after(now) {
        Some(next) => format!("Next:     {next}"),
        None => "Next:     none".to_owned(),
    });

    if event.is_recurring() {
        let upcoming = event.next_dates_between(now, until);
        lines.push(format!(
            "Upcoming: {} until {}",
            upcoming.len(),
            until.to_rfc3339()
        ));
        lines.extend(upcoming.iter().map(|occurrence| format!("  {occurrence}")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
