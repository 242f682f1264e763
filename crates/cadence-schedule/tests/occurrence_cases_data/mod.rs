pub struct OccurrenceCase {
    pub name: &'static str,
    /// Full DTSTART content line.
    pub dtstart: &'static str,
    pub rrule: &'static str,
    pub timezone: Option<&'static str>,
    pub now: &'static str,
    pub until: &'static str,
    /// Expected occurrences as RFC 3339 UTC instants.
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn occurrence_cases() -> Vec<OccurrenceCase> {
    vec![
        OccurrenceCase {
            name: "weekly_tuesday_thursday",
            dtstart: "DTSTART:19970902T090000Z",
            rrule: "FREQ=WEEKLY;BYDAY=TU,TH",
            timezone: None,
            now: "1997-09-01T00:00:00Z",
            until: "1997-09-10T00:00:00Z",
            expected: &[
                "1997-09-02T09:00:00+00:00",
                "1997-09-04T09:00:00+00:00",
                "1997-09-09T09:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "monthly_two_monthdays",
            dtstart: "DTSTART:20120101T090000Z",
            rrule: "FREQ=MONTHLY;BYMONTHDAY=15,1",
            timezone: None,
            now: "2012-01-10T00:00:00Z",
            until: "2012-02-20T00:00:00Z",
            expected: &[
                "2012-01-15T09:00:00+00:00",
                "2012-02-01T09:00:00+00:00",
                "2012-02-15T09:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "monthly_last_day",
            dtstart: "DTSTART:20260131T120000Z",
            rrule: "FREQ=MONTHLY;BYMONTHDAY=-1",
            timezone: None,
            now: "2026-02-01T00:00:00Z",
            until: "2026-04-30T23:59:59Z",
            expected: &[
                "2026-02-28T12:00:00+00:00",
                "2026-03-31T12:00:00+00:00",
                "2026-04-30T12:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "every_other_day",
            dtstart: "DTSTART:20260101T000000Z",
            rrule: "FREQ=DAILY;INTERVAL=2",
            timezone: None,
            now: "2026-01-02T00:00:00Z",
            until: "2026-01-08T00:00:00Z",
            expected: &[
                "2026-01-03T00:00:00+00:00",
                "2026-01-05T00:00:00+00:00",
                "2026-01-07T00:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "yearly_zoned_across_dst_rules",
            dtstart: "DTSTART;TZID=America/New_York:20250310T090000",
            rrule: "FREQ=YEARLY;COUNT=3",
            timezone: Some("UTC"),
            now: "2025-01-01T00:00:00Z",
            until: "2030-01-01T00:00:00Z",
            expected: &[
                "2025-03-10T13:00:00+00:00",
                "2026-03-10T13:00:00+00:00",
                "2027-03-10T14:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "hourly_on_fridays",
            dtstart: "DTSTART:20260102T220000Z",
            rrule: "FREQ=HOURLY;BYDAY=FR",
            timezone: None,
            now: "2026-01-02T00:00:00Z",
            until: "2026-01-09T01:00:00Z",
            expected: &[
                "2026-01-02T22:00:00+00:00",
                "2026-01-02T23:00:00+00:00",
                "2026-01-09T00:00:00+00:00",
                "2026-01-09T01:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "daily_until",
            dtstart: "DTSTART:20260101T100000Z",
            rrule: "FREQ=DAILY;UNTIL=20260103T100000Z",
            timezone: None,
            now: "2025-01-01T00:00:00Z",
            until: "2027-01-01T00:00:00Z",
            expected: &[
                "2026-01-01T10:00:00+00:00",
                "2026-01-02T10:00:00+00:00",
                "2026-01-03T10:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "floating_daily_over_autumn_change",
            dtstart: "DTSTART:20261023T083000",
            rrule: "FREQ=DAILY",
            timezone: Some("Europe/London"),
            now: "2026-10-23T00:00:00Z",
            until: "2026-10-26T23:00:00Z",
            expected: &[
                "2026-10-23T07:30:00+00:00",
                "2026-10-24T07:30:00+00:00",
                "2026-10-25T08:30:00+00:00",
                "2026-10-26T08:30:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "monthly_first_and_third_monday",
            dtstart: "DTSTART:20260105T090000Z",
            rrule: "FREQ=MONTHLY;BYDAY=1MO,3MO",
            timezone: None,
            now: "2026-01-01T00:00:00Z",
            until: "2026-02-28T23:59:59Z",
            expected: &[
                "2026-01-05T09:00:00+00:00",
                "2026-01-19T09:00:00+00:00",
                "2026-02-02T09:00:00+00:00",
                "2026-02-16T09:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "floating_start_with_floating_until",
            dtstart: "DTSTART:20260105T090000",
            rrule: "FREQ=DAILY;UNTIL=20260108T090000",
            timezone: Some("Europe/Berlin"),
            now: "2026-01-01T00:00:00Z",
            until: "2026-02-01T00:00:00Z",
            expected: &[
                "2026-01-05T08:00:00+00:00",
                "2026-01-06T08:00:00+00:00",
                "2026-01-07T08:00:00+00:00",
                "2026-01-08T08:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "all_day_start_with_date_until",
            dtstart: "DTSTART;VALUE=DATE:20260105",
            rrule: "FREQ=DAILY;UNTIL=20260107",
            timezone: Some("Europe/Berlin"),
            now: "2026-01-01T00:00:00Z",
            until: "2026-02-01T00:00:00Z",
            expected: &[
                "2026-01-04T23:00:00+00:00",
                "2026-01-05T23:00:00+00:00",
                "2026-01-06T23:00:00+00:00",
            ],
        },
        OccurrenceCase {
            name: "utc_start_displayed_in_berlin_over_spring_change",
            dtstart: "DTSTART:20260323T080000Z",
            rrule: "FREQ=WEEKLY",
            timezone: Some("Europe/Berlin"),
            now: "2026-03-20T00:00:00Z",
            until: "2026-04-07T00:00:00Z",
            expected: &[
                "2026-03-23T08:00:00+00:00",
                "2026-03-30T08:00:00+00:00",
                "2026-04-06T08:00:00+00:00",
            ],
        },
    ]
}
