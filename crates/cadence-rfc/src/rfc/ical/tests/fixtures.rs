//! Calendar documents shared by the round-trip tests.

pub const VEVENT_MINIMAL: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:minimal@example.com\r\n\
DTSTAMP:19970901T130000Z\r\n\
DTSTART:19970903T163000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

pub const VEVENT_RECURRING: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:recurring@example.com\r\n\
DTSTAMP:19970901T130000Z\r\n\
DTSTART;TZID=America/New_York:19970902T090000\r\n\
DURATION:PT1H30M\r\n\
RRULE:FREQ=MONTHLY;INTERVAL=2;BYDAY=1MO,-1FR;COUNT=10;WKST=SU\r\n\
SUMMARY:Every other month\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

pub const VEVENT_WITH_ALARM: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:alarm@example.com\r\n\
DTSTAMP:19970901T130000Z\r\n\
DTSTART:19970903T163000Z\r\n\
SUMMARY:Meeting with alarm\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER;RELATED=START:-PT15M\r\n\
DESCRIPTION:Reminder\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

pub const VEVENT_ALL_DAY: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:allday@example.com\r\n\
DTSTAMP:19970901T130000Z\r\n\
DTSTART;VALUE=DATE:19971102\r\n\
RRULE:FREQ=YEARLY\r\n\
SUMMARY:Anniversary\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

pub const VEVENT_WITH_UNKNOWN_PARTS: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
X-WR-CALNAME:Team\r\n\
BEGIN:VEVENT\r\n\
UID:unknown@example.com\r\n\
DTSTAMP:19970901T130000Z\r\n\
DTSTART:19970903T163000Z\r\n\
ATTENDEE;CN=\"Doe, Jane\";ROLE=REQ-PARTICIPANT:mailto:jane@example.com\r\n\
CATEGORIES:WORK,TEAM\r\n\
X-CUSTOM;X-PARAM=a,b:raw\\,value\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
UID:todo@example.com\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";
