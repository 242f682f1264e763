/// Product identity written into every serialized calendar.
pub const PRODUCT_NAME: &str = "Cadence";
pub const PRODUCT_ID: &str =
    const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_NAME, " Recurrence Core//EN");

pub const ICALENDAR_VERSION: &str = "2.0";

/// Consecutive failed rule draws tolerated before occurrence lookup gives up.
pub const MAX_CONSECUTIVE_FAILURES: u8 = 5;

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_LOOKAHEAD_DAYS: u16 = 7;
