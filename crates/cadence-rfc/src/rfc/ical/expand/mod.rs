//! Turning parsed values into instants: timezone resolution and rule iteration.

mod rrule;
mod timezone;

pub use rrule::{IterationError, OccurrenceSource, RuleCursor, RuleExpansion};
pub use timezone::{
    ConversionError, TimeZoneResolver, convert_to_utc, convert_to_utc_lenient, localize_lenient,
    resolve_date, resolve_datetime,
};
