//! iCalendar core models (RFC 5545).
//!
//! Unknown properties, parameters and sub-components are kept so an event can
//! be read and written back without losing data the scheduler does not model.

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;
mod weekday_set;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm};
pub use duration::{Duration, DurationBuilder};
pub use parameter::Parameter;
pub use property::{ContentLine, Property};
pub use rrule::{Frequency, RecurrenceRule, Weekday};
pub use value::{Date, Value};
pub use weekday_set::{WeekdaySet, WeekdaySlot, parse_day_token};
