//! iCalendar RFC 5545 subset used for single-event scheduling.
//!
//! - `core`: Type definitions for iCalendar structures and recurrence rules
//! - `parse`: Parsers for iCalendar content
//! - `build`: Serializers for iCalendar content
//! - `expand`: Timezone resolution and rule iteration
//!
//! ## Example
//!
//! ```rust
//! use cadence_rfc::rfc::ical::{build, core::*, parse};
//!
//! let mut ical = ICalendar::new("-//My App//EN");
//! let mut event = Component::event();
//! event.add_property(Property::text("UID", "standup"));
//! event.add_property(Property::recur("RRULE", "FREQ=DAILY".parse().unwrap()));
//! ical.add_event(event);
//!
//! let output = build::serialize(&ical);
//! let reparsed = parse::parse(&output).unwrap();
//! assert_eq!(reparsed.events().len(), 1);
//! ```

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::serialize;
pub use core::{Component, ComponentKind, ICalendar, Parameter, Property};
pub use parse::{ParseError, ParseResult, parse};
