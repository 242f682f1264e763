//! iCalendar parsing primitives (RFC 5545).
//!
//! - Lexer: Content line parsing with unfolding
//! - Values: Value type parsing (DATE, DATE-TIME, DURATION, RECUR, ...)
//! - Parser: Full document parsing into typed structures

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines};
pub use parser::parse;
pub use values::{
    parse_date, parse_datetime, parse_duration, parse_integer, parse_rrule, unescape_text,
};
