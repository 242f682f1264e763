use thiserror::Error;

use crate::rfc::ical::expand::{ConversionError, IterationError};
use crate::rfc::ical::parse::ParseError;

/// RFC parsing, timezone and recurrence errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Timezone error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Recurrence error: {0}")]
    RRule(#[from] rrule::RRuleError),

    #[error("Iteration error: {0}")]
    Iteration(#[from] IterationError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
