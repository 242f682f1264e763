//! Positioned errors for content lines and value grammars.

use std::fmt;

pub type ParseResult<T> = Result<T, ParseError>;

/// A parse failure and where it happened.
///
/// `line` and `column` are 1-based. Both are 0 for a value parsed on its own,
/// such as a rule string handed to `RecurrenceRule::from_str`; [`ParseError::at`]
/// fills them in once the enclosing line is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    pub context: Option<String>,
}

impl ParseError {
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    #[must_use]
    pub const fn unpositioned(kind: ParseErrorKind) -> Self {
        Self::new(kind, 0, 0)
    }

    /// Sets the position if it is still unknown.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        if self.line == 0 {
            (self.line, self.column) = (line, column);
        }
        self
    }

    #[must_use]
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.line > 0 {
            write!(f, " at line {}, column {}", self.line, self.column)?;
        }
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    // Content lines
    #[error("missing property name")]
    MissingPropertyName,
    #[error("invalid property name")]
    InvalidPropertyName,
    #[error("missing colon separator")]
    MissingColon,
    #[error("invalid parameter format")]
    InvalidParameter,
    #[error("unclosed quoted string")]
    UnclosedQuote,

    // Values
    #[error("invalid date format")]
    InvalidDate,
    #[error("invalid time format")]
    InvalidTime,
    #[error("invalid date-time format")]
    InvalidDateTime,
    #[error("invalid duration format")]
    InvalidDuration,
    #[error("invalid integer value")]
    InvalidInteger,

    // Recurrence rules
    #[error("invalid recurrence rule")]
    InvalidRRule,
    #[error("invalid frequency")]
    InvalidFrequency,
    #[error("invalid weekday")]
    InvalidWeekday,
    /// Zero, or outside `-31..=31`.
    #[error("invalid month day")]
    InvalidMonthDay,
    #[error("UNTIL and COUNT are mutually exclusive")]
    UntilCountConflict,

    // Document structure
    #[error("missing BEGIN line")]
    MissingBegin,
    #[error("missing END line")]
    MissingEnd,
    #[error("mismatched BEGIN/END")]
    MismatchedComponent,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
