//! Content lines (RFC 5545 §3.1): unfolding and `name *(";" param) ":" value`.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Splits input into logical content lines, each tagged with the 1-based
/// number of the physical line it starts on.
///
/// CRLF and bare LF are both accepted. A line starting with a space or tab
/// continues the previous one with that character removed. A line without
/// any colon is also glued onto the previous one, since some producers fold
/// without the leading space.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (number, raw) in (1..).zip(input.lines()) {
        let line = raw.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let continuation = match line.strip_prefix([' ', '\t']) {
            Some(rest) => Some(rest),
            None => (!line.contains(':')).then_some(line),
        };

        match (continuation, lines.last_mut()) {
            (Some(rest), Some((_, previous))) => previous.push_str(rest),
            (Some(rest), None) => lines.push((number, rest.to_string())),
            (None, _) => lines.push((number, line.to_string())),
        }
    }

    lines
}

/// Byte position within one content line.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
    line_num: usize,
}

impl<'a> Cursor<'a> {
    const fn new(line: &'a str, line_num: usize) -> Self {
        Self {
            line,
            pos: 0,
            line_num,
        }
    }

    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.pos += expected.len_utf8();
        }
        matched
    }

    /// Consumes `[A-Za-z0-9-]*`.
    fn take_name(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            self.bump();
        }
        &self.line[start..self.pos]
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Error at the current character.
    const fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line_num, self.pos + 1)
    }

    const fn error_at_end(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line_num, self.line.len())
    }
}

/// Parses one unfolded content line.
///
/// ## Errors
/// Returns an error for a missing or malformed name, a malformed parameter,
/// an unclosed quote, or a missing `:`.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut cur = Cursor::new(line, line_num);

    let name = cur.take_name();
    match cur.peek() {
        Some(c) if c != ';' && c != ':' => {
            return Err(cur.error(ParseErrorKind::InvalidPropertyName));
        }
        _ if name.is_empty() => {
            return Err(ParseError::new(
                ParseErrorKind::MissingPropertyName,
                line_num,
                1,
            ));
        }
        _ => {}
    }

    let mut params = Vec::new();
    while cur.eat(';') {
        params.push(parse_parameter(&mut cur)?);
    }

    if !cur.eat(':') {
        return Err(cur.error_at_end(ParseErrorKind::MissingColon));
    }

    Ok(ContentLine {
        name: name.to_ascii_uppercase(),
        params,
        raw_value: cur.rest().to_string(),
    })
}

/// Parses `name=value *("," value)`, leaving the cursor on the `;` or `:`
/// that follows.
fn parse_parameter(cur: &mut Cursor<'_>) -> ParseResult<Parameter> {
    let name = cur.take_name();
    if name.is_empty() || !cur.eat('=') {
        return Err(cur.error(ParseErrorKind::InvalidParameter));
    }

    let mut values = vec![parse_param_value(cur)?];
    while cur.eat(',') {
        values.push(parse_param_value(cur)?);
    }

    match cur.peek() {
        Some(';' | ':') => Ok(Parameter::with_values(name, values)),
        Some(c) => Err(cur
            .error(ParseErrorKind::InvalidParameter)
            .with_context(format!("unexpected character '{c}'"))),
        None => Err(cur.error_at_end(ParseErrorKind::MissingColon)),
    }
}

/// A bare value runs to the next `,` `;` or `:`. A quoted one may contain
/// them and uses RFC 6868 caret escapes.
fn parse_param_value(cur: &mut Cursor<'_>) -> ParseResult<String> {
    if !cur.eat('"') {
        let start = cur.pos;
        while cur.peek().is_some_and(|c| !matches!(c, ',' | ';' | ':')) {
            cur.bump();
        }
        return Ok(cur.line[start..cur.pos].to_string());
    }

    let quote_column = cur.pos;
    let mut value = String::new();
    while let Some(c) = cur.bump() {
        match c {
            '"' => return Ok(value),
            '^' if cur.eat('^') => value.push('^'),
            '^' if cur.eat('n') => value.push('\n'),
            '^' if cur.eat('\'') => value.push('"'),
            _ => value.push(c),
        }
    }

    Err(ParseError::new(
        ParseErrorKind::UnclosedQuote,
        cur.line_num,
        quote_column,
    ))
}
