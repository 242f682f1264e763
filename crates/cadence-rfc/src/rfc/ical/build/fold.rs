//! Line folding (RFC 5545 §3.1).

const MAX_LINE_OCTETS: usize = 75;

/// Splits `line` into CRLF-terminated physical lines of at most 75 octets.
/// Each continuation starts with one space, which counts toward its limit,
/// and no split falls inside a UTF-8 sequence.
#[must_use]
pub fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 3 * (line.len() / MAX_LINE_OCTETS) + 2);
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;

    for c in line.chars() {
        if used + c.len_utf8() > budget {
            out.push_str("\r\n ");
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += c.len_utf8();
    }

    out.push_str("\r\n");
    out
}
