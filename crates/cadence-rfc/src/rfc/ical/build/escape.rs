//! Escaping for TEXT values (RFC 5545 §3.3.11) and parameter values (RFC 6868).

/// Backslash-escapes `\`, `,`, `;` and line breaks. A CR is dropped so that
/// CRLF and LF both come out as `\n`.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | ',' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Returns the value unchanged when it is safe bare, otherwise DQUOTEd with
/// caret encoding for `^`, newline and `"`.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let bare = !s
        .chars()
        .any(|c| matches!(c, ':' | ';' | ',' | '"' | '\n' | '^'));
    if bare {
        return s.to_string();
    }

    let encoded = s
        .replace('^', "^^")
        .replace('\n', "^n")
        .replace('"', "^'");
    format!("\"{encoded}\"")
}
