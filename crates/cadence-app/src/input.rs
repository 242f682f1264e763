use std::io::Read;

use anyhow::{Context, Result};

/// ## Summary
/// Reads calendar text from `path`, or from stdin when `path` is `None` or `-`.
///
/// ## Errors
/// Returns an error if the file or stdin cannot be read as UTF-8.
pub fn read_calendar(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading calendar from stdin")?;
            Ok(text)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading calendar from {path}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_names_the_path() {
        let err = read_calendar(Some("/nonexistent/cadence/event.ics")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cadence/event.ics"));
    }
}
