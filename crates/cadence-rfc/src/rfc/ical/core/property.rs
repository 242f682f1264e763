//! Content lines and properties (RFC 5545 §3.1, §3.8).

use super::{Date, DateTime, DateTimeForm, Duration, Parameter, RecurrenceRule, Value};

fn param_value<'a>(params: &'a [Parameter], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .and_then(Parameter::value)
}

/// One unfolded line, split but not yet typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Upper-cased.
    pub name: String,
    pub params: Vec<Parameter>,
    /// Still escaped.
    pub raw_value: String,
}

impl ContentLine {
    #[must_use]
    pub fn new(name: &str, params: Vec<Parameter>, raw_value: impl Into<String>) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            params,
            raw_value: raw_value.into(),
        }
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        param_value(&self.params, name)
    }

    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.param("VALUE")
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.param("TZID")
    }
}

/// A typed property.
///
/// `raw_value` is what gets written back for every value except TEXT, which
/// is re-escaped from `value`. Constructors keep the two in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: Value,
    pub raw_value: String,
}

impl Property {
    fn typed(name: &str, params: Vec<Parameter>, raw_value: String, value: Value) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            params,
            value,
            raw_value,
        }
    }

    #[must_use]
    pub fn text(name: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::typed(name, Vec::new(), text.clone(), Value::Text(text))
    }

    /// A zoned value gets its `TZID` parameter.
    #[must_use]
    pub fn datetime(name: &str, dt: DateTime) -> Self {
        let params = match &dt.form {
            DateTimeForm::Zoned { tzid } => vec![Parameter::tzid(tzid.clone())],
            DateTimeForm::Floating | DateTimeForm::Utc => Vec::new(),
        };
        Self::typed(name, params, dt.to_string(), Value::DateTime(dt))
    }

    #[must_use]
    pub fn date(name: &str, date: Date) -> Self {
        Self::typed(
            name,
            vec![Parameter::value_type("DATE")],
            date.to_string(),
            Value::Date(date),
        )
    }

    #[must_use]
    pub fn duration(name: &str, duration: Duration) -> Self {
        Self::typed(name, Vec::new(), duration.to_string(), Value::Duration(duration))
    }

    #[must_use]
    pub fn recur(name: &str, rule: RecurrenceRule) -> Self {
        Self::typed(name, Vec::new(), rule.to_string(), Value::Recur(Box::new(rule)))
    }

    /// Keeps the line as written.
    #[must_use]
    pub fn from_content_line(cl: ContentLine) -> Self {
        let value = Value::Verbatim(cl.raw_value.clone());
        Self::typed(&cl.name, cl.params, cl.raw_value, value)
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        param_value(&self.params, name)
    }

    /// Replaces any parameter of the same name.
    pub fn set_param(&mut self, param: Parameter) {
        self.params.retain(|p| p.name != param.name);
        self.params.push(param);
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    #[must_use]
    pub const fn as_datetime(&self) -> Option<&DateTime> {
        self.value.as_datetime()
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<&Date> {
        self.value.as_date()
    }

    #[must_use]
    pub const fn as_duration(&self) -> Option<&Duration> {
        self.value.as_duration()
    }

    #[must_use]
    pub fn as_recur(&self) -> Option<&RecurrenceRule> {
        self.value.as_recur()
    }
}
