//! Property parameters (RFC 5545 §3.2), e.g. the `TZID=Europe/Berlin` in
//! `DTSTART;TZID=Europe/Berlin:20190716T040000`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Upper-cased.
    pub name: String,
    /// Comma-separated values, unquoted and caret-decoded.
    pub values: Vec<String>,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_values(name, vec![value.into()])
    }

    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_uppercase();
        Self { name, values }
    }

    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new("TZID", tzid)
    }

    #[must_use]
    pub fn value_type(value_type: impl Into<String>) -> Self {
        Self::new("VALUE", value_type)
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_upper_cased() {
        let param = Parameter::new("tzid", "Europe/London");
        assert_eq!(param.name, "TZID");
        assert_eq!(param.value(), Some("Europe/London"));
    }

    #[test]
    fn first_value_of_many() {
        let param = Parameter::with_values("member", vec!["a".into(), "b".into()]);
        assert_eq!(param.value(), Some("a"));
        assert_eq!(param.values.len(), 2);
    }
}
