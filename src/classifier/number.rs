use std::sync::LazyLock;

use regex::Regex;

/// Leading decimal number, optionally signed, optionally with an exponent.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Read a recorded value as a number.
///
/// Thousands separators are dropped and only the leading number counts, so
/// `"1,50,000"` is 150000 and `"12.5 mg/dL"` is 12.5. Qualitative values such
/// as `"POSITIVE"` or `"<0.5"` have no leading number and yield `None`.
pub fn parse_value(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let found = LEADING_NUMBER.find(cleaned.trim())?;
    found.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_value("42"), Some(42.0));
        assert_eq!(parse_value(" 13.5 "), Some(13.5));
        assert_eq!(parse_value(".5"), Some(0.5));
        assert_eq!(parse_value("-3"), Some(-3.0));
    }

    #[test]
    fn thousands_separators_are_stripped() {
        assert_eq!(parse_value("1,50,000"), Some(150_000.0));
        assert_eq!(parse_value("4,500"), Some(4500.0));
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(parse_value("12.5 mg/dL"), Some(12.5));
        assert_eq!(parse_value("7."), Some(7.0));
    }

    #[test]
    fn qualitative_values_are_not_numbers() {
        assert_eq!(parse_value("POSITIVE"), None);
        assert_eq!(parse_value("<0.5"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("O+"), None);
    }
}
