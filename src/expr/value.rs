//! Scalar values and their literal representation.
//!
//! Strings and timestamps are single-quoted, integers are bare digits and an
//! absent value renders as nothing at all. Embedded quotes are not escaped.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A scalar value carried by a field pair or an operator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarValue {
    /// Decimal integer: 123
    Integer(i64),
    /// Quoted text: 'hoge'
    Text(String),
    /// Quoted ISO-8601 timestamp: '2013-01-23T12:34:56'
    Timestamp(NaiveDateTime),
    /// Explicit null marker, renders empty
    #[default]
    Absent,
}

impl ScalarValue {
    /// Whether this is the explicit absent marker.
    pub fn is_absent(&self) -> bool {
        matches!(self, ScalarValue::Absent)
    }

    /// Literal representation of this value.
    pub fn formatted(&self) -> FormattedValue {
        FormattedValue(format_value(self))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Text(s) => write!(f, "'{}'", s),
            ScalarValue::Timestamp(ts) => {
                write!(f, "'{}", ts.format("%Y-%m-%dT%H:%M:%S"))?;
                let micros = (ts.nanosecond() % 1_000_000_000) / 1_000;
                if micros != 0 {
                    write!(f, ".{:06}", micros)?;
                }
                write!(f, "'")
            }
            ScalarValue::Absent => Ok(()),
        }
    }
}

/// Convert a scalar value to its literal text.
///
/// # Examples
///
/// ```
/// use csquery::{format_value, ScalarValue};
///
/// assert_eq!(format_value(&ScalarValue::from("hoge")), "'hoge'");
/// assert_eq!(format_value(&ScalarValue::from(123)), "123");
/// assert_eq!(format_value(&ScalarValue::Absent), "");
/// ```
pub fn format_value(value: &ScalarValue) -> String {
    value.to_string()
}

/// The rendered literal of a scalar value.
///
/// Ordering is plain lexicographic order of the literal text, which is what
/// range validation compares. It is only defined between formatted values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormattedValue(String);

impl FormattedValue {
    /// The literal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the value rendered as nothing (only `Absent` does).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&ScalarValue> for FormattedValue {
    fn from(value: &ScalarValue) -> Self {
        value.formatted()
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<i32> for ScalarValue {
    fn from(i: i32) -> Self {
        ScalarValue::Integer(i64::from(i))
    }
}

impl From<u32> for ScalarValue {
    fn from(u: u32) -> Self {
        ScalarValue::Integer(i64::from(u))
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

impl From<NaiveDateTime> for ScalarValue {
    fn from(ts: NaiveDateTime) -> Self {
        ScalarValue::Timestamp(ts)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ScalarValue::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 1, 23)
            .unwrap()
            .and_hms_micro_opt(12, 34, 56, micro)
            .unwrap()
    }

    #[test]
    fn test_text_is_quoted() {
        assert_eq!(format_value(&"hoge".into()), "'hoge'");
        assert_eq!(format_value(&"".into()), "''");
    }

    #[test]
    fn test_embedded_quotes_not_escaped() {
        assert_eq!(format_value(&"it's".into()), "'it's'");
    }

    #[test]
    fn test_integer_is_bare() {
        assert_eq!(format_value(&123.into()), "123");
        assert_eq!(format_value(&(-7i64).into()), "-7");
        assert_eq!(format_value(&0.into()), "0");
    }

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(format_value(&ScalarValue::Absent), "");
        assert_eq!(format_value(&Option::<i64>::None.into()), "");
        assert!(ScalarValue::default().is_absent());
    }

    #[test]
    fn test_timestamp_without_fraction() {
        assert_eq!(format_value(&timestamp(0).into()), "'2013-01-23T12:34:56'");
    }

    #[test]
    fn test_timestamp_with_microseconds() {
        assert_eq!(
            format_value(&timestamp(123_456).into()),
            "'2013-01-23T12:34:56.123456'"
        );
        assert_eq!(
            format_value(&timestamp(5).into()),
            "'2013-01-23T12:34:56.000005'"
        );
    }

    #[test]
    fn test_timestamp_truncates_nanoseconds() {
        let ts = NaiveDate::from_ymd_opt(2013, 1, 23)
            .unwrap()
            .and_hms_nano_opt(12, 34, 56, 999)
            .unwrap();
        assert_eq!(format_value(&ts.into()), "'2013-01-23T12:34:56'");
    }

    #[test]
    fn test_formatted_order_is_lexicographic() {
        let nine = ScalarValue::from(9).formatted();
        let ten = ScalarValue::from(10).formatted();
        assert!(nine > ten);
        assert!(ScalarValue::from(12).formatted() <= ScalarValue::from(34).formatted());
        assert!(ScalarValue::from("a").formatted() < ScalarValue::from("b").formatted());
    }

    #[test]
    fn test_formatted_empty() {
        assert!(ScalarValue::Absent.formatted().is_empty());
        assert!(!ScalarValue::from("").formatted().is_empty());
        assert_eq!(ScalarValue::from(5).formatted().as_str(), "5");
    }
}
