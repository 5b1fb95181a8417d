//! Data values placed on plot axes.
//!
//! A [`Value`] is a number, a piece of text or a timestamp. Values are
//! totally ordered so that extents and categorical sorts never fail:
//! numbers sort before text, text before timestamps.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single axis value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value.
    Number(f64),
    /// Timestamp (naive, no time zone).
    Date(NaiveDateTime),
    /// Text / category label.
    Text(String),
}

impl Value {
    /// Numeric view of the value, if it is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Timestamp view of the value, if it is a timestamp.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Whether the value is a finite number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(n) if !n.is_nan())
    }

    /// Whether the value is a timestamp.
    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Number(_) => 0,
            Value::Text(_) => 1,
            Value::Date(_) => 2,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) if d.time() == chrono::NaiveTime::MIN => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(d: NaiveDateTime) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(Value::from(2.0) < Value::from(10.0));
        assert_eq!(Value::from(3), Value::from(3.0));
    }

    #[test]
    fn test_mixed_kinds_are_ordered() {
        let date = Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(Value::from(100.0) < Value::from("a"));
        assert!(Value::from("zzz") < date);
    }

    #[test]
    fn test_display_integers_without_fraction() {
        assert_eq!(Value::from(4.0).to_string(), "4");
        assert_eq!(Value::from(0.25).to_string(), "0.25");
        assert_eq!(Value::from("TP53").to_string(), "TP53");
    }

    #[test]
    fn test_display_dates() {
        let d = Value::from(NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
        assert_eq!(d.to_string(), "2021-03-04");
    }

    #[test]
    fn test_untagged_deserialize() {
        let v: Vec<Value> = serde_json::from_str(r#"[1.5, "S1", "2020-05-01T12:00:00"]"#).unwrap();
        assert_eq!(v[0], Value::Number(1.5));
        assert_eq!(v[1], Value::from("S1"));
        assert!(v[2].is_date());
    }

    #[test]
    fn test_nan_is_not_a_number_for_scales() {
        assert!(!Value::Number(f64::NAN).is_number());
        assert!(Value::Number(1.0).is_number());
    }
}
