//! Validated data points.
//!
//! Points arrive either from code (builder methods) or from JSON documents
//! using the short attribute names `x`, `y`, `c`, `r` and `series`. Both
//! coordinates are required; a record missing either fails at construction.

use crate::error::{Error, Result};
use crate::scale::ScaleKind;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Raw point record as found in data documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Horizontal coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Value>,
    /// Vertical coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Value>,
    /// Color value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<Value>,
    /// Radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    /// Series name (stacked plots).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

/// A single plotted datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: Value,
    /// Vertical coordinate.
    pub y: Value,
    /// Value mapped through the color axis.
    pub color: Option<Value>,
    /// Value mapped through the radius scale.
    pub radius: Option<f64>,
    /// Series the point belongs to.
    pub series: Option<String>,
}

impl Point {
    /// Create a point from its two coordinates.
    #[must_use]
    pub fn new(x: impl Into<Value>, y: impl Into<Value>) -> Self {
        Self { x: x.into(), y: y.into(), color: None, radius: None, series: None }
    }

    /// Set the color value.
    #[must_use]
    pub fn color(mut self, color: impl Into<Value>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the radius.
    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Set the series name.
    #[must_use]
    pub fn series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    /// Coordinate for `attr`.
    #[must_use]
    pub fn get(&self, attr: Attr) -> &Value {
        match attr {
            Attr::X => &self.x,
            Attr::Y => &self.y,
        }
    }

    /// Check both coordinates against the scale kinds of the x and y axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleValue`] naming the first offending
    /// coordinate.
    pub fn check_scales(&self, x: ScaleKind, y: ScaleKind) -> Result<()> {
        check_value(&self.x, x, Attr::X)?;
        check_value(&self.y, y, Attr::Y)
    }
}

/// Positional attribute of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Attr {
    /// Attribute name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Attr::X => "x",
            Attr::Y => "y",
        }
    }

    /// The other positional attribute.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Attr::X => Attr::Y,
            Attr::Y => Attr::X,
        }
    }
}

fn check_value(value: &Value, kind: ScaleKind, attr: Attr) -> Result<()> {
    if kind.accepts(value) {
        Ok(())
    } else {
        Err(Error::IncompatibleValue { kind: kind.to_string(), attr: attr.name(), value: value.to_string() })
    }
}

impl TryFrom<RawPoint> for Point {
    type Error = Error;

    fn try_from(raw: RawPoint) -> Result<Self> {
        let x = raw.x.ok_or(Error::MissingCoordinate("x"))?;
        let y = raw.y.ok_or(Error::MissingCoordinate("y"))?;
        Ok(Self { x, y, color: raw.c, radius: raw.r, series: raw.series })
    }
}

impl From<Point> for RawPoint {
    fn from(p: Point) -> Self {
        Self { x: Some(p.x), y: Some(p.y), c: p.color, r: p.radius, series: p.series }
    }
}

/// Validate a batch of raw records; the first invalid record fails the batch.
///
/// # Errors
///
/// Returns [`Error::MissingCoordinate`] for the first record lacking x or y.
pub fn validate(raw: impl IntoIterator<Item = RawPoint>) -> Result<Vec<Point>> {
    raw.into_iter().map(Point::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let p = Point::new("A", 10).series("s1").color(2).radius(3.0);
        assert_eq!(p.x, Value::from("A"));
        assert_eq!(p.series.as_deref(), Some("s1"));
        assert_eq!(p.radius, Some(3.0));
        assert_eq!(p.get(Attr::Y), &Value::from(10));
    }

    #[test]
    fn test_missing_coordinate_fails() {
        let err = Point::try_from(RawPoint { y: Some(Value::from(1)), ..RawPoint::default() }).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate("x")));
        let err = Point::try_from(RawPoint { x: Some(Value::from(1)), ..RawPoint::default() }).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate("y")));
    }

    #[test]
    fn test_deserialize_short_names() {
        let p: Point = serde_json::from_str(r#"{"x": "S1", "y": "TP53", "c": 2, "series": "Missense"}"#).unwrap();
        assert_eq!(p.color, Some(Value::from(2)));
        assert_eq!(p.series.as_deref(), Some("Missense"));
        assert!(serde_json::from_str::<Point>(r#"{"x": 1}"#).is_err());
    }

    #[test]
    fn test_check_scales() {
        let p = Point::new("A", 10);
        assert!(p.check_scales(ScaleKind::Categorical, ScaleKind::Linear).is_ok());
        let err = p.check_scales(ScaleKind::Linear, ScaleKind::Linear).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value found for linear scale in x attribute: A");
        assert!(p.check_scales(ScaleKind::Categorical, ScaleKind::Temporal).is_err());
    }

    #[test]
    fn test_validate_batch() {
        let raw = vec![
            RawPoint { x: Some(Value::from(1)), y: Some(Value::from(2)), ..RawPoint::default() },
            RawPoint { x: Some(Value::from(1)), ..RawPoint::default() },
        ];
        assert!(validate(raw.clone()).is_err());
        assert_eq!(validate(raw.into_iter().take(1)).unwrap().len(), 1);
    }
}
