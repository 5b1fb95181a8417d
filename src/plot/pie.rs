//! Donut slice layout.
//!
//! Slices keep data order. Angles run clockwise from 12 o'clock over a full
//! turn, with a fixed pad angle taken out of the total before values are
//! apportioned. Non-positive values get no arc beyond their padding.

use crate::data::Point;
use crate::plot::defaults;
use crate::value::Value;
use serde::Serialize;
use std::f64::consts::TAU;

/// One donut slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    /// Category (point x).
    pub category: Value,
    /// Slice value (point y).
    pub value: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians, including the pad.
    pub end_angle: f64,
    /// Pad angle in radians.
    pub pad_angle: f64,
}

/// Donut geometry inside a plot's drawable area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutLayout {
    /// Outer radius.
    pub outer_radius: f64,
    /// Inner radius.
    pub inner_radius: f64,
    /// Slices in data order.
    pub slices: Vec<PieSlice>,
}

impl DonutLayout {
    /// Lay out `data` in an `inner_width` × `inner_height` area.
    #[must_use]
    pub fn new(data: &[Point], inner_width: f64, inner_height: f64) -> Self {
        let outer_radius = (inner_width.min(inner_height) / 2.0).max(0.0);
        Self {
            outer_radius,
            inner_radius: outer_radius * defaults::DONUT_INNER_RATIO,
            slices: slices(data, defaults::DONUT_PAD_ANGLE),
        }
    }
}

/// Pie slices for `data` with `pad_angle` between slices.
#[must_use]
pub fn slices(data: &[Point], pad_angle: f64) -> Vec<PieSlice> {
    let values: Vec<f64> = data.iter().map(|p| p.y.as_f64().unwrap_or(0.0)).collect();
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let sum: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let pad = pad_angle.min(TAU / n as f64);
    let k = if sum > 0.0 { (TAU - n as f64 * pad) / sum } else { 0.0 };

    let mut angle = 0.0;
    data.iter()
        .zip(values)
        .map(|(p, v)| {
            let start = angle;
            angle += if v > 0.0 { v * k } else { 0.0 } + pad;
            PieSlice { category: p.x.clone(), value: v, start_angle: start, end_angle: angle, pad_angle: pad }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slices_cover_full_turn() {
        let data = vec![Point::new("a", 1), Point::new("b", 3)];
        let s = slices(&data, 0.0);
        assert_relative_eq!(s[0].start_angle, 0.0);
        assert_relative_eq!(s[0].end_angle, TAU / 4.0);
        assert_relative_eq!(s[1].end_angle, TAU);
    }

    #[test]
    fn test_padding_reserved() {
        let data = vec![Point::new("a", 1), Point::new("b", 1)];
        let s = slices(&data, 0.1);
        assert_relative_eq!(s[1].end_angle, TAU, epsilon = 1e-12);
        assert_relative_eq!(s[0].end_angle - s[0].start_angle, TAU / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_values_get_no_arc() {
        let data = vec![Point::new("a", 0), Point::new("b", -2), Point::new("c", 5)];
        let s = slices(&data, 0.0);
        assert_relative_eq!(s[0].end_angle, 0.0);
        assert_relative_eq!(s[1].end_angle, 0.0);
        assert_relative_eq!(s[2].end_angle, TAU);
    }

    #[test]
    fn test_donut_radii() {
        let layout = DonutLayout::new(&[Point::new("a", 1)], 200.0, 100.0);
        assert_relative_eq!(layout.outer_radius, 50.0);
        assert_relative_eq!(layout.inner_radius, 30.0);
        assert!(DonutLayout::new(&[], 10.0, 10.0).slices.is_empty());
    }
}
