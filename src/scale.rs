//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color, size).
//! Positional axes use [`AxisScale`], which wraps one of the continuous
//! scales or a [`BandScale`]; color axes use [`OrdinalScale`] or
//! [`SequentialScale`]; scatter plot radii use a [`SqrtScale`].

use crate::color::{Interpolator, Rgba};
use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// The mapping family of a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Discrete bands (bar categories, heatmap rows).
    Categorical,
    /// Continuous linear mapping.
    Linear,
    /// Discrete value to discrete output (colors).
    Ordinal,
    /// Continuous value to interpolated color.
    Sequential,
    /// Square-root mapping.
    Sqrt,
    /// Timestamps.
    Temporal,
}

impl ScaleKind {
    /// Linear, sequential, sqrt and temporal scales are numerical.
    #[must_use]
    pub fn is_numerical(self) -> bool {
        matches!(self, ScaleKind::Linear | ScaleKind::Sequential | ScaleKind::Sqrt | ScaleKind::Temporal)
    }

    /// Whether `value` can be placed on a scale of this kind.
    ///
    /// Linear and sqrt scales need numbers, temporal scales need timestamps;
    /// every other kind accepts any value.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ScaleKind::Linear | ScaleKind::Sqrt => value.is_number(),
            ScaleKind::Temporal => value.is_date(),
            _ => true,
        }
    }

    /// Lowercase name, as used in configuration documents.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ScaleKind::Categorical => "categorical",
            ScaleKind::Linear => "linear",
            ScaleKind::Ordinal => "ordinal",
            ScaleKind::Sequential => "sequential",
            ScaleKind::Sqrt => "sqrt",
            ScaleKind::Temporal => "temporal",
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

// ============================================================================
// Continuous scales
// ============================================================================

/// Linear scale for continuous-to-continuous mapping.
///
/// A degenerate domain (min == max) maps every value to the middle of the
/// range instead of failing, so single-point plots still render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if either domain bound is not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain(format!(
                "Domain bounds must be finite, got [{}, {}]",
                domain.0, domain.1
            )));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }

    /// Create a scale from data extent.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f64, f64)) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self::new((min, max), range).ok()
    }

    /// Domain extent.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        if self.range_max == self.range_min {
            return self.domain_min;
        }
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Roughly `count` evenly spaced, human-friendly values inside the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain_min, self.domain_max, count)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        if self.domain_max == self.domain_min {
            return (self.range_min + self.range_max) / 2.0;
        }
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Square-root scale; negative inputs keep their sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
    domain: (f64, f64),
}

impl SqrtScale {
    /// Create a new square-root scale.
    ///
    /// # Errors
    ///
    /// Returns an error if either domain bound is not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        let inner = LinearScale::new((signed_sqrt(domain.0), signed_sqrt(domain.1)), range)?;
        Ok(Self { inner, domain })
    }

    /// Domain extent.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Tick values over the untransformed domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

impl Scale<f64, f64> for SqrtScale {
    fn scale(&self, value: f64) -> f64 {
        self.inner.scale(signed_sqrt(value))
    }

    fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

fn signed_sqrt(v: f64) -> f64 {
    v.signum() * v.abs().sqrt()
}

/// Time scale: a linear scale over milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    /// Create a new time scale.
    ///
    /// # Errors
    ///
    /// Currently infallible for valid timestamps; kept fallible to match the
    /// other scale constructors.
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Result<Self> {
        let inner = LinearScale::new((to_millis(domain.0), to_millis(domain.1)), range)?;
        Ok(Self { inner })
    }

    /// Domain extent.
    #[must_use]
    pub fn domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        let (a, b) = self.inner.domain();
        (from_millis(a), from_millis(b))
    }

    /// Tick timestamps.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        self.inner.ticks(count).into_iter().map(from_millis).collect()
    }
}

impl Scale<NaiveDateTime, f64> for TimeScale {
    fn scale(&self, value: NaiveDateTime) -> f64 {
        self.inner.scale(to_millis(value))
    }

    fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

fn to_millis(d: NaiveDateTime) -> f64 {
    d.and_utc().timestamp_millis() as f64
}

fn from_millis(ms: f64) -> NaiveDateTime {
    DateTime::from_timestamp_millis(ms as i64).map(|d| d.naive_utc()).unwrap_or_default()
}

/// Tick step for `count` ticks over `[start, stop]`, snapped to 1, 2 or 5 × 10ⁿ.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let step0 = (stop - start).abs() / count.max(1) as f64;
    let mut step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    if error >= 50f64.sqrt() {
        step1 *= 10.0;
    } else if error >= 10f64.sqrt() {
        step1 *= 5.0;
    } else if error >= 2f64.sqrt() {
        step1 *= 2.0;
    }
    step1
}

/// Human-friendly tick values covering `[start, stop]` (either order).
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let step = tick_step(lo, hi, count);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    // Multiply (or divide by the inverse) instead of accumulating to keep
    // values like 0.3 exact.
    let mut out: Vec<f64> = if step >= 1.0 {
        let (i0, i1) = ((lo / step).ceil() as i64, (hi / step).floor() as i64);
        (i0..=i1).map(|i| i as f64 * step).collect()
    } else {
        let inv = (1.0 / step).round();
        let (i0, i1) = ((lo * inv).ceil() as i64, (hi * inv).floor() as i64);
        (i0..=i1).map(|i| i as f64 / inv).collect()
    };

    if start > stop {
        out.reverse();
    }
    out
}

// ============================================================================
// Discrete scales
// ============================================================================

/// Band scale for categorical positions.
///
/// The domain is shared (`Arc`) so that many plots can reference one
/// canonical category order without copying it.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Arc<[Value]>,
    index: BTreeMap<Value, usize>,
    range: (f64, f64),
    padding: f64,
    step: f64,
    bandwidth: f64,
    start: f64,
}

impl BandScale {
    /// Create a band scale; duplicate domain values keep their first position.
    #[must_use]
    pub fn new(domain: impl IntoIterator<Item = Value>, range: (f64, f64), padding: f64) -> Self {
        let mut unique = Vec::new();
        let mut index = BTreeMap::new();
        for v in domain {
            if !index.contains_key(&v) {
                index.insert(v.clone(), unique.len());
                unique.push(v);
            }
        }
        Self::build(Arc::from(unique), index, range, padding)
    }

    /// Create a band scale over an already de-duplicated shared order.
    #[must_use]
    pub fn shared(domain: Arc<[Value]>, range: (f64, f64), padding: f64) -> Self {
        let mut index = BTreeMap::new();
        for (i, v) in domain.iter().enumerate() {
            index.entry(v.clone()).or_insert(i);
        }
        Self::build(domain, index, range, padding)
    }

    fn build(domain: Arc<[Value]>, index: BTreeMap<Value, usize>, range: (f64, f64), padding: f64) -> Self {
        let padding = padding.clamp(0.0, 1.0);
        let n = domain.len() as f64;
        let reverse = range.1 < range.0;
        let (lo, hi) = if reverse { (range.1, range.0) } else { (range.0, range.1) };

        // Inner and outer padding are both `padding`, bands centred in range.
        let step = (hi - lo) / (n - padding + padding * 2.0).max(1.0);
        let bandwidth = step * (1.0 - padding);
        let start = lo + (hi - lo - step * (n - padding)) * 0.5;

        Self { domain, index, range, padding, step, bandwidth, start }
    }

    /// Categories in display order.
    #[must_use]
    pub fn domain(&self) -> &Arc<[Value]> {
        &self.domain
    }

    /// Width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Padding fraction between bands.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Start of the band for `value`, or `None` when it is not in the domain.
    #[must_use]
    pub fn position(&self, value: &Value) -> Option<f64> {
        let i = *self.index.get(value)?;
        let reverse = self.range.1 < self.range.0;
        let i = if reverse { self.domain.len() - 1 - i } else { i };
        Some(self.start + self.step * i as f64)
    }

    /// Range extent.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Ordinal color scale.
///
/// Domain values without a matching range entry, and values outside the
/// domain, resolve to `None` ("unknown") rather than cycling the range.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<Value>,
    range: Vec<Rgba>,
    index: BTreeMap<Value, usize>,
}

impl OrdinalScale {
    /// Create an ordinal scale.
    #[must_use]
    pub fn new(domain: Vec<Value>, range: Vec<Rgba>) -> Self {
        if range.len() < domain.len() {
            warn!(
                domain = domain.len(),
                range = range.len(),
                "ordinal color range shorter than domain; extra values render as unknown"
            );
        }
        let mut index = BTreeMap::new();
        for (i, v) in domain.iter().enumerate() {
            index.entry(v.clone()).or_insert(i);
        }
        Self { domain, range, index }
    }

    /// Domain values.
    #[must_use]
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    /// Color for `value`, or `None` when unmapped.
    #[must_use]
    pub fn color(&self, value: &Value) -> Option<Rgba> {
        self.index.get(value).and_then(|&i| self.range.get(i).copied())
    }
}

impl Scale<&Value, Rgba> for OrdinalScale {
    fn scale(&self, value: &Value) -> Rgba {
        self.color(value).unwrap_or(Rgba::UNKNOWN)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (
            self.range.first().copied().unwrap_or(Rgba::UNKNOWN),
            self.range.last().copied().unwrap_or(Rgba::UNKNOWN),
        )
    }
}

/// Sequential color scale: a `[min, max]` domain through an interpolator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    interpolator: Interpolator,
    domain_min: f64,
    domain_max: f64,
}

impl SequentialScale {
    /// Create a sequential scale.
    #[must_use]
    pub fn new(interpolator: Interpolator, domain: (f64, f64)) -> Self {
        Self { interpolator, domain_min: domain.0, domain_max: domain.1 }
    }

    /// Domain extent.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Interpolator in use.
    #[must_use]
    pub fn interpolator(&self) -> Interpolator {
        self.interpolator
    }
}

impl Scale<f64, Rgba> for SequentialScale {
    fn scale(&self, value: f64) -> Rgba {
        if self.domain_max == self.domain_min {
            return self.interpolator.interpolate(0.5);
        }
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.interpolator.interpolate(t)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (self.interpolator.interpolate(0.0), self.interpolator.interpolate(1.0))
    }
}

// ============================================================================
// Positional axis scale
// ============================================================================

/// Domain handed to [`crate::axis::AxisConfig::create_scale`].
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// `[min, max]` extent; either bound may be missing when there is no data.
    Extent(Option<Value>, Option<Value>),
    /// Every category, in order (duplicates allowed).
    Values(Vec<Value>),
    /// A shared, already de-duplicated category order.
    Shared(Arc<[Value]>),
}

impl Domain {
    /// Extent of `values`, with `None` bounds for an empty iterator.
    pub fn extent<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut lo: Option<&Value> = None;
        let mut hi: Option<&Value> = None;
        for v in values {
            if lo.map_or(true, |l| v < l) {
                lo = Some(v);
            }
            if hi.map_or(true, |h| v > h) {
                hi = Some(v);
            }
        }
        Domain::Extent(lo.cloned(), hi.cloned())
    }

    /// Numeric extent `[lo, hi]`.
    #[must_use]
    pub fn numbers(lo: f64, hi: f64) -> Self {
        Domain::Extent(Some(Value::Number(lo)), Some(Value::Number(hi)))
    }
}

/// One tick of a rendered axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Domain value the tick labels.
    pub value: Value,
    /// Pixel offset along the axis.
    pub position: f64,
}

/// The positional scale of an x or y axis.
#[derive(Debug, Clone)]
pub enum AxisScale {
    /// Categorical bands.
    Band(BandScale),
    /// Linear.
    Linear(LinearScale),
    /// Square root.
    Sqrt(SqrtScale),
    /// Time.
    Time(TimeScale),
}

impl AxisScale {
    /// Pixel position of `value` (band start for categorical scales).
    ///
    /// Returns `None` for values the scale cannot place.
    #[must_use]
    pub fn position(&self, value: &Value) -> Option<f64> {
        match self {
            AxisScale::Band(s) => s.position(value),
            AxisScale::Linear(s) => value.as_f64().map(|v| s.scale(v)),
            AxisScale::Sqrt(s) => value.as_f64().map(|v| s.scale(v)),
            AxisScale::Time(s) => value.as_date().map(|v| s.scale(v)),
        }
    }

    /// Band width, zero for continuous scales.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            AxisScale::Band(s) => s.bandwidth(),
            _ => 0.0,
        }
    }

    /// Pixel range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            AxisScale::Band(s) => s.range(),
            AxisScale::Linear(s) => s.range(),
            AxisScale::Sqrt(s) => s.range(),
            AxisScale::Time(s) => s.range(),
        }
    }

    /// Domain as values: every category, or the two extent bounds.
    #[must_use]
    pub fn domain_values(&self) -> Vec<Value> {
        match self {
            AxisScale::Band(s) => s.domain().to_vec(),
            AxisScale::Linear(s) => vec![Value::Number(s.domain().0), Value::Number(s.domain().1)],
            AxisScale::Sqrt(s) => vec![Value::Number(s.domain().0), Value::Number(s.domain().1)],
            AxisScale::Time(s) => vec![Value::Date(s.domain().0), Value::Date(s.domain().1)],
        }
    }

    /// Whether the scale is categorical.
    #[must_use]
    pub fn is_band(&self) -> bool {
        matches!(self, AxisScale::Band(_))
    }

    /// Axis ticks. Categorical scales tick every band at its centre and
    /// ignore `count`; continuous scales use `count` as a hint (default 10).
    #[must_use]
    pub fn ticks(&self, count: Option<usize>) -> Vec<Tick> {
        let count = count.unwrap_or(10);
        match self {
            AxisScale::Band(s) => s
                .domain()
                .iter()
                .filter_map(|v| {
                    s.position(v).map(|p| Tick { value: v.clone(), position: p + s.bandwidth() / 2.0 })
                })
                .collect(),
            AxisScale::Linear(s) => s
                .ticks(count)
                .into_iter()
                .map(|v| Tick { value: Value::Number(v), position: s.scale(v) })
                .collect(),
            AxisScale::Sqrt(s) => s
                .ticks(count)
                .into_iter()
                .map(|v| Tick { value: Value::Number(v), position: s.scale(v) })
                .collect(),
            AxisScale::Time(s) => s
                .ticks(count)
                .into_iter()
                .map(|v| Tick { value: Value::Date(v), position: s.scale(v) })
                .collect(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_ticks_inside_domain(a in -1e6f64..1e6, b in -1e6f64..1e6, count in 1usize..20) {
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            for t in ticks(lo, hi, count) {
                prop_assert!(t >= lo - 1e-6 * (hi - lo).abs().max(1.0));
                prop_assert!(t <= hi + 1e-6 * (hi - lo).abs().max(1.0));
            }
        }

        #[test]
        fn prop_band_positions_within_range(n in 1usize..50, width in 1.0f64..2000.0, padding in 0.0f64..1.0) {
            let scale = BandScale::new((0..n).map(Value::from), (0.0, width), padding);
            for i in 0..n {
                let p = scale.position(&Value::from(i)).expect("domain value");
                prop_assert!(p >= -1e-9);
                prop_assert!(p + scale.bandwidth() <= width + 1e-9);
            }
        }
    }
}
