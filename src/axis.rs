//! Axis resolution.
//!
//! An [`AxisConfig`] is resolved once per plot from the per-plot-type default
//! tables and an optional user [`AxisOverride`]. Explicit overrides always
//! win; everything else is recomputed from the plot type and orientation.

use crate::color::{Interpolator, Rgba};
use crate::error::{Error, Result};
use crate::plot::defaults;
use crate::plot::PlotType;
use crate::scale::{
    AxisScale, BandScale, Domain, LinearScale, OrdinalScale, ScaleKind, SequentialScale, SqrtScale, TimeScale,
};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Which axis of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisRole {
    /// Horizontal axis.
    #[serde(rename = "x")]
    X,
    /// Vertical axis.
    #[serde(rename = "y")]
    Y,
    /// Color axis.
    #[serde(rename = "c")]
    Color,
}

impl AxisRole {
    /// Short name ("x", "y" or "c").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AxisRole::X => "x",
            AxisRole::Y => "y",
            AxisRole::Color => "c",
        }
    }
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    /// Above the plot area.
    Top,
    /// Right of the plot area.
    Right,
    /// Below the plot area.
    Bottom,
    /// Left of the plot area.
    Left,
}

impl AxisOrientation {
    /// Lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AxisOrientation::Top => "top",
            AxisOrientation::Right => "right",
            AxisOrientation::Bottom => "bottom",
            AxisOrientation::Left => "left",
        }
    }

    /// Whether an axis with this orientation may serve `role`.
    #[must_use]
    pub fn fits(self, role: AxisRole) -> bool {
        match role {
            AxisRole::X => matches!(self, AxisOrientation::Top | AxisOrientation::Bottom),
            AxisRole::Y => matches!(self, AxisOrientation::Left | AxisOrientation::Right),
            AxisRole::Color => false,
        }
    }
}

impl fmt::Display for AxisOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Plot orientation, `1` (positive) or `-1` (negative) in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum PlotOrientation {
    /// Default orientation.
    #[default]
    Positive,
    /// Flipped orientation.
    Negative,
}

impl TryFrom<i8> for PlotOrientation {
    type Error = String;

    fn try_from(v: i8) -> std::result::Result<Self, String> {
        match v {
            1 => Ok(PlotOrientation::Positive),
            -1 => Ok(PlotOrientation::Negative),
            other => Err(format!("plot orientation must be 1 or -1, got {other}")),
        }
    }
}

impl From<PlotOrientation> for i8 {
    fn from(o: PlotOrientation) -> i8 {
        match o {
            PlotOrientation::Positive => 1,
            PlotOrientation::Negative => -1,
        }
    }
}

/// Horizontal anchoring of axis label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Anchor at start.
    Start,
    /// Anchor at middle.
    Middle,
    /// Anchor at end.
    End,
}

impl TextAnchor {
    /// SVG attribute value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// User overrides for an x or y axis. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisOverride {
    /// Scale kind, replacing the plot-type default unconditionally.
    pub scale_type: Option<ScaleKind>,
    /// Axis title.
    pub title: Option<String>,
    /// Tick count hint (numerical scales only).
    pub ticks: Option<usize>,
    /// Whether the axis is drawn at all.
    pub display: Option<bool>,
    /// Lower domain bound (numerical scales only).
    pub min: Option<Value>,
    /// Upper domain bound (numerical scales only).
    pub max: Option<Value>,
    /// Side of the plot.
    pub orientation: Option<AxisOrientation>,
    /// Padding between categorical bands, in `[0, 1]`.
    pub padding: Option<f64>,
    /// Label rotation in degrees.
    pub angle: Option<f64>,
    /// Label anchoring.
    #[serde(alias = "text-anchor")]
    pub text_anchor: Option<TextAnchor>,
    /// Remove tick marks after drawing.
    pub hide_ticks: Option<bool>,
    /// Remove tick labels after drawing.
    pub hide_labels: Option<bool>,
    /// Do not draw the title.
    pub hide_title: Option<bool>,
    /// Explicit categorical domain, replacing the data-derived one.
    pub order: Option<Arc<[Value]>>,
}

impl AxisOverride {
    /// Override binding a categorical axis to a shared order.
    #[must_use]
    pub fn with_order(order: Arc<[Value]>) -> Self {
        Self { order: Some(order), ..Self::default() }
    }

    /// Combine two overrides; fields set in `other` win.
    #[must_use]
    pub fn merge(&self, other: &AxisOverride) -> AxisOverride {
        AxisOverride {
            scale_type: other.scale_type.or(self.scale_type),
            title: other.title.clone().or_else(|| self.title.clone()),
            ticks: other.ticks.or(self.ticks),
            display: other.display.or(self.display),
            min: other.min.clone().or_else(|| self.min.clone()),
            max: other.max.clone().or_else(|| self.max.clone()),
            orientation: other.orientation.or(self.orientation),
            padding: other.padding.or(self.padding),
            angle: other.angle.or(self.angle),
            text_anchor: other.text_anchor.or(self.text_anchor),
            hide_ticks: other.hide_ticks.or(self.hide_ticks),
            hide_labels: other.hide_labels.or(self.hide_labels),
            hide_title: other.hide_title.or(self.hide_title),
            order: other.order.clone().or_else(|| self.order.clone()),
        }
    }
}

/// Resolved state of an x or y axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    /// Axis role.
    pub role: AxisRole,
    /// Scale kind.
    pub scale_kind: ScaleKind,
    /// Title text.
    pub title: Option<String>,
    /// Whether the axis is drawn.
    pub displayed: bool,
    /// Lower domain clip.
    pub min: Option<Value>,
    /// Upper domain clip.
    pub max: Option<Value>,
    /// Side of the plot.
    pub orientation: AxisOrientation,
    /// Tick count hint.
    pub tick_count: Option<usize>,
    /// Tick marks removed after drawing.
    pub ticks_hidden: bool,
    /// Tick labels removed after drawing.
    pub labels_hidden: bool,
    /// Title suppressed.
    pub title_hidden: bool,
    /// Label rotation in degrees.
    pub text_angle: f64,
    /// Label anchoring.
    pub text_anchor: Option<TextAnchor>,
    /// Categorical band padding.
    pub padding: f64,
    /// Explicit categorical order.
    #[serde(skip)]
    pub order: Option<Arc<[Value]>>,
}

impl AxisConfig {
    /// Resolve an x or y axis for a plot type and orientation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAxisOrientation`] if the final orientation does
    /// not fit the role, and [`Error::ScaleDomain`] for a color role or a
    /// plot type with no positional scale for the role.
    pub fn resolve(
        role: AxisRole,
        plot_type: PlotType,
        orientation: PlotOrientation,
        overrides: Option<&AxisOverride>,
    ) -> Result<Self> {
        if role == AxisRole::Color {
            return Err(Error::ScaleDomain("color axis is resolved by ColorAxisConfig".to_string()));
        }
        let empty = AxisOverride::default();
        let o = overrides.unwrap_or(&empty);

        let scale_kind = match o.scale_type {
            Some(kind) => kind,
            None => defaults::scale_kind(plot_type, role)
                .ok_or_else(|| Error::ScaleDomain(format!("{plot_type} has no default {role} scale")))?,
        };
        let axis_orientation =
            o.orientation.unwrap_or_else(|| defaults::axis_orientation(plot_type, role, orientation));

        let config = Self {
            role,
            scale_kind,
            title: o.title.clone().or_else(|| Some(defaults::axis_title(role).to_string())),
            displayed: o.display.unwrap_or_else(|| defaults::axis_displayed(plot_type)),
            min: o.min.clone(),
            max: o.max.clone(),
            orientation: axis_orientation,
            tick_count: o.ticks,
            ticks_hidden: o.hide_ticks.unwrap_or(false),
            labels_hidden: o.hide_labels.unwrap_or(false),
            title_hidden: o.hide_title.unwrap_or(false),
            text_angle: o.angle.unwrap_or(0.0),
            text_anchor: o.text_anchor,
            padding: o.padding.unwrap_or(defaults::BAND_PADDING),
            order: o.order.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the orientation fits the role.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAxisOrientation`] on mismatch.
    pub fn validate(&self) -> Result<()> {
        if self.orientation.fits(self.role) {
            Ok(())
        } else {
            Err(Error::InvalidAxisOrientation {
                role: self.role.to_string(),
                orientation: self.orientation.to_string(),
            })
        }
    }

    /// Build the positional scale for `domain` and pixel `range`.
    ///
    /// Numerical kinds clip the domain with `min`/`max`; categorical kinds use
    /// the explicit `order` when one is set, and `padding` between bands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDomain`] when a numerical domain has no bounds,
    /// and [`Error::ScaleDomain`] when bounds have the wrong value kind.
    pub fn create_scale(&self, domain: Domain, range: (f64, f64)) -> Result<AxisScale> {
        match self.scale_kind {
            ScaleKind::Categorical | ScaleKind::Ordinal => Ok(AxisScale::Band(self.band_scale(domain, range))),
            ScaleKind::Linear | ScaleKind::Sequential => {
                let (lo, hi) = self.clipped(domain)?;
                Ok(AxisScale::Linear(LinearScale::new((self.number(&lo)?, self.number(&hi)?), range)?))
            }
            ScaleKind::Sqrt => {
                let (lo, hi) = self.clipped(domain)?;
                Ok(AxisScale::Sqrt(SqrtScale::new((self.number(&lo)?, self.number(&hi)?), range)?))
            }
            ScaleKind::Temporal => {
                let (lo, hi) = self.clipped(domain)?;
                Ok(AxisScale::Time(TimeScale::new((self.date(&lo)?, self.date(&hi)?), range)?))
            }
        }
    }

    fn band_scale(&self, domain: Domain, range: (f64, f64)) -> BandScale {
        if let Some(order) = &self.order {
            return BandScale::shared(Arc::clone(order), range, self.padding);
        }
        match domain {
            Domain::Shared(order) => BandScale::shared(order, range, self.padding),
            Domain::Values(values) => BandScale::new(values, range, self.padding),
            Domain::Extent(lo, hi) => BandScale::new(lo.into_iter().chain(hi), range, self.padding),
        }
    }

    fn clipped(&self, domain: Domain) -> Result<(Value, Value)> {
        let (lo, hi) = match domain {
            Domain::Extent(lo, hi) => (lo, hi),
            Domain::Values(values) => extent_of(values.iter()),
            Domain::Shared(values) => extent_of(values.iter()),
        };
        let lo = self.min.clone().or(lo);
        let hi = self.max.clone().or(hi);
        match (lo, hi) {
            (Some(lo), Some(hi)) => Ok((lo, hi)),
            _ => Err(Error::EmptyDomain(self.role.name())),
        }
    }

    fn number(&self, v: &Value) -> Result<f64> {
        v.as_f64().ok_or_else(|| {
            Error::ScaleDomain(format!("{} bound {v} is not numeric for {} scale", self.role, self.scale_kind))
        })
    }

    fn date(&self, v: &Value) -> Result<chrono::NaiveDateTime> {
        v.as_date().ok_or_else(|| {
            Error::ScaleDomain(format!("{} bound {v} is not a timestamp for {} scale", self.role, self.scale_kind))
        })
    }
}

fn extent_of<'a>(values: impl Iterator<Item = &'a Value>) -> (Option<Value>, Option<Value>) {
    match Domain::extent(values) {
        Domain::Extent(lo, hi) => (lo, hi),
        _ => (None, None),
    }
}

/// User overrides for the color axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorAxisOverride {
    /// `ordinal` or `sequential`.
    pub scale_type: Option<ScaleKind>,
    /// Ordinal: every mapped value. Sequential: `[min, max]`.
    pub domain: Option<Vec<Value>>,
    /// Ordinal colors, parallel to `domain`.
    pub range: Option<Vec<Rgba>>,
    /// Sequential interpolator.
    pub interpolator: Option<Interpolator>,
}

/// Resolved color scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    /// Discrete colors.
    Ordinal(OrdinalScale),
    /// Interpolated colors.
    Sequential(SequentialScale),
}

impl ColorScale {
    /// Color for `value`, or `None` ("unknown") when it cannot be mapped.
    #[must_use]
    pub fn color(&self, value: &Value) -> Option<Rgba> {
        match self {
            ColorScale::Ordinal(s) => s.color(value),
            ColorScale::Sequential(s) => value.as_f64().map(|v| crate::scale::Scale::scale(s, v)),
        }
    }
}

/// Resolve the color axis of a plot.
///
/// Returns `Ok(None)` when there is no color kind for the plot (no override
/// and no default). Missing domains fall back to the color values in `data`.
///
/// # Errors
///
/// Returns [`Error::MissingInterpolator`] for a sequential axis without an
/// interpolator.
pub fn resolve_color(
    plot_type: PlotType,
    overrides: Option<&ColorAxisOverride>,
    colors: &[Value],
) -> Result<Option<ColorScale>> {
    let Some(o) = overrides else {
        return Ok(None);
    };
    let kind = o.scale_type.or_else(|| defaults::scale_kind(plot_type, AxisRole::Color));
    match kind {
        Some(ScaleKind::Ordinal) => {
            let domain = o.domain.clone().unwrap_or_else(|| {
                let mut seen = Vec::new();
                for c in colors {
                    if !seen.contains(c) {
                        seen.push(c.clone());
                    }
                }
                seen
            });
            Ok(Some(ColorScale::Ordinal(OrdinalScale::new(domain, o.range.clone().unwrap_or_default()))))
        }
        Some(ScaleKind::Sequential) => {
            let interpolator = o.interpolator.ok_or(Error::MissingInterpolator)?;
            let bounds = match o.domain.as_deref() {
                Some([lo, hi, ..]) => (lo.as_f64(), hi.as_f64()),
                _ => {
                    let nums: Vec<f64> = colors.iter().filter_map(Value::as_f64).collect();
                    let lo = nums.iter().copied().reduce(f64::min);
                    let hi = nums.iter().copied().reduce(f64::max);
                    (lo, hi)
                }
            };
            let (lo, hi) = match bounds {
                (Some(lo), Some(hi)) => (lo, hi),
                _ => {
                    warn!(%plot_type, "sequential color axis has no numeric domain; using [0, 1]");
                    (0.0, 1.0)
                }
            };
            Ok(Some(ColorScale::Sequential(SequentialScale::new(interpolator, (lo, hi)))))
        }
        Some(other) => {
            warn!(%plot_type, kind = %other, "unsupported color scale kind; colors render as unknown");
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Requested change to an existing axis domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisUpdate {
    /// New categorical order.
    pub order: Option<Vec<Value>>,
    /// New numerical lower bound.
    pub min: Option<Value>,
    /// New numerical upper bound.
    pub max: Option<Value>,
}

impl AxisUpdate {
    /// Check the update against the axis scale kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AxisUpdate`] when nothing is requested, when `order`
    /// is combined with bounds, or when the request does not fit the kind.
    pub fn validate(&self, kind: ScaleKind) -> Result<()> {
        let bounds = self.min.is_some() || self.max.is_some();
        if self.order.is_none() && !bounds {
            return Err(Error::AxisUpdate("No updates were provided".to_string()));
        }
        if self.order.is_some() && bounds {
            return Err(Error::AxisUpdate(
                "Use `order` OR `min` and `max` to set the new axis domain".to_string(),
            ));
        }
        if kind.is_numerical() && !bounds {
            return Err(Error::AxisUpdate("Numerical scales should be updated using min and max".to_string()));
        }
        if !kind.is_numerical() && self.order.is_none() {
            return Err(Error::AxisUpdate("Use order to update a categorical axis".to_string()));
        }
        Ok(())
    }
}
