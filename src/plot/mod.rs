//! Plot resolution.
//!
//! A [`Plot`] is data, a [`PlotType`], a render target and an optional
//! [`PlotConfig`]. [`Plot::resolve`] merges the config over the per-type
//! defaults, derives domains and ranges and returns an immutable
//! [`ResolvedPlot`] holding the final [`ScaleBundle`].
//!
//! # Example
//!
//! ```rust
//! use trueno_lattice::prelude::*;
//!
//! let data = vec![Point::new("A", 10).series("s1"), Point::new("A", 5).series("s2")];
//! let plot = Plot::new(data, PlotType::StackedColumn, "chart")
//!     .config(PlotConfig::default().series(vec![
//!         SeriesSpec::new("s1", Rgba::RED),
//!         SeriesSpec::new("s2", Rgba::BLUE),
//!     ]))
//!     .resolve()
//!     .unwrap();
//!
//! assert_eq!(plot.scales.y.domain_values()[1], Value::from(15));
//! ```

pub mod config;
pub mod defaults;
pub mod pie;
pub mod stack;
pub mod tooltip;

use crate::axis::{
    resolve_color, AxisConfig, AxisOverride, AxisRole, AxisUpdate, ColorAxisOverride, ColorScale, PlotOrientation,
};
use crate::color::TABLEAU10;
use crate::data::{Attr, Point};
use crate::error::{Error, Result};
use crate::scale::{AxisScale, Domain, SqrtScale};
use crate::value::Value;
use config::{Padding, PlotConfig, SeriesSpec};
use pie::DonutLayout;
use serde::{Deserialize, Serialize};
use stack::DataStack;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tooltip::TooltipConfig;
use tracing::{debug, warn};

/// Supported plot kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotType {
    /// Filled area under a line.
    #[serde(rename = "areaplot")]
    Area,
    /// One tick per value along x.
    #[serde(rename = "barcodeplot")]
    Barcode,
    /// Horizontal bars.
    #[serde(rename = "barplot")]
    Bar,
    /// Heatmap with discrete colors.
    #[serde(rename = "categoricalheatmap")]
    CategoricalHeatmap,
    /// Vertical bars.
    #[serde(rename = "columnplot")]
    Column,
    /// Heatmap with continuous colors.
    #[serde(rename = "heatmap")]
    Heatmap,
    /// Line.
    #[serde(rename = "lineplot")]
    Line,
    /// Scatter.
    #[serde(rename = "scatterplot")]
    Scatter,
    /// Horizontal stacked bars.
    #[serde(rename = "stackedbarplot")]
    StackedBar,
    /// Vertical stacked bars.
    #[serde(rename = "stackedcolumnplot")]
    StackedColumn,
    /// Donut.
    #[serde(rename = "donutplot")]
    Donut,
}

impl PlotType {
    /// Every plot type.
    pub const ALL: [PlotType; 11] = [
        PlotType::Area,
        PlotType::Barcode,
        PlotType::Bar,
        PlotType::CategoricalHeatmap,
        PlotType::Column,
        PlotType::Heatmap,
        PlotType::Line,
        PlotType::Scatter,
        PlotType::StackedBar,
        PlotType::StackedColumn,
        PlotType::Donut,
    ];

    /// Document name, e.g. `"stackedcolumnplot"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PlotType::Area => "areaplot",
            PlotType::Barcode => "barcodeplot",
            PlotType::Bar => "barplot",
            PlotType::CategoricalHeatmap => "categoricalheatmap",
            PlotType::Column => "columnplot",
            PlotType::Heatmap => "heatmap",
            PlotType::Line => "lineplot",
            PlotType::Scatter => "scatterplot",
            PlotType::StackedBar => "stackedbarplot",
            PlotType::StackedColumn => "stackedcolumnplot",
            PlotType::Donut => "donutplot",
        }
    }

    /// Attribute the data is stacked on, for stacked types.
    #[must_use]
    pub fn stack_key(self) -> Option<Attr> {
        match self {
            PlotType::StackedBar => Some(Attr::Y),
            PlotType::StackedColumn => Some(Attr::X),
            _ => None,
        }
    }

    /// Whether the type stacks its data.
    #[must_use]
    pub fn is_stacked(self) -> bool {
        self.stack_key().is_some()
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PlotType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::UnknownPlotType(s.to_string()))
    }
}

/// Direction for [`ResolvedPlot::sort_axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Unresolved plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    data: Vec<Point>,
    plot_type: PlotType,
    target: String,
    config: PlotConfig,
}

impl Plot {
    /// Create a plot of `plot_type` over `data`, rendered into `target`.
    #[must_use]
    pub fn new(data: Vec<Point>, plot_type: PlotType, target: impl Into<String>) -> Self {
        Self { data, plot_type, target: target.into(), config: PlotConfig::default() }
    }

    /// Create a plot from a plot type name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPlotType`] for names outside the vocabulary.
    pub fn named(data: Vec<Point>, plot_type: &str, target: impl Into<String>) -> Result<Self> {
        Ok(Self::new(data, plot_type.parse()?, target))
    }

    /// Set the user configuration.
    #[must_use]
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Plot type.
    #[must_use]
    pub fn plot_type(&self) -> PlotType {
        self.plot_type
    }

    /// Resolve configuration, stack and scales.
    ///
    /// # Errors
    ///
    /// Fails on configuration errors (missing target, bad axis orientation,
    /// series problems) and on data that does not fit the axis scale kinds;
    /// nothing is partially resolved.
    pub fn resolve(&self) -> Result<ResolvedPlot> {
        if self.target.trim().is_empty() {
            return Err(Error::MissingRenderTarget);
        }
        let plot_type = self.plot_type;
        let config = &self.config;

        let orientation = config.orientation.unwrap_or_default();
        let width = config.width.unwrap_or(defaults::PLOT_WIDTH);
        let height = config.height.unwrap_or(defaults::PLOT_HEIGHT);
        let padding = config.resolved_padding();

        let x_axis = AxisConfig::resolve(AxisRole::X, plot_type, orientation, config.axis.x.as_ref())?;
        let y_axis = AxisConfig::resolve(AxisRole::Y, plot_type, orientation, config.axis.y.as_ref())?;
        let tooltip = config.resolved_tooltip(plot_type, &self.target);

        let inner_width = width - padding.horizontal();
        let inner_height = height - padding.vertical();

        let stack = if plot_type.is_stacked() {
            Some(DataStack::build(plot_type, &self.data, &config.series)?)
        } else {
            None
        };

        for p in &self.data {
            p.check_scales(x_axis.scale_kind, y_axis.scale_kind)?;
        }

        let (x_domain, x_range, y_domain, y_range) =
            self.domains(orientation, inner_width, inner_height, stack.as_ref());
        let scales = ScaleBundle {
            x: x_axis.create_scale(x_domain, x_range)?,
            y: y_axis.create_scale(y_domain, y_range)?,
            radius: self.radius_scale(),
            color: self.color_scale()?,
        };

        let donut = (plot_type == PlotType::Donut).then(|| DonutLayout::new(&self.data, inner_width, inner_height));

        debug!(
            target = %self.target,
            %plot_type,
            points = self.data.len(),
            inner_width,
            inner_height,
            "resolved plot"
        );

        Ok(ResolvedPlot {
            plot_type,
            target: self.target.clone(),
            width,
            height,
            orientation,
            title: config.title.clone(),
            padding,
            inner_width,
            inner_height,
            x_axis,
            y_axis,
            tooltip,
            series: config.series.clone(),
            data: self.data.clone(),
            stack,
            donut,
            scales,
            config: config.clone(),
        })
    }

    /// Domains and ranges, table-driven by plot type.
    fn domains(
        &self,
        orientation: PlotOrientation,
        inner_width: f64,
        inner_height: f64,
        stack: Option<&DataStack>,
    ) -> (Domain, (f64, f64), Domain, (f64, f64)) {
        let all = |attr: Attr| Domain::Values(self.data.iter().map(|p| p.get(attr).clone()).collect());
        let extent = |attr: Attr| Domain::extent(self.data.iter().map(|p| p.get(attr)));
        let stack_max = stack.map_or(0.0, DataStack::max_end);

        let x_range = (0.0, inner_width);
        let y_range = (inner_height, 0.0);
        let y_down = (0.0, inner_height);

        match self.plot_type {
            PlotType::Scatter | PlotType::Line | PlotType::Area => (extent(Attr::X), x_range, extent(Attr::Y), y_range),
            PlotType::Barcode => (extent(Attr::X), x_range, Domain::numbers(0.0, 1.0), y_range),
            PlotType::Bar => (extent(Attr::X), x_range, all(Attr::Y), y_down),
            PlotType::Heatmap | PlotType::CategoricalHeatmap => (all(Attr::X), x_range, all(Attr::Y), y_down),
            PlotType::Column => (all(Attr::X), x_range, extent(Attr::Y), y_range),
            PlotType::StackedBar => {
                let x_range = match orientation {
                    PlotOrientation::Positive => x_range,
                    PlotOrientation::Negative => (inner_width, 0.0),
                };
                (Domain::numbers(0.0, stack_max), x_range, all(Attr::Y), y_down)
            }
            PlotType::StackedColumn => (all(Attr::X), x_range, Domain::numbers(0.0, stack_max), y_range),
            PlotType::Donut => {
                let max = self.data.iter().filter_map(|p| p.y.as_f64()).fold(0.0, f64::max);
                (all(Attr::X), x_range, Domain::numbers(0.0, max), y_range)
            }
        }
    }

    fn radius_scale(&self) -> Option<SqrtScale> {
        if self.plot_type != PlotType::Scatter {
            return None;
        }
        let radii: Vec<f64> = self.data.iter().filter_map(|p| p.radius).collect();
        if radii.is_empty() {
            if !self.data.is_empty() {
                debug!(target = %self.target, "no radius values; scatter marks use the minimum radius");
            }
            return None;
        }
        let lo = radii.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = radii.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        match SqrtScale::new((lo, hi), defaults::RADIUS_RANGE) {
            Ok(s) => Some(s),
            Err(err) => {
                warn!(target = %self.target, %err, "radius scale unavailable");
                None
            }
        }
    }

    fn color_scale(&self) -> Result<Option<ColorScale>> {
        let colors: Vec<Value> = self.data.iter().filter_map(|p| p.color.clone()).collect();
        if self.plot_type == PlotType::Donut {
            let mut categories: Vec<Value> = Vec::new();
            for p in &self.data {
                if !categories.contains(&p.x) {
                    categories.push(p.x.clone());
                }
            }
            let range = TABLEAU10.iter().copied().cycle().take(categories.len()).collect();
            let base = ColorAxisOverride {
                scale_type: Some(crate::scale::ScaleKind::Ordinal),
                domain: Some(categories),
                range: Some(range),
                interpolator: None,
            };
            let merged = match &self.config.axis.c {
                Some(o) => ColorAxisOverride {
                    scale_type: o.scale_type.or(base.scale_type),
                    domain: o.domain.clone().or(base.domain),
                    range: o.range.clone().or(base.range),
                    interpolator: o.interpolator,
                },
                None => base,
            };
            return resolve_color(self.plot_type, Some(&merged), &colors);
        }
        resolve_color(self.plot_type, self.config.axis.c.as_ref(), &colors)
    }
}

/// Final scales of a plot.
#[derive(Debug, Clone)]
pub struct ScaleBundle {
    /// Horizontal position.
    pub x: AxisScale,
    /// Vertical position.
    pub y: AxisScale,
    /// Scatter point radius; `None` when the data carries no radii.
    pub radius: Option<SqrtScale>,
    /// Mark color.
    pub color: Option<ColorScale>,
}

/// Resolved, immutable plot ready for layout and rendering.
#[derive(Debug, Clone)]
pub struct ResolvedPlot {
    /// Plot type.
    pub plot_type: PlotType,
    /// Render target id.
    pub target: String,
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Orientation.
    pub orientation: PlotOrientation,
    /// Title.
    pub title: Option<String>,
    /// Padding.
    pub padding: Padding,
    /// Drawable width.
    pub inner_width: f64,
    /// Drawable height.
    pub inner_height: f64,
    /// Horizontal axis.
    pub x_axis: AxisConfig,
    /// Vertical axis.
    pub y_axis: AxisConfig,
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
    /// Declared series.
    pub series: Vec<SeriesSpec>,
    /// Validated data.
    pub data: Vec<Point>,
    /// Stack, for stacked types.
    pub stack: Option<DataStack>,
    /// Slice layout, for donuts.
    pub donut: Option<DonutLayout>,
    /// Scales.
    pub scales: ScaleBundle,
    config: PlotConfig,
}

/// Snapshot of a plot's customizable properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customizable {
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Orientation.
    pub orientation: PlotOrientation,
    /// Title.
    pub title: Option<String>,
    /// Padding.
    pub padding: Padding,
    /// Horizontal axis.
    pub x_axis: AxisConfig,
    /// Vertical axis.
    pub y_axis: AxisConfig,
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
    /// Declared series.
    pub series: Vec<SeriesSpec>,
}

impl ResolvedPlot {
    /// Customizable properties with their resolved values.
    #[must_use]
    pub fn customizable(&self) -> Customizable {
        Customizable {
            width: self.width,
            height: self.height,
            orientation: self.orientation,
            title: self.title.clone(),
            padding: self.padding,
            x_axis: self.x_axis.clone(),
            y_axis: self.y_axis.clone(),
            tooltip: self.tooltip.clone(),
            series: self.series.clone(),
        }
    }

    /// Resolved axis for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AxisUpdate`] for the color role.
    pub fn axis(&self, role: AxisRole) -> Result<&AxisConfig> {
        match role {
            AxisRole::X => Ok(&self.x_axis),
            AxisRole::Y => Ok(&self.y_axis),
            AxisRole::Color => Err(Error::AxisUpdate(format!("Invalid axis type {role}"))),
        }
    }

    fn axis_scale(&self, role: AxisRole) -> &AxisScale {
        match role {
            AxisRole::Y => &self.scales.y,
            _ => &self.scales.x,
        }
    }

    /// Re-resolve with the domain of `role` sorted.
    ///
    /// # Errors
    ///
    /// See [`ResolvedPlot::update_axis`].
    pub fn sort_axis(&self, role: AxisRole, direction: SortDirection) -> Result<ResolvedPlot> {
        let kind = self.axis(role)?.scale_kind;
        let mut domain = self.axis_scale(role).domain_values();
        domain.sort();
        if direction == SortDirection::Desc {
            domain.reverse();
        }

        let update = if kind.is_numerical() {
            AxisUpdate { order: None, min: domain.first().cloned(), max: domain.last().cloned() }
        } else {
            AxisUpdate { order: Some(domain), min: None, max: None }
        };
        self.update_axis(role, &update)
    }

    /// Re-resolve with a new categorical order or numerical bounds on `role`.
    ///
    /// Missing bounds keep the current domain bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AxisUpdate`] for the color role or an update that does
    /// not fit the axis scale kind.
    pub fn update_axis(&self, role: AxisRole, update: &AxisUpdate) -> Result<ResolvedPlot> {
        let kind = self.axis(role)?.scale_kind;
        update.validate(kind)?;

        let current = self.axis_scale(role).domain_values();
        let patch = if kind.is_numerical() {
            AxisOverride {
                min: update.min.clone().or_else(|| current.first().cloned()),
                max: update.max.clone().or_else(|| current.last().cloned()),
                ..AxisOverride::default()
            }
        } else {
            AxisOverride { order: update.order.clone().map(Arc::from), ..AxisOverride::default() }
        };

        let mut config = self.config.clone();
        let slot = match role {
            AxisRole::Y => &mut config.axis.y,
            _ => &mut config.axis.x,
        };
        *slot = Some(slot.take().unwrap_or_default().merge(&patch));

        Plot { data: self.data.clone(), plot_type: self.plot_type, target: self.target.clone(), config }.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::scale::ScaleKind;
    use approx::assert_relative_eq;
    use super::config::PaddingOverride;

    fn scatter() -> Vec<Point> {
        vec![Point::new(1.0, 2.0), Point::new(3.0, 8.0), Point::new(2.0, 5.0)]
    }

    #[test]
    fn test_plot_type_names() {
        assert_eq!("stackedcolumnplot".parse::<PlotType>().unwrap(), PlotType::StackedColumn);
        assert_eq!(PlotType::Heatmap.to_string(), "heatmap");
        let err = "pieplot".parse::<PlotType>().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized plot type pieplot");
        let t: PlotType = serde_json::from_str("\"donutplot\"").unwrap();
        assert_eq!(t, PlotType::Donut);
    }

    #[test]
    fn test_missing_target() {
        let err = Plot::new(scatter(), PlotType::Scatter, " ").resolve().unwrap_err();
        assert!(matches!(err, Error::MissingRenderTarget));
    }

    #[test]
    fn test_scatter_defaults() {
        let plot = Plot::new(scatter(), PlotType::Scatter, "root").resolve().unwrap();
        assert_relative_eq!(plot.inner_width, 200.0);
        assert_relative_eq!(plot.inner_height, 200.0);
        assert_eq!(plot.scales.x.domain_values(), vec![Value::from(1), Value::from(3)]);
        assert_eq!(plot.scales.y.range(), (200.0, 0.0));
        assert!(plot.scales.radius.is_none());
        assert!(plot.scales.color.is_none());
        assert_eq!(plot.tooltip.id, "root-tooltip");
    }

    #[test]
    fn test_padding_affects_inner_size() {
        let config = PlotConfig::default()
            .size(400.0, 300.0)
            .padding(PaddingOverride { left: Some(100.0), ..PaddingOverride::default() });
        let plot = Plot::new(scatter(), PlotType::Scatter, "root").config(config).resolve().unwrap();
        assert_relative_eq!(plot.inner_width, 250.0);
    }

    #[test]
    fn test_incompatible_data_fails_whole_plot() {
        let data = vec![Point::new(1.0, 2.0), Point::new("oops", 3.0)];
        let err = Plot::new(data, PlotType::Scatter, "root").resolve().unwrap_err();
        assert!(matches!(err, Error::IncompatibleValue { attr: "x", .. }));
    }

    #[test]
    fn test_bar_plot_categorical_y_top_down() {
        let data = vec![Point::new(3, "a"), Point::new(5, "b")];
        let plot = Plot::new(data, PlotType::Bar, "root").resolve().unwrap();
        assert!(plot.scales.y.is_band());
        assert_eq!(plot.scales.y.range(), (0.0, 200.0));
    }

    #[test]
    fn test_barcode_fixed_y() {
        let plot = Plot::new(scatter(), PlotType::Barcode, "root").resolve().unwrap();
        assert_eq!(plot.scales.y.domain_values(), vec![Value::from(0), Value::from(1)]);
    }

    #[test]
    fn test_stacked_bar_range_flips() {
        let data = vec![Point::new(3, "a").series("s1")];
        let config = PlotConfig::default()
            .orientation(PlotOrientation::Negative)
            .series(vec![SeriesSpec::new("s1", Rgba::RED)]);
        let plot = Plot::new(data, PlotType::StackedBar, "root").config(config).resolve().unwrap();
        assert_eq!(plot.scales.x.range(), (200.0, 0.0));
        assert_eq!(plot.scales.x.domain_values(), vec![Value::from(0), Value::from(3)]);
    }

    #[test]
    fn test_radius_scale_from_data() {
        let data = vec![Point::new(1.0, 1.0).radius(4.0), Point::new(2.0, 2.0).radius(16.0)];
        let plot = Plot::new(data, PlotType::Scatter, "root").resolve().unwrap();
        let r = plot.scales.radius.expect("radius scale");
        assert_relative_eq!(crate::scale::Scale::scale(&r, 16.0), 3.0);
    }

    #[test]
    fn test_donut_colors_and_hidden_axes() {
        let data = vec![Point::new("a", 1), Point::new("b", 3)];
        let plot = Plot::new(data, PlotType::Donut, "root").resolve().unwrap();
        assert!(!plot.x_axis.displayed);
        let color = plot.scales.color.as_ref().expect("donut color scale");
        assert_eq!(color.color(&Value::from("b")), Some(TABLEAU10[1]));
        assert_eq!(plot.donut.expect("donut layout").slices.len(), 2);
    }

    #[test]
    fn test_round_trip_identical() {
        let a = Plot::new(scatter(), PlotType::Scatter, "root").resolve().unwrap();
        let b = Plot::new(scatter(), PlotType::Scatter, "root").resolve().unwrap();
        assert_eq!(a.customizable(), b.customizable());
        assert_eq!(a.scales.x.domain_values(), b.scales.x.domain_values());
        assert_eq!(a.scales.y.range(), b.scales.y.range());
    }

    #[test]
    fn test_customizable_snapshot_serializes() {
        let plot = Plot::new(scatter(), PlotType::Scatter, "root").resolve().unwrap();
        let json = serde_json::to_value(plot.customizable()).unwrap();
        assert_eq!(json["width"], 300.0);
        assert_eq!(json["x_axis"]["scaleKind"], "linear");
        assert_eq!(json["orientation"], 1);
    }

    #[test]
    fn test_sort_categorical_axis() {
        let data = vec![Point::new("b", 1), Point::new("c", 2), Point::new("a", 3)];
        let plot = Plot::new(data, PlotType::Column, "root").resolve().unwrap();
        let sorted = plot.sort_axis(AxisRole::X, SortDirection::Desc).unwrap();
        assert_eq!(sorted.scales.x.domain_values(), vec![Value::from("c"), Value::from("b"), Value::from("a")]);
    }

    #[test]
    fn test_sort_numerical_axis_reverses() {
        let plot = Plot::new(scatter(), PlotType::Scatter, "root").resolve().unwrap();
        let sorted = plot.sort_axis(AxisRole::Y, SortDirection::Desc).unwrap();
        assert_eq!(sorted.scales.y.domain_values(), vec![Value::from(8), Value::from(2)]);
    }

    #[test]
    fn test_update_axis_bounds() {
        let plot = Plot::new(scatter(), PlotType::Scatter, "root").resolve().unwrap();
        let update = AxisUpdate { max: Some(Value::from(100)), ..AxisUpdate::default() };
        let updated = plot.update_axis(AxisRole::Y, &update).unwrap();
        assert_eq!(updated.scales.y.domain_values(), vec![Value::from(2), Value::from(100)]);
        assert!(plot.update_axis(AxisRole::Color, &update).is_err());
        let bad = AxisUpdate { order: Some(vec![Value::from(1)]), ..AxisUpdate::default() };
        assert!(plot.update_axis(AxisRole::Y, &bad).is_err());
    }

    #[test]
    fn test_user_scale_type_reuses_plot_type() {
        let data = vec![Point::new("a", "x"), Point::new("b", "y")];
        let config = PlotConfig::default().x_axis(AxisOverride {
            scale_type: Some(ScaleKind::Categorical),
            ..AxisOverride::default()
        });
        let err = Plot::new(data.clone(), PlotType::Scatter, "root").config(config.clone()).resolve();
        assert!(err.is_err(), "y is still linear");
        let config = config.y_axis(AxisOverride { scale_type: Some(ScaleKind::Categorical), ..AxisOverride::default() });
        let plot = Plot::new(data, PlotType::Scatter, "root").config(config).resolve().unwrap();
        assert!(plot.scales.x.is_band());
    }
}
