//! User configuration for a single plot.
//!
//! Each section is merged over its defaults by its own function, key by key,
//! so an override only ever touches the fields it names.

use crate::axis::{AxisOverride, ColorAxisOverride, PlotOrientation};
use crate::color::Rgba;
use crate::plot::defaults;
use crate::plot::tooltip::{TooltipConfig, TooltipFormat};
use crate::plot::PlotType;
use serde::{Deserialize, Serialize};

/// Resolved padding around a plot's drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Top padding.
    pub top: f64,
    /// Right padding.
    pub right: f64,
    /// Bottom padding.
    pub bottom: f64,
    /// Left padding.
    pub left: f64,
}

impl Padding {
    /// Same padding on every side.
    #[must_use]
    pub const fn uniform(p: f64) -> Self {
        Self { top: p, right: p, bottom: p, left: p }
    }

    /// Apply an override key by key.
    #[must_use]
    pub fn merge(self, o: &PaddingOverride) -> Self {
        Self {
            top: o.top.unwrap_or(self.top),
            right: o.right.unwrap_or(self.right),
            bottom: o.bottom.unwrap_or(self.bottom),
            left: o.left.unwrap_or(self.left),
        }
    }

    /// Horizontal padding total.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Vertical padding total.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(defaults::PLOT_PADDING)
    }
}

/// Partial padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingOverride {
    /// Top padding.
    pub top: Option<f64>,
    /// Right padding.
    pub right: Option<f64>,
    /// Bottom padding.
    pub bottom: Option<f64>,
    /// Left padding.
    pub left: Option<f64>,
}

/// Axis overrides by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesOverride {
    /// Horizontal axis.
    pub x: Option<AxisOverride>,
    /// Vertical axis.
    pub y: Option<AxisOverride>,
    /// Color axis.
    pub c: Option<ColorAxisOverride>,
}

/// Partial tooltip settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOverride {
    /// Whether hovering shows a tooltip.
    pub enabled: Option<bool>,
    /// Element id of the tooltip.
    pub id: Option<String>,
    /// Content formatter.
    pub formatter: Option<TooltipFormat>,
}

/// A named series of a stacked plot and its color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Series name, as found in point `series` fields.
    pub name: String,
    /// Segment color.
    pub color: Rgba,
}

impl SeriesSpec {
    /// Create a series.
    #[must_use]
    pub fn new(name: impl Into<String>, color: Rgba) -> Self {
        Self { name: name.into(), color }
    }
}

/// User configuration for one plot. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Outer width in pixels.
    pub width: Option<f64>,
    /// Outer height in pixels.
    pub height: Option<f64>,
    /// Plot orientation.
    pub orientation: Option<PlotOrientation>,
    /// Plot title.
    pub title: Option<String>,
    /// Padding override.
    pub padding: Option<PaddingOverride>,
    /// Axis overrides.
    pub axis: AxesOverride,
    /// Tooltip override.
    pub tooltip: Option<TooltipOverride>,
    /// Series declarations (stacked plots).
    pub series: Vec<SeriesSpec>,
}

impl PlotConfig {
    /// Set outer size.
    #[must_use]
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set orientation.
    #[must_use]
    pub fn orientation(mut self, orientation: PlotOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set padding override.
    #[must_use]
    pub fn padding(mut self, padding: PaddingOverride) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Set the x axis override.
    #[must_use]
    pub fn x_axis(mut self, axis: AxisOverride) -> Self {
        self.axis.x = Some(axis);
        self
    }

    /// Set the y axis override.
    #[must_use]
    pub fn y_axis(mut self, axis: AxisOverride) -> Self {
        self.axis.y = Some(axis);
        self
    }

    /// Set the color axis override.
    #[must_use]
    pub fn color_axis(mut self, axis: ColorAxisOverride) -> Self {
        self.axis.c = Some(axis);
        self
    }

    /// Set the tooltip override.
    #[must_use]
    pub fn tooltip(mut self, tooltip: TooltipOverride) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Set the series list.
    #[must_use]
    pub fn series(mut self, series: Vec<SeriesSpec>) -> Self {
        self.series = series;
        self
    }

    /// Resolved padding.
    #[must_use]
    pub fn resolved_padding(&self) -> Padding {
        self.padding.as_ref().map_or_else(Padding::default, |o| Padding::default().merge(o))
    }

    /// Resolved tooltip for a plot type rendered into `target`.
    #[must_use]
    pub fn resolved_tooltip(&self, plot_type: PlotType, target: &str) -> TooltipConfig {
        let base = TooltipConfig::for_plot(plot_type, target);
        match &self.tooltip {
            Some(o) => base.merge(o),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_merges_per_key() {
        let config = PlotConfig::default().padding(PaddingOverride { left: Some(80.0), ..PaddingOverride::default() });
        let p = config.resolved_padding();
        assert_eq!(p.left, 80.0);
        assert_eq!(p.top, 50.0);
        assert_eq!(p.right, 50.0);
        assert_eq!(p.horizontal(), 130.0);
    }

    #[test]
    fn test_default_padding() {
        assert_eq!(PlotConfig::default().resolved_padding(), Padding::uniform(50.0));
    }

    #[test]
    fn test_deserialize_plot_config() {
        let config: PlotConfig = serde_json::from_str(
            r##"{
                "width": 400,
                "orientation": -1,
                "padding": {"top": 10},
                "axis": {"x": {"title": "samples"}, "c": {"scaleType": "ordinal", "range": ["#000000"]}},
                "series": [{"name": "s1", "color": "#FF0000"}]
            }"##,
        )
        .unwrap();
        assert_eq!(config.width, Some(400.0));
        assert_eq!(config.orientation, Some(PlotOrientation::Negative));
        assert_eq!(config.resolved_padding().top, 10.0);
        assert_eq!(config.axis.x.unwrap().title.as_deref(), Some("samples"));
        assert_eq!(config.series[0].color, Rgba::RED);
    }

    #[test]
    fn test_tooltip_override() {
        let config = PlotConfig::default().tooltip(TooltipOverride { enabled: Some(false), ..TooltipOverride::default() });
        let t = config.resolved_tooltip(PlotType::Scatter, "chart");
        assert!(!t.enabled);
        assert_eq!(t.id, "chart-tooltip");
    }
}
