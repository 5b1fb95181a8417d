//! Tooltip settings and content formatting.

use crate::data::{Attr, Point};
use crate::plot::config::TooltipOverride;
use crate::plot::PlotType;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// How tooltip content is built from a datum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipFormat {
    /// `x` only.
    X,
    /// `x` and `y`.
    Xy,
    /// `x`, `y` and color value.
    Xyc,
    /// Stack category, series and value.
    Stack,
    /// Custom text with `{x}`, `{y}`, `{c}`, `{series}` and `{value}` placeholders.
    Template(String),
}

impl TooltipFormat {
    /// Default format for a plot type.
    #[must_use]
    pub fn for_plot(plot_type: PlotType) -> Self {
        match plot_type {
            PlotType::Barcode => TooltipFormat::X,
            PlotType::Heatmap | PlotType::CategoricalHeatmap => TooltipFormat::Xyc,
            PlotType::StackedBar | PlotType::StackedColumn => TooltipFormat::Stack,
            _ => TooltipFormat::Xy,
        }
    }

    /// Content for a plain point.
    #[must_use]
    pub fn point(&self, p: &Point) -> String {
        let c = p.color.as_ref().map(Value::to_string).unwrap_or_default();
        match self {
            TooltipFormat::X => p.x.to_string(),
            TooltipFormat::Xy | TooltipFormat::Stack => format!("x: {}<br/>y: {}", p.x, p.y),
            TooltipFormat::Xyc => format!("x: {}<br/>y: {}<br/>c: {c}", p.x, p.y),
            TooltipFormat::Template(t) => fill(
                t,
                &[
                    ("x", p.x.to_string()),
                    ("y", p.y.to_string()),
                    ("c", c),
                    ("series", p.series.clone().unwrap_or_default()),
                    ("value", p.y.to_string()),
                ],
            ),
        }
    }

    /// Content for one segment of a stack; `attr` is the stack key attribute.
    #[must_use]
    pub fn segment(&self, attr: Attr, category: &Value, series: &str, value: f64) -> String {
        let value = Value::Number(value);
        match self {
            TooltipFormat::Template(t) => {
                let (x, y) = match attr {
                    Attr::X => (category.to_string(), value.to_string()),
                    Attr::Y => (value.to_string(), category.to_string()),
                };
                fill(
                    t,
                    &[("x", x), ("y", y), ("c", String::new()), ("series", series.to_string()), ("value", value.to_string())],
                )
            }
            _ => format!("{}: {category}<br/>series: {series}<br/>val: {value}", attr.name()),
        }
    }
}

fn fill(template: &str, fields: &[(&str, String)]) -> String {
    fields.iter().fold(template.to_string(), |acc, (key, v)| acc.replace(&format!("{{{key}}}"), v))
}

/// Resolved tooltip settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Whether hovering shows a tooltip.
    pub enabled: bool,
    /// Element id of the tooltip.
    pub id: String,
    /// Content formatter.
    pub formatter: TooltipFormat,
}

impl TooltipConfig {
    /// Defaults for a plot type rendered into `target`.
    #[must_use]
    pub fn for_plot(plot_type: PlotType, target: &str) -> Self {
        Self { enabled: true, id: format!("{target}-tooltip"), formatter: TooltipFormat::for_plot(plot_type) }
    }

    /// Apply an override key by key.
    #[must_use]
    pub fn merge(self, o: &TooltipOverride) -> Self {
        Self {
            enabled: o.enabled.unwrap_or(self.enabled),
            id: o.id.clone().unwrap_or(self.id),
            formatter: o.formatter.clone().unwrap_or(self.formatter),
        }
    }
}
