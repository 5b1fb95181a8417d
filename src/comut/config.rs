//! Co-occurrence view configuration.
//!
//! A view is a list of panels. Each panel owns one lattice row and finds
//! its data columns by substring search. The document is JSON, or YAML when
//! the file extension says so.

use crate::color::Rgba;
use crate::error::Result;
use crate::lattice::grid::BandSize;
use crate::plot::config::{PaddingOverride, PlotConfig};
use crate::plot::defaults;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plot kinds a panel may place in its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelPlotType {
    /// Categories per sample and row.
    #[serde(rename = "categoricalheatmap")]
    CategoricalHeatmap,
    /// Continuous values per row (q-values).
    #[serde(rename = "heatmap")]
    Heatmap,
    /// Category counts per row.
    #[serde(rename = "stackedbarplot")]
    StackedBar,
    /// Series values per sample.
    #[serde(rename = "stackedcolumnplot")]
    StackedColumn,
    /// One-row categorical heatmap.
    #[serde(rename = "stripplot")]
    Strip,
}

/// One plot of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelPlot {
    /// Lattice column.
    pub column: usize,
    /// Plot kind.
    pub plot_type: PanelPlotType,
    /// Plot configuration passed through to the lattice cell.
    #[serde(default)]
    pub plot_options: PlotConfig,
}

/// How a panel orders and limits its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSort {
    /// Most populated rows first.
    Count,
    /// Most significant rows first.
    Qval,
}

/// Panel options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Row ordering.
    pub sort: Option<RowSort>,
    /// Row count limit (`count`) or q-value threshold (`qval`).
    pub limit: Option<f64>,
}

/// One panel of the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    /// Panel id; also selects the value transform.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Column search discriminator.
    #[serde(alias = "searchKeyword")]
    pub search: String,
    /// Lattice row.
    pub row: usize,
    /// Plots by column.
    pub plots: Vec<PanelPlot>,
    /// Palette.
    #[serde(default)]
    pub colors: Vec<Rgba>,
    /// Row ordering options.
    #[serde(default)]
    pub panel_options: PanelOptions,
}

impl PanelConfig {
    /// Plot configured at `column`.
    #[must_use]
    pub fn plot(&self, column: usize) -> Option<&PanelPlot> {
        self.plots.iter().find(|p| p.column == column)
    }
}

/// Initial sort entry: sort by a panel's rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialSort {
    /// Panel id.
    pub panel: String,
    /// 0 ascending, 1 descending.
    pub order: u8,
}

/// Complete view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Outer width.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Outer height.
    #[serde(default = "default_height")]
    pub height: f64,
    /// Lattice padding.
    #[serde(default)]
    pub padding: Option<PaddingOverride>,
    /// Column holding the per-sample plots.
    #[serde(default = "default_sample_column")]
    pub sample_based_column: usize,
    /// Explicit row sizes.
    #[serde(default)]
    pub row_sizes: Option<Vec<BandSize>>,
    /// Explicit column sizes.
    #[serde(default)]
    pub column_sizes: Option<Vec<BandSize>>,
    /// Sort applied before the first render. Absent or empty means
    /// descending by `GeneMutation`.
    #[serde(default = "default_initial_sort", deserialize_with = "initial_sort_or_default")]
    pub initial_sort: Vec<InitialSort>,
    /// Panels.
    pub panels: Vec<PanelConfig>,
}

fn default_width() -> f64 {
    defaults::LATTICE_WIDTH
}
fn default_height() -> f64 {
    defaults::LATTICE_HEIGHT
}
fn default_sample_column() -> usize {
    1
}
fn default_initial_sort() -> Vec<InitialSort> {
    vec![InitialSort { panel: "GeneMutation".to_string(), order: 1 }]
}
fn initial_sort_or_default<'de, D>(deserializer: D) -> std::result::Result<Vec<InitialSort>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let sorts = Vec::<InitialSort>::deserialize(deserializer)?;
    Ok(if sorts.is_empty() { default_initial_sort() } else { sorts })
}

impl ViewConfig {
    /// Load from a file; `.yaml`/`.yml` files are YAML, anything else JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::parse_yaml(&content),
            _ => Self::parse_json(&content),
        }
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] on malformed input.
    pub fn parse_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Yaml`] on malformed input.
    pub fn parse_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Panel with `id`.
    #[must_use]
    pub fn panel(&self, id: &str) -> Option<&PanelConfig> {
        self.panels.iter().find(|p| p.id == id)
    }
}
