//! Panels of a co-occurrence view.
//!
//! A panel turns the data columns matching its search discriminator into
//! one lattice row of plots. The plot in the sample column is the panel's
//! main plot and shares the canonical sample order on its x axis.
//! Categorical heatmap panels add a per-row count chart in the column to
//! the left and a q-value heatmap in the column to the right; all three
//! share the panel's own row order on their y axes.

use crate::axis::{AxisOverride, ColorAxisOverride};
use crate::color::{Interpolator, Rgba};
use crate::comut::config::{PanelConfig, PanelPlotType, RowSort};
use crate::comut::data::{DataDocument, Transform};
use crate::comut::ordering::{Direction, SortKey};
use crate::data::Point;
use crate::error::{Error, Result};
use crate::lattice::CellSpec;
use crate::plot::config::{PlotConfig, SeriesSpec};
use crate::plot::PlotType;
use crate::scale::ScaleKind;
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Layout family of a panel, chosen by its main plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Category per sample and row, with count and q-value companions.
    CategoricalHeatmap,
    /// Stacked series values per sample.
    StackedColumn,
    /// One categorical row per column, colored by distinct value.
    Strip,
}

/// A data column shown as a panel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabel {
    /// Axis label.
    pub label: String,
    /// Source column.
    pub column: String,
}

/// Parsed panel.
#[derive(Debug, Clone)]
pub struct Panel {
    config: PanelConfig,
    kind: PanelKind,
    sample_column: usize,
    transform: Transform,
    rows: Vec<RowLabel>,
    displayed: Vec<RowLabel>,
    row_order: Arc<[Value]>,
}

impl Panel {
    /// Parse a panel against the data document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPanel`] when the panel has no plot in the
    /// sample column, or its main plot cannot hold per-sample data.
    pub fn parse(config: &PanelConfig, data: &DataDocument, sample_column: usize) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidPanel { panel: config.id.clone(), reason };
        let main = config
            .plot(sample_column)
            .ok_or_else(|| invalid(format!("no plot in sample column {sample_column}")))?;
        let kind = match main.plot_type {
            PanelPlotType::CategoricalHeatmap => PanelKind::CategoricalHeatmap,
            PanelPlotType::StackedColumn => PanelKind::StackedColumn,
            PanelPlotType::Strip => PanelKind::Strip,
            other => return Err(invalid(format!("{other:?} cannot be the per-sample plot"))),
        };

        let columns = data.columns(&config.search);
        let strip_label = columns.len() > 1 || kind == PanelKind::StackedColumn;
        let rows: Vec<RowLabel> = columns
            .iter()
            .map(|c| RowLabel {
                label: if strip_label { c.replace(&config.search, "") } else { (*c).to_string() },
                column: (*c).to_string(),
            })
            .collect();

        let transform = Transform::for_panel(&config.id);
        let displayed = match kind {
            PanelKind::CategoricalHeatmap => sorted_rows(config, &rows, data, transform),
            PanelKind::StackedColumn | PanelKind::Strip => rows.clone(),
        };
        let row_order = displayed.iter().map(|r| Value::from(&r.label)).collect();

        debug!(panel = %config.id, ?kind, rows = rows.len(), displayed = displayed.len(), "panel parsed");
        Ok(Self { config: config.clone(), kind, sample_column, transform, rows, displayed, row_order })
    }

    /// Panel id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Search discriminator.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.config.search
    }

    /// Lattice row.
    #[must_use]
    pub fn row(&self) -> usize {
        self.config.row
    }

    /// Layout family.
    #[must_use]
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// Every matching column.
    #[must_use]
    pub fn rows(&self) -> &[RowLabel] {
        &self.rows
    }

    /// Rows shown, in display order.
    #[must_use]
    pub fn displayed_rows(&self) -> &[RowLabel] {
        &self.displayed
    }

    /// Shared y order of the panel's plots.
    #[must_use]
    pub fn row_order(&self) -> &Arc<[Value]> {
        &self.row_order
    }

    /// Sort keys that order samples by this panel: one per displayed row
    /// for a multi-row panel, else the discriminator itself.
    #[must_use]
    pub fn sort_keys(&self, direction: Direction) -> Vec<SortKey> {
        if self.rows.len() > 1 && self.kind != PanelKind::StackedColumn {
            self.displayed
                .iter()
                .map(|r| SortKey::new(r.column.clone(), direction))
                .collect()
        } else {
            vec![SortKey::new(self.config.search.clone(), direction)]
        }
    }

    /// Sort criterion for a click on one of the panel's labels.
    ///
    /// A main plot with a y-axis title sorts by the whole panel; otherwise
    /// the clicked tick label selects the row's source column. Labels that
    /// name no row fall back to the whole panel.
    #[must_use]
    pub fn click_key(&self, tick_label: Option<&str>) -> String {
        let titled = self
            .config
            .plot(self.sample_column)
            .and_then(|p| p.plot_options.axis.y.as_ref())
            .is_some_and(|y| y.title.is_some());
        tick_label
            .filter(|_| !titled)
            .and_then(|label| self.rows.iter().find(|r| r.label == label))
            .map_or_else(|| self.config.search.clone(), |r| r.column.clone())
    }

    /// Lattice cells of this panel for the samples in `order`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSeries`] when a category has no palette slot
    /// in the count chart.
    pub fn cells(&self, data: &DataDocument, order: &Arc<[Value]>) -> Result<Vec<CellSpec>> {
        let samples: Vec<String> = order.iter().map(ToString::to_string).collect();
        let main = self.main_config(order);
        match self.kind {
            PanelKind::CategoricalHeatmap => self.heatmap_cells(data, &samples, main),
            PanelKind::StackedColumn => Ok(vec![self.stacked_column_cell(data, &samples, main)]),
            PanelKind::Strip => Ok(vec![self.strip_cell(data, &samples, main)]),
        }
    }

    fn options(&self, column: usize) -> PlotConfig {
        self.config.plot(column).map(|p| p.plot_options.clone()).unwrap_or_default()
    }

    fn main_config(&self, order: &Arc<[Value]>) -> PlotConfig {
        let mut config = self.options(self.sample_column);
        let x = config.axis.x.take().unwrap_or_default();
        config.axis.x = Some(x.merge(&AxisOverride::with_order(Arc::clone(order))));
        config
    }

    fn with_row_order(&self, mut config: PlotConfig) -> PlotConfig {
        let y = config.axis.y.take().unwrap_or_default();
        config.axis.y = Some(y.merge(&AxisOverride::with_order(Arc::clone(&self.row_order))));
        config
    }

    fn cell(&self, column: usize, data: Vec<Point>, plot_type: PlotType, config: PlotConfig) -> CellSpec {
        CellSpec::new(self.config.row, column, data, plot_type).config(config)
    }

    fn heatmap_cells(&self, data: &DataDocument, samples: &[String], main: PlotConfig) -> Result<Vec<CellSpec>> {
        let colors = &self.config.colors;
        let mut points = Vec::new();
        let mut counts: Vec<BTreeMap<Value, usize>> = vec![BTreeMap::new(); self.displayed.len()];
        for sample in samples {
            for (row, count) in self.displayed.iter().zip(&mut counts) {
                if let Some(v) = self.transform.apply(data.get(sample, &row.column)) {
                    *count.entry(v.clone()).or_default() += 1;
                    points.push(Point::new(sample.as_str(), row.label.as_str()).color(v));
                }
            }
        }

        let palette = ColorAxisOverride {
            scale_type: Some(ScaleKind::Ordinal),
            domain: Some((0..colors.len()).map(Value::from).collect()),
            range: Some(colors.clone()),
            interpolator: None,
        };
        let main = self.with_row_order(main.color_axis(palette));
        let mut cells = vec![self.cell(self.sample_column, points, PlotType::CategoricalHeatmap, main)];

        if let Some(column) = self.sample_column.checked_sub(1).filter(|c| self.config.plot(*c).is_some()) {
            cells.push(self.count_cell(column, &counts)?);
        }
        let q_column = self.sample_column + 1;
        if self.config.plot(q_column).is_some() {
            cells.push(self.q_cell(q_column, data));
        }
        Ok(cells)
    }

    fn count_cell(&self, column: usize, counts: &[BTreeMap<Value, usize>]) -> Result<CellSpec> {
        let series: Vec<SeriesSpec> =
            self.config.colors.iter().enumerate().map(|(i, c)| SeriesSpec::new(i.to_string(), *c)).collect();
        let mut unknown = Vec::new();
        let mut points = Vec::new();
        for (row, count) in self.displayed.iter().zip(counts) {
            for (category, n) in count {
                let name = category.to_string();
                if !series.iter().any(|s| s.name == name) && !unknown.contains(&name) {
                    unknown.push(name.clone());
                }
                points.push(Point::new(*n, row.label.as_str()).series(name));
            }
        }
        if !unknown.is_empty() {
            return Err(Error::UnknownSeries(unknown));
        }

        let mut config = self.with_row_order(self.options(column)).series(series);
        if config.orientation.is_none() {
            config = config.orientation(crate::axis::PlotOrientation::Negative);
        }
        Ok(self.cell(column, points, PlotType::StackedBar, config))
    }

    fn q_cell(&self, column: usize, data: &DataDocument) -> CellSpec {
        let q = Transform::NegLog10;
        let points: Vec<Point> = self
            .displayed
            .iter()
            .filter_map(|r| {
                let v = q.number(data.summary(&r.column)?)?;
                Some(Point::new(0, r.label.as_str()).color(v))
            })
            .collect();
        let max = points.iter().filter_map(|p| p.color.as_ref().and_then(Value::as_f64)).reduce(f64::max);
        let greys = ColorAxisOverride {
            scale_type: Some(ScaleKind::Sequential),
            domain: Some(vec![Value::from(0), Value::from(max.unwrap_or(1.0))]),
            range: None,
            interpolator: Some(Interpolator::Greys),
        };
        let config = self.with_row_order(self.options(column)).color_axis(greys);
        self.cell(column, points, PlotType::Heatmap, config)
    }

    fn stacked_column_cell(&self, data: &DataDocument, samples: &[String], main: PlotConfig) -> CellSpec {
        let colors = &self.config.colors;
        if self.rows.len() > colors.len() {
            warn!(panel = %self.config.id, columns = self.rows.len(), colors = colors.len(), "palette shorter than series list");
        }
        let series = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| SeriesSpec::new(r.label.clone(), colors.get(i).copied().unwrap_or(Rgba::UNKNOWN)))
            .collect();

        let mut points = Vec::new();
        for sample in samples {
            for row in &self.rows {
                if let Some(v) = self.transform.apply(data.get(sample, &row.column)).and_then(|v| v.as_f64()) {
                    points.push(Point::new(sample.as_str(), v).series(row.label.as_str()));
                }
            }
        }
        self.cell(self.sample_column, points, PlotType::StackedColumn, main.series(series))
    }

    fn strip_cell(&self, data: &DataDocument, samples: &[String], main: PlotConfig) -> CellSpec {
        let mut points = Vec::new();
        let mut categories: Vec<Value> = Vec::new();
        for sample in samples {
            for row in &self.displayed {
                if let Some(v) = self.transform.apply(data.get(sample, &row.column)) {
                    if !categories.contains(&v) {
                        categories.push(v.clone());
                    }
                    points.push(Point::new(sample.as_str(), row.label.as_str()).color(v));
                }
            }
        }
        if categories.len() > self.config.colors.len() {
            warn!(panel = %self.config.id, categories = categories.len(), colors = self.config.colors.len(), "palette shorter than category list");
        }
        let range = self.config.colors.iter().take(categories.len()).copied().collect();
        let palette = ColorAxisOverride {
            scale_type: Some(ScaleKind::Ordinal),
            domain: Some(categories),
            range: Some(range),
            interpolator: None,
        };
        let config = self.with_row_order(main.color_axis(palette));
        self.cell(self.sample_column, points, PlotType::CategoricalHeatmap, config)
    }
}

/// Rows of a categorical heatmap panel after its sort and limit.
fn sorted_rows(config: &PanelConfig, rows: &[RowLabel], data: &DataDocument, transform: Transform) -> Vec<RowLabel> {
    let limit = config.panel_options.limit;
    match config.panel_options.sort {
        Some(RowSort::Count) => {
            let mut counted: Vec<(usize, &RowLabel)> = rows
                .iter()
                .map(|r| (data.samples().filter(|s| transform.apply(data.get(s, &r.column)).is_some()).count(), r))
                .collect();
            counted.sort_by(|a, b| b.0.cmp(&a.0));
            let take = limit.map_or(counted.len(), |l| l.max(0.0) as usize);
            counted.into_iter().take(take).map(|(_, r)| r.clone()).collect()
        }
        Some(RowSort::Qval) => {
            let q = Transform::NegLog10;
            let threshold = limit.and_then(|l| q.number(l));
            let mut scored: Vec<(f64, &RowLabel)> = rows
                .iter()
                .filter_map(|r| Some((q.number(data.summary(&r.column)?)?, r)))
                .filter(|(v, _)| threshold.map_or(true, |t| *v >= t))
                .collect();
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
            scored.into_iter().map(|(_, r)| r.clone()).collect()
        }
        None => rows.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comut::config::ViewConfig;
    use crate::comut::fixtures::{document, CONFIG_JSON};

    fn panel(id: &str) -> Panel {
        let config = ViewConfig::parse_json(CONFIG_JSON).unwrap();
        Panel::parse(config.panel(id).unwrap(), &document(), 1).unwrap()
    }

    fn order(samples: &[&str]) -> Arc<[Value]> {
        samples.iter().map(|s| Value::from(*s)).collect()
    }

    fn labels(p: &Panel) -> Vec<&str> {
        p.displayed_rows().iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_rows_strip_discriminator() {
        let p = panel("GeneMutation");
        assert_eq!(p.kind(), PanelKind::CategoricalHeatmap);
        assert_eq!(p.rows().iter().map(|r| r.column.as_str()).collect::<Vec<_>>(), vec!["geneA", "geneB"]);
        assert_eq!(labels(&p), vec!["A", "B"]);
    }

    #[test]
    fn test_count_sort_with_limit() {
        let mut config = ViewConfig::parse_json(CONFIG_JSON).unwrap().panel("GeneMutation").unwrap().clone();
        config.panel_options.limit = Some(1.0);
        let p = Panel::parse(&config, &document(), 1).unwrap();
        // geneA present in 3 samples, geneB (0 and null dropped) in 1
        assert_eq!(labels(&p), vec!["A"]);
    }

    #[test]
    fn test_qval_sort_with_threshold() {
        let mut config = ViewConfig::parse_json(CONFIG_JSON).unwrap().panel("GeneMutation").unwrap().clone();
        config.panel_options.sort = Some(RowSort::Qval);
        config.panel_options.limit = None;
        let p = Panel::parse(&config, &document(), 1).unwrap();
        assert_eq!(labels(&p), vec!["A", "B"]);

        config.panel_options.limit = Some(0.01);
        let p = Panel::parse(&config, &document(), 1).unwrap();
        assert_eq!(labels(&p), vec!["A"]);
    }

    #[test]
    fn test_single_column_keeps_name() {
        let p = panel("Histology");
        assert_eq!(p.kind(), PanelKind::Strip);
        assert_eq!(labels(&p), vec!["CLI_histology"]);
        assert_eq!(p.sort_keys(Direction::Asc), vec![SortKey::new("CLI_histology", Direction::Asc)]);
    }

    #[test]
    fn test_multi_row_sort_keys() {
        let keys = panel("GeneMutation").sort_keys(Direction::Desc);
        assert_eq!(keys, vec![SortKey::new("geneA", Direction::Desc), SortKey::new("geneB", Direction::Desc)]);
    }

    #[test]
    fn test_click_key() {
        let p = panel("GeneMutation");
        assert_eq!(p.click_key(Some("B")), "geneB");
        assert_eq!(p.click_key(None), "gene");
        assert_eq!(p.click_key(Some("Z")), "gene");
        let rate = panel("MutationRate");
        assert_eq!(rate.click_key(Some("anything")), "rate_");
    }

    #[test]
    fn test_click_key_single_column_label() {
        let p = panel("Histology");
        assert_eq!(p.click_key(Some("CLI_histology")), "CLI_histology");
    }

    #[test]
    fn test_heatmap_cells_share_orders() {
        let p = panel("GeneMutation");
        let o = order(&["S2", "S1", "S3"]);
        let cells = p.cells(&document(), &o).unwrap();
        assert_eq!(cells.iter().map(|c| c.column).collect::<Vec<_>>(), vec![1, 0, 2]);

        let main = &cells[0];
        assert_eq!(main.plot_type, PlotType::CategoricalHeatmap);
        assert!(Arc::ptr_eq(main.config.axis.x.as_ref().unwrap().order.as_ref().unwrap(), &o));
        for c in &cells {
            assert!(Arc::ptr_eq(c.config.axis.y.as_ref().unwrap().order.as_ref().unwrap(), p.row_order()));
        }
        // geneA in S1, S2, S3; geneB only S1 (=1)
        assert_eq!(main.data.len(), 4);
        assert_eq!(main.data[0], Point::new("S2", "A").color(5));
    }

    #[test]
    fn test_count_cell_counts_categories() {
        let p = panel("GeneMutation");
        let cells = p.cells(&document(), &order(&["S1", "S2", "S3"])).unwrap();
        let count = &cells[1];
        assert_eq!(count.plot_type, PlotType::StackedBar);
        assert_eq!(count.config.orientation, Some(crate::axis::PlotOrientation::Negative));
        assert!(count.data.contains(&Point::new(2, "A").series("2")));
        assert!(count.data.contains(&Point::new(1, "A").series("5")));
        assert!(count.data.contains(&Point::new(1, "B").series("1")));
    }

    #[test]
    fn test_count_cell_respects_order_samples() {
        let p = panel("GeneMutation");
        let cells = p.cells(&document(), &order(&["S1", "S3"])).unwrap();
        assert!(cells[1].data.contains(&Point::new(2, "A").series("2")));
        assert!(!cells[1].data.iter().any(|pt| pt.series.as_deref() == Some("5")));
    }

    #[test]
    fn test_q_cell() {
        let p = panel("GeneMutation");
        let cells = p.cells(&document(), &order(&["S1"])).unwrap();
        let q = &cells[2];
        assert_eq!(q.plot_type, PlotType::Heatmap);
        assert_eq!(q.data.len(), 2);
        let c = q.config.axis.c.as_ref().unwrap();
        assert_eq!(c.interpolator, Some(Interpolator::Greys));
        assert_eq!(c.domain.as_ref().unwrap()[0], Value::from(0));
    }

    #[test]
    fn test_stacked_column_cell() {
        let p = panel("MutationRate");
        let cells = p.cells(&document(), &order(&["S1", "S2", "S3"])).unwrap();
        assert_eq!(cells.len(), 1);
        let c = &cells[0];
        assert_eq!(c.plot_type, PlotType::StackedColumn);
        assert_eq!(c.config.series.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["non", "sil"]);
        // absent rates are zero-filled
        assert_eq!(c.data.len(), 6);
        assert!(c.data.contains(&Point::new("S1", 0).series("sil")));
    }

    #[test]
    fn test_strip_cell_palette() {
        let p = panel("Histology");
        let cells = p.cells(&document(), &order(&["S2", "S1", "S3"])).unwrap();
        let c = &cells[0];
        assert_eq!(c.plot_type, PlotType::CategoricalHeatmap);
        assert_eq!(c.data.len(), 2);
        let palette = c.config.axis.c.as_ref().unwrap();
        assert_eq!(palette.domain.as_ref().unwrap(), &vec![Value::from("myxoid"), Value::from("usual")]);
        assert_eq!(palette.range.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_sample_column_plot() {
        let config = ViewConfig::parse_json(CONFIG_JSON).unwrap();
        let err = Panel::parse(config.panel("GeneMutation").unwrap(), &document(), 5).unwrap_err();
        assert!(matches!(err, Error::InvalidPanel { .. }));
    }
}
