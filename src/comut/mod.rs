//! Co-occurrence view.
//!
//! A [`CoMutView`] joins a view configuration with a data document and
//! keeps a [`Lattice`] of panels in sync with one canonical sample order.
//! Sorting, clicking a label and excluding samples all recompute the order
//! and rebuild the whole lattice.
//!
//! # Example
//!
//! ```rust,no_run
//! use trueno_lattice::comut::{CoMutView, ViewResources};
//! use trueno_lattice::output::SvgEncoder;
//! use trueno_lattice::render::BasicMarks;
//!
//! let resources = ViewResources::load("view.json", "data.json")?;
//! let mut view = CoMutView::new(resources, "comut")?;
//! view.click("MutationRate", None, false)?;
//! let scene = view.render(&BasicMarks::default())?;
//! SvgEncoder::new(&scene).write_to_file("comut.svg")?;
//! # Ok::<(), trueno_lattice::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod ordering;
pub mod panel;

pub use config::{InitialSort, PanelConfig, PanelOptions, PanelPlot, PanelPlotType, RowSort, ViewConfig};
pub use data::{DataDocument, Transform, SUMMARY_SAMPLE};
pub use ordering::{sort_samples, Direction, OrderingState, SortKey};
pub use panel::{Panel, PanelKind, RowLabel};

use crate::error::{Error, Result};
use crate::lattice::{GridOverride, Lattice, LatticeConfig};
use crate::render::{MarkRenderer, Scene};
use crate::value::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Documents a view is built from.
#[derive(Debug, Clone)]
pub struct ViewResources {
    /// View configuration.
    pub config: ViewConfig,
    /// Data document.
    pub data: DataDocument,
}

impl ViewResources {
    /// Load both documents. Nothing is returned unless both load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceLoad`] naming the first document that
    /// failed.
    pub fn load(config_path: impl AsRef<Path>, data_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let data_path = data_path.as_ref();
        let config = ViewConfig::load(config_path).map_err(|e| Error::resource(config_path.display().to_string(), e))?;
        let data = DataDocument::load(data_path).map_err(|e| Error::resource(data_path.display().to_string(), e))?;
        info!(panels = config.panels.len(), samples = data.samples.len(), "view resources loaded");
        Ok(Self { config, data })
    }
}

/// Panels, shared ordering and the lattice built from them.
#[derive(Debug, Clone)]
pub struct CoMutView {
    target: String,
    config: ViewConfig,
    data: DataDocument,
    panels: Vec<Panel>,
    ordering: OrderingState,
    lattice: Lattice,
}

impl CoMutView {
    /// Parse every panel, apply the initial sort and build the lattice.
    ///
    /// # Errors
    ///
    /// Fails on an invalid panel, an empty target, or any lattice error.
    pub fn new(resources: ViewResources, target: impl Into<String>) -> Result<Self> {
        let ViewResources { config, data } = resources;
        let target = target.into();
        let panels = config
            .panels
            .iter()
            .map(|p| Panel::parse(p, &data, config.sample_based_column))
            .collect::<Result<Vec<_>>>()?;

        let mut ordering = OrderingState::new(data.samples().map(String::from).collect());
        let mut keys = Vec::new();
        for initial in &config.initial_sort {
            let Some(panel) = panels.iter().find(|p| p.id() == initial.panel) else {
                warn!(panel = %initial.panel, "initial sort names an unknown panel, skipped");
                continue;
            };
            let direction = Direction::try_from(initial.order).unwrap_or_else(|e| {
                warn!(panel = %initial.panel, error = %e, "invalid initial sort direction, using descending");
                Direction::Desc
            });
            keys.extend(panel.sort_keys(direction));
        }
        ordering.set_sort_keys(keys);
        ordering.recompute(&data);

        let lattice = build_lattice(&target, &config, &data, &panels, ordering.order())?;
        debug!(target = %target, panels = panels.len(), "view built");
        Ok(Self { target, config, data, panels, ordering, lattice })
    }

    /// Canonical sample order.
    #[must_use]
    pub fn order(&self) -> &Arc<[Value]> {
        self.ordering.order()
    }

    /// Ordering state.
    #[must_use]
    pub fn ordering(&self) -> &OrderingState {
        &self.ordering
    }

    /// Current lattice.
    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Data document.
    #[must_use]
    pub fn data(&self) -> &DataDocument {
        &self.data
    }

    /// Parsed panels in configuration order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPanel`].
    pub fn panel(&self, id: &str) -> Result<&Panel> {
        self.panels.iter().find(|p| p.id() == id).ok_or_else(|| Error::UnknownPanel(id.to_string()))
    }

    /// Replace the active sort keys and rebuild.
    ///
    /// # Errors
    ///
    /// Propagates lattice errors; the view is left unchanged on failure.
    pub fn sort_by(&mut self, keys: Vec<SortKey>) -> Result<()> {
        let mut next = self.ordering.clone();
        next.set_sort_keys(keys);
        self.commit(next)
    }

    /// Handle a click on a label of panel `panel_id`.
    ///
    /// `tick_label` is the clicked row label, `None` for the axis title.
    /// `modifier` appends to the active keys instead of replacing them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPanel`], or propagates lattice errors; the
    /// view is left unchanged on failure.
    pub fn click(&mut self, panel_id: &str, tick_label: Option<&str>, modifier: bool) -> Result<()> {
        let search = self.panel(panel_id)?.click_key(tick_label);
        let mut next = self.ordering.clone();
        next.click(&search, modifier);
        debug!(panel = panel_id, key = %search, modifier, "sort click");
        self.commit(next)
    }

    /// Hide a sample. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Propagates lattice errors; the view is left unchanged on failure.
    pub fn exclude(&mut self, sample: &str) -> Result<bool> {
        let mut next = self.ordering.clone();
        if !next.exclude(sample) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Show an excluded sample again. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Propagates lattice errors; the view is left unchanged on failure.
    pub fn include(&mut self, sample: &str) -> Result<bool> {
        let mut next = self.ordering.clone();
        if !next.include(sample) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Render the current lattice into a fresh scene.
    ///
    /// # Errors
    ///
    /// Propagates mark drawing errors.
    pub fn render(&self, marks: &dyn MarkRenderer) -> Result<Scene> {
        self.lattice.render(marks)
    }

    /// Recompute `next`, rebuild the lattice from it, and only then swap
    /// both in.
    fn commit(&mut self, mut next: OrderingState) -> Result<()> {
        next.recompute(&self.data);
        let lattice = build_lattice(&self.target, &self.config, &self.data, &self.panels, next.order())?;
        self.ordering = next;
        self.lattice = lattice;
        Ok(())
    }
}

fn build_lattice(
    target: &str,
    config: &ViewConfig,
    data: &DataDocument,
    panels: &[Panel],
    order: &Arc<[Value]>,
) -> Result<Lattice> {
    let mut cells = Vec::new();
    for panel in panels {
        cells.extend(panel.cells(data, order)?);
    }
    let lattice_config = LatticeConfig {
        width: Some(config.width),
        height: Some(config.height),
        padding: config.padding,
        grid: GridOverride {
            rows: None,
            columns: None,
            row_sizes: config.row_sizes.clone(),
            column_sizes: config.column_sizes.clone(),
        },
        title: None,
    };
    Lattice::new(cells, target, lattice_config)
}
