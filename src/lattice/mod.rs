//! Lattice layout.
//!
//! A [`Lattice`] places independently configured plots on one canvas. The
//! canvas is split into row and column bands (see [`grid`]); each cell's
//! plot is resolved with its band's pixel size as its outer size, and the
//! rendered cell is translated to its band's offset.
//!
//! # Example
//!
//! ```rust
//! use trueno_lattice::lattice::{CellSpec, Lattice, LatticeConfig};
//! use trueno_lattice::prelude::*;
//!
//! let cells = vec![
//!     CellSpec::new(0, 0, vec![Point::new(1, 2)], PlotType::Scatter),
//!     CellSpec::new(1, 1, vec![Point::new(1, 2)], PlotType::Scatter),
//! ];
//! let lattice = Lattice::new(cells, "chart", LatticeConfig::default()).unwrap();
//! let cell = lattice.cell(1, 1).unwrap();
//! assert_eq!(cell.geometry.x, 480.0);
//! ```

pub mod grid;

use crate::axis::TextAnchor;
use crate::data::Point;
use crate::error::{Error, Result};
use crate::plot::config::{Padding, PaddingOverride, PlotConfig};
use crate::plot::{defaults, Plot, PlotType, ResolvedPlot};
use crate::render::{Group, MarkRenderer, PlotView, Scene, Shape, Transition};
use grid::{resolve_bands, Band, BandSize};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Entry fade duration of a rendered cell.
pub const CELL_FADE_MS: u32 = 500;

/// Partial grid settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOverride {
    /// Row count; defaults to one past the highest cell row.
    pub rows: Option<usize>,
    /// Column count; defaults to one past the highest cell column.
    pub columns: Option<usize>,
    /// Explicit row sizes; all rows must be listed.
    pub row_sizes: Option<Vec<BandSize>>,
    /// Explicit column sizes; all columns must be listed.
    pub column_sizes: Option<Vec<BandSize>>,
}

/// User configuration for a lattice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Outer width in pixels.
    pub width: Option<f64>,
    /// Outer height in pixels.
    pub height: Option<f64>,
    /// Padding around the grid.
    pub padding: Option<PaddingOverride>,
    /// Grid settings.
    pub grid: GridOverride,
    /// Title drawn above the grid.
    pub title: Option<String>,
}

impl LatticeConfig {
    /// Set outer size.
    #[must_use]
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set padding override.
    #[must_use]
    pub fn padding(mut self, padding: PaddingOverride) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Set grid override.
    #[must_use]
    pub fn grid(mut self, grid: GridOverride) -> Self {
        self.grid = grid;
        self
    }

    fn resolved_padding(&self) -> Padding {
        let base = Padding::uniform(defaults::LATTICE_PADDING);
        self.padding.as_ref().map_or(base, |o| base.merge(o))
    }
}

/// One plot to place in the lattice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CellSpec {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
    /// Plot data.
    #[serde(default)]
    pub data: Vec<Point>,
    /// Plot type.
    #[serde(rename = "type")]
    pub plot_type: PlotType,
    /// Plot configuration; width and height are replaced by the cell size.
    #[serde(default)]
    pub config: PlotConfig,
}

impl CellSpec {
    /// Create a cell with the default plot configuration.
    #[must_use]
    pub fn new(row: usize, column: usize, data: Vec<Point>, plot_type: PlotType) -> Self {
        Self { row, column, data, plot_type, config: PlotConfig::default() }
    }

    /// Set the plot configuration.
    #[must_use]
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }
}

/// Pixel rectangle of a cell, relative to the padded canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellGeometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Resolved row and column bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Row bands, by index.
    pub rows: Vec<Band>,
    /// Column bands, by index.
    pub columns: Vec<Band>,
}

impl Grid {
    /// Resolve the grid for cells at `positions`.
    ///
    /// # Errors
    ///
    /// Fails when explicit band sizes are incomplete or do not sum to 1, and
    /// when a cell lies outside the grid.
    pub fn resolve(grid: &GridOverride, positions: &[(usize, usize)]) -> Result<Self> {
        let derived_rows = positions.iter().map(|p| p.0 + 1).max().unwrap_or(1);
        let derived_columns = positions.iter().map(|p| p.1 + 1).max().unwrap_or(1);
        let rows = resolve_bands("rowSizes", grid.rows.unwrap_or(derived_rows), grid.row_sizes.as_deref())?;
        let columns =
            resolve_bands("columnSizes", grid.columns.unwrap_or(derived_columns), grid.column_sizes.as_deref())?;

        let resolved = Self { rows, columns };
        for &(row, column) in positions {
            resolved.bands(row, column)?;
        }
        Ok(resolved)
    }

    /// Row and column band of a cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfGrid`] for positions outside the grid.
    pub fn bands(&self, row: usize, column: usize) -> Result<(&Band, &Band)> {
        match (self.rows.get(row), self.columns.get(column)) {
            (Some(r), Some(c)) => Ok((r, c)),
            _ => Err(Error::CellOutOfGrid { row, column, rows: self.rows.len(), columns: self.columns.len() }),
        }
    }

    /// Pixel rectangle of a cell on a canvas of the given inner size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfGrid`] for positions outside the grid.
    pub fn geometry(&self, row: usize, column: usize, inner_width: f64, inner_height: f64) -> Result<CellGeometry> {
        let (r, c) = self.bands(row, column)?;
        Ok(CellGeometry {
            x: inner_width * c.start,
            y: inner_height * r.start,
            width: inner_width * c.size,
            height: inner_height * r.size,
        })
    }
}

/// Geometry of a set of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Resolved bands.
    pub grid: Grid,
    /// Cell rectangles, in input order.
    pub cells: Vec<CellGeometry>,
}

/// Compute the grid and every cell's rectangle.
///
/// # Errors
///
/// Fails before producing any geometry when the grid is invalid or a cell
/// lies outside it.
pub fn layout(positions: &[(usize, usize)], grid: &GridOverride, inner_width: f64, inner_height: f64) -> Result<Layout> {
    let grid = Grid::resolve(grid, positions)?;
    let cells = positions
        .iter()
        .map(|&(row, column)| grid.geometry(row, column, inner_width, inner_height))
        .collect::<Result<Vec<_>>>()?;
    Ok(Layout { grid, cells })
}

/// A resolved plot at its place in the grid.
#[derive(Debug, Clone)]
pub struct LatticeCell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
    /// Pixel rectangle.
    pub geometry: CellGeometry,
    /// Resolved plot.
    pub plot: ResolvedPlot,
}

impl LatticeCell {
    /// Element id of the cell group.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.plot.target
    }
}

/// Snapshot of a lattice's customizable properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatticeCustomizable {
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Padding.
    pub padding: Padding,
    /// Resolved grid.
    pub grid: Grid,
    /// Title.
    pub title: Option<String>,
}

/// Grid of plots sharing one canvas.
#[derive(Debug, Clone)]
pub struct Lattice {
    target: String,
    width: f64,
    height: f64,
    padding: Padding,
    title: Option<String>,
    grid: Grid,
    cells: Vec<LatticeCell>,
}

impl Lattice {
    /// Lay out and resolve every cell.
    ///
    /// # Errors
    ///
    /// Fails on an empty target, an invalid grid, a cell outside the grid,
    /// or any cell plot that fails to resolve. Nothing is partially built.
    pub fn new(cells: Vec<CellSpec>, target: impl Into<String>, config: LatticeConfig) -> Result<Self> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(Error::MissingRenderTarget);
        }
        let width = config.width.unwrap_or(defaults::LATTICE_WIDTH);
        let height = config.height.unwrap_or(defaults::LATTICE_HEIGHT);
        let padding = config.resolved_padding();
        let inner_width = width - padding.horizontal();
        let inner_height = height - padding.vertical();

        let positions: Vec<_> = cells.iter().map(|c| (c.row, c.column)).collect();
        let Layout { grid, cells: geometry } = layout(&positions, &config.grid, inner_width, inner_height)?;

        let cells = cells
            .into_iter()
            .zip(geometry)
            .map(|(spec, geometry)| {
                let id = format!("{target}-{}-{}", spec.row, spec.column);
                let plot = Plot::new(spec.data, spec.plot_type, id)
                    .config(spec.config.size(geometry.width, geometry.height))
                    .resolve()?;
                Ok(LatticeCell { row: spec.row, column: spec.column, geometry, plot })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            target = %target,
            rows = grid.rows.len(),
            columns = grid.columns.len(),
            cells = cells.len(),
            "lattice resolved"
        );
        Ok(Self { target, width, height, padding, title: config.title, grid, cells })
    }

    /// Render target id.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Resolved grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cells in input order.
    #[must_use]
    pub fn cells(&self) -> &[LatticeCell] {
        &self.cells
    }

    /// First cell at (`row`, `column`).
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&LatticeCell> {
        self.cells.iter().find(|c| c.row == row && c.column == column)
    }

    /// Drawable width.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.width - self.padding.horizontal()
    }

    /// Drawable height.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.height - self.padding.vertical()
    }

    /// Customizable properties with their resolved values.
    #[must_use]
    pub fn customizable(&self) -> LatticeCustomizable {
        LatticeCustomizable {
            width: self.width,
            height: self.height,
            padding: self.padding,
            grid: self.grid.clone(),
            title: self.title.clone(),
        }
    }

    /// Build a fresh scene holding every cell.
    ///
    /// # Errors
    ///
    /// Propagates mark drawing errors.
    pub fn render(&self, marks: &dyn MarkRenderer) -> Result<Scene> {
        let mut scene = Scene::new(self.target.clone(), self.width, self.height);
        let root = scene
            .root
            .push_group(Group::new().id(format!("{}-lattice", self.target)).translate(self.padding.left, self.padding.top));
        if let Some(title) = &self.title {
            root.push(Shape::text(self.inner_width() / 2.0, -self.padding.top / 2.0, title.clone(), TextAnchor::Middle));
        }

        for cell in &self.cells {
            let group = root.push_group(
                Group::new()
                    .id(cell.id())
                    .class("ljs--lattice-plot")
                    .translate(cell.geometry.x, cell.geometry.y)
                    .transition(Transition::fade_in(CELL_FADE_MS)),
            );
            PlotView::new(cell.plot.clone()).render(group, marks, false)?;
        }
        debug!(target = %self.target, cells = self.cells.len(), "lattice rendered");
        Ok(scene)
    }
}
