//! # Trueno-Lattice
//!
//! Declarative 2D chart composition: plots are described by data, a plot
//! type and a partial configuration, resolved against per-type defaults into
//! concrete scales and axes, and laid out on a shared canvas.
//!
//! ## Features
//!
//! - **Config resolution**: layered defaults and per-section overrides
//! - **Scales**: linear, sqrt, time, band, ordinal and sequential colors
//! - **Stacking**: cumulative series offsets for stacked bars and columns
//! - **Lattice layout**: weighted row and column bands on one canvas
//! - **Linked ordering**: one shared sample order across every panel of a
//!   co-occurrence view
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_lattice::prelude::*;
//!
//! let data = vec![
//!     Point::new("A", 10).series("s1"),
//!     Point::new("A", 5).series("s2"),
//! ];
//! let config = PlotConfig::default()
//!     .series(vec![SeriesSpec::new("s1", Rgba::BLACK), SeriesSpec::new("s2", Rgba::WHITE)]);
//! let plot = Plot::new(data, PlotType::StackedColumn, "chart").config(config).resolve()?;
//! assert_eq!(plot.stack.as_ref().map(|s| s.max_end()), Some(15.0));
//! # Ok::<(), trueno_lattice::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: the `trueno-lattice` command line renderer

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and sequential palettes.
pub mod color;

/// Axis values (numbers, text, timestamps).
pub mod value;

/// Data points and scale compatibility.
pub mod data;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Axis configuration and resolution.
pub mod axis;

// ============================================================================
// Composition Modules
// ============================================================================

/// Plot types, configuration and resolution.
pub mod plot;

/// Grid layout of many plots on one canvas.
pub mod lattice;

/// Co-occurrence view with a shared sample order.
pub mod comut;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Render tree and mark drawing.
pub mod render;

/// Output encoders (SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-lattice operations.
pub mod error;

pub use error::{Error, Result};
pub use value::Value;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use trueno_lattice::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axis::{AxisOverride, ColorAxisOverride, PlotOrientation};
    pub use crate::color::{Interpolator, Rgba};
    pub use crate::data::Point;
    pub use crate::error::{Error, Result};
    pub use crate::lattice::{CellSpec, Lattice, LatticeConfig};
    pub use crate::plot::config::{PlotConfig, SeriesSpec};
    pub use crate::plot::{Plot, PlotType, ResolvedPlot};
    pub use crate::scale::ScaleKind;
    pub use crate::value::Value;
}
