//! Error types for trueno-lattice operations.
//!
//! Errors fall into three groups: configuration errors (bad plot type, grid,
//! series or axis setup), data validity errors (missing coordinates, values
//! incompatible with a scale kind) and resource loading errors. Non-fatal
//! degradations are never surfaced here; they are logged instead.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-lattice operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML document could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A required external resource failed to load.
    #[error("Failed to load {resource}: {source}")]
    ResourceLoad {
        /// Resource name or path.
        resource: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// Plot type name is not part of the supported vocabulary.
    #[error("Unrecognized plot type {0}")]
    UnknownPlotType(String),

    /// No render target identifier was supplied.
    #[error("Render target id cannot be empty")]
    MissingRenderTarget,

    /// Axis orientation does not fit the axis role.
    #[error("Invalid orientation {orientation} found for {role} axis")]
    InvalidAxisOrientation {
        /// Axis role (x or y).
        role: String,
        /// Offending orientation.
        orientation: String,
    },

    /// Explicit grid band sizes do not add up to 1.
    #[error("In {bands}, sum of all size values must add up to 1 (got {total:.3})")]
    GridSizeSum {
        /// Which band list ("rowSizes" or "columnSizes").
        bands: &'static str,
        /// Actual sum.
        total: f32,
    },

    /// Explicit grid band list does not cover every band exactly once.
    #[error("In {bands}, every band from 0 to {expected} must be specified exactly once")]
    IncompleteGridSizes {
        /// Which band list ("rowSizes" or "columnSizes").
        bands: &'static str,
        /// Highest band index expected.
        expected: usize,
    },

    /// Explicit grid band has a negative size.
    #[error("In {bands}, size of band {index} cannot be negative")]
    NegativeGridSize {
        /// Which band list ("rowSizes" or "columnSizes").
        bands: &'static str,
        /// Offending band index.
        index: usize,
    },

    /// A cell was placed outside the resolved grid.
    #[error("Cell ({row}, {column}) lies outside a {rows}x{columns} grid")]
    CellOutOfGrid {
        /// Cell row.
        row: usize,
        /// Cell column.
        column: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        columns: usize,
    },

    /// A stacked plot type was configured without a series list.
    #[error("'series' attribute was not provided; cannot create series data stacks for {0}")]
    MissingSeries(String),

    /// Data contains series that were never declared.
    #[error("Unknown series found in data: {}", .0.join(", "))]
    UnknownSeries(Vec<String>),

    /// A point in a stacked plot carries no series name.
    #[error("Point in category {category} has no series; stacked plots need one per point")]
    PointWithoutSeries {
        /// Category the point belongs to.
        category: String,
    },

    /// Sequential color axis without an interpolator.
    #[error("Sequential color scale requires an interpolator")]
    MissingInterpolator,

    /// A data point is missing a required coordinate.
    #[error("data {0} value cannot be undefined")]
    MissingCoordinate(&'static str),

    /// A data value cannot be placed on the declared scale kind.
    #[error("Invalid value found for {kind} scale in {attr} attribute: {value}")]
    IncompatibleValue {
        /// Scale kind name.
        kind: String,
        /// Attribute name (x or y).
        attr: &'static str,
        /// Offending value, displayed.
        value: String,
    },

    /// Domain could not be derived (no data and no explicit bounds).
    #[error("Cannot derive {0} domain from empty data without explicit min/max")]
    EmptyDomain(&'static str),

    /// Scale domain error (e.g., mixed value kinds on a numerical scale).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Invalid axis update request.
    #[error("Invalid axis update: {0}")]
    AxisUpdate(String),

    /// Invalid color literal.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Co-occurrence view references a panel that does not exist.
    #[error("No panel with id {0}")]
    UnknownPanel(String),

    /// Panel configuration cannot be turned into plots.
    #[error("Invalid panel {panel}: {reason}")]
    InvalidPanel {
        /// Panel id.
        panel: String,
        /// What is wrong.
        reason: String,
    },

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

impl Error {
    /// Wraps an error raised while loading a named resource.
    pub fn resource(resource: impl Into<String>, source: Error) -> Self {
        Error::ResourceLoad { resource: resource.into(), source: Box::new(source) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_series_lists_names() {
        let err = Error::UnknownSeries(vec!["s3".to_string(), "typo".to_string()]);
        assert_eq!(err.to_string(), "Unknown series found in data: s3, typo");
    }

    #[test]
    fn test_grid_size_sum_message() {
        let err = Error::GridSizeSum { bands: "rowSizes", total: 0.9 };
        let msg = err.to_string();
        assert!(msg.contains("rowSizes"));
        assert!(msg.contains("0.900"));
    }

    #[test]
    fn test_resource_wraps_source() {
        let inner = Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = Error::resource("data.json", inner);
        assert!(err.to_string().contains("data.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_orientation_message() {
        let err = Error::InvalidAxisOrientation {
            role: "x".to_string(),
            orientation: "left".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid orientation left found for x axis");
    }
}
