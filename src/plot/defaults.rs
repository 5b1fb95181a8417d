//! Per-plot-type default tables.
//!
//! These are pure lookups. Resolution always builds a fresh config from them
//! and never writes back.

use crate::axis::{AxisOrientation, AxisRole, PlotOrientation};
use crate::plot::PlotType;
use crate::scale::ScaleKind;

/// Default outer plot width in pixels.
pub const PLOT_WIDTH: f64 = 300.0;
/// Default outer plot height in pixels.
pub const PLOT_HEIGHT: f64 = 300.0;
/// Default padding on every side of a plot.
pub const PLOT_PADDING: f64 = 50.0;
/// Default padding fraction between categorical bands.
pub const BAND_PADDING: f64 = 0.15;
/// Output range of the scatter plot radius scale.
pub const RADIUS_RANGE: (f64, f64) = (1.0, 3.0);
/// Donut inner radius as a fraction of the outer radius.
pub const DONUT_INNER_RATIO: f64 = 0.6;
/// Gap between donut slices, in radians.
pub const DONUT_PAD_ANGLE: f64 = 0.01;

/// Default lattice width in pixels.
pub const LATTICE_WIDTH: f64 = 1000.0;
/// Default lattice height in pixels.
pub const LATTICE_HEIGHT: f64 = 600.0;
/// Default padding on every side of a lattice.
pub const LATTICE_PADDING: f64 = 20.0;

/// Default scale kind for an axis of a plot type.
///
/// Only heatmaps and donuts have a default color kind.
#[must_use]
pub fn scale_kind(plot_type: PlotType, role: AxisRole) -> Option<ScaleKind> {
    use ScaleKind::{Categorical, Linear, Ordinal, Sequential, Temporal};

    let (x, y, c) = match plot_type {
        PlotType::Area | PlotType::Line => (Temporal, Linear, None),
        PlotType::Bar | PlotType::StackedBar => (Linear, Categorical, None),
        PlotType::Barcode | PlotType::Scatter => (Linear, Linear, None),
        PlotType::CategoricalHeatmap => (Categorical, Categorical, Some(Ordinal)),
        PlotType::Heatmap => (Categorical, Categorical, Some(Sequential)),
        PlotType::Column | PlotType::StackedColumn => (Categorical, Linear, None),
        PlotType::Donut => (Categorical, Linear, Some(Ordinal)),
    };
    match role {
        AxisRole::X => Some(x),
        AxisRole::Y => Some(y),
        AxisRole::Color => c,
    }
}

/// Default side of the plot for an x or y axis.
///
/// Column-style plots move the x axis to the top when flipped; every other
/// plot moves its y axis to the right. The color role has no orientation and
/// reports `Left` by convention.
#[must_use]
pub fn axis_orientation(plot_type: PlotType, role: AxisRole, orientation: PlotOrientation) -> AxisOrientation {
    let negative = orientation == PlotOrientation::Negative;
    let column_like = matches!(plot_type, PlotType::Column | PlotType::StackedColumn);
    let heatmap = matches!(plot_type, PlotType::Heatmap | PlotType::CategoricalHeatmap);

    match role {
        AxisRole::X if heatmap => AxisOrientation::Top,
        AxisRole::X if column_like && negative => AxisOrientation::Top,
        AxisRole::X => AxisOrientation::Bottom,
        AxisRole::Y if !column_like && negative => AxisOrientation::Right,
        AxisRole::Y | AxisRole::Color => AxisOrientation::Left,
    }
}

/// Default axis title.
#[must_use]
pub fn axis_title(role: AxisRole) -> &'static str {
    match role {
        AxisRole::X => "x axis",
        AxisRole::Y => "y axis",
        AxisRole::Color => "color",
    }
}

/// Whether axes are drawn by default.
#[must_use]
pub fn axis_displayed(plot_type: PlotType) -> bool {
    plot_type != PlotType::Donut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_table() {
        assert_eq!(scale_kind(PlotType::Area, AxisRole::X), Some(ScaleKind::Temporal));
        assert_eq!(scale_kind(PlotType::Bar, AxisRole::Y), Some(ScaleKind::Categorical));
        assert_eq!(scale_kind(PlotType::Heatmap, AxisRole::Color), Some(ScaleKind::Sequential));
        assert_eq!(scale_kind(PlotType::CategoricalHeatmap, AxisRole::Color), Some(ScaleKind::Ordinal));
        assert_eq!(scale_kind(PlotType::Scatter, AxisRole::Color), None);
    }

    #[test]
    fn test_orientation_table() {
        use AxisOrientation::{Bottom, Left, Right, Top};
        use PlotOrientation::{Negative, Positive};

        for plot in PlotType::ALL {
            for o in [Positive, Negative] {
                assert!(axis_orientation(plot, AxisRole::X, o).fits(AxisRole::X), "{plot} x");
                assert!(axis_orientation(plot, AxisRole::Y, o).fits(AxisRole::Y), "{plot} y");
            }
        }
        assert_eq!(axis_orientation(PlotType::Heatmap, AxisRole::X, Positive), Top);
        assert_eq!(axis_orientation(PlotType::StackedColumn, AxisRole::X, Negative), Top);
        assert_eq!(axis_orientation(PlotType::StackedColumn, AxisRole::Y, Negative), Left);
        assert_eq!(axis_orientation(PlotType::Scatter, AxisRole::Y, Negative), Right);
        assert_eq!(axis_orientation(PlotType::Bar, AxisRole::X, Negative), Bottom);
    }

    #[test]
    fn test_donut_axes_hidden() {
        assert!(!axis_displayed(PlotType::Donut));
        assert!(axis_displayed(PlotType::Scatter));
    }
}
