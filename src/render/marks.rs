//! Data marks.
//!
//! [`MarkRenderer`] is the seam between resolved plots and shape drawing.
//! [`BasicMarks`] draws one plain shape per datum (or per stack segment or
//! donut slice) for every plot type.

use crate::color::{Rgba, TABLEAU10};
use crate::error::Result;
use crate::plot::defaults;
use crate::plot::pie::PieSlice;
use crate::plot::{PlotType, ResolvedPlot};
use crate::render::scene::{Group, Shape};
use crate::scale::Scale;
use crate::value::Value;
use std::fmt::Write;
use tracing::warn;

/// Draws the data marks of a resolved plot into its group.
pub trait MarkRenderer {
    /// Append marks for `plot` to `group`; returns the number of marks drawn.
    ///
    /// # Errors
    ///
    /// Implementations return [`crate::Error::Rendering`] when a plot cannot
    /// be drawn.
    fn draw(&self, plot: &ResolvedPlot, group: &mut Group) -> Result<usize>;
}

/// Plain rects, circles, lines and paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMarks {
    /// Fill used when a datum has no mapped color.
    pub fill: Rgba,
}

impl Default for BasicMarks {
    fn default() -> Self {
        Self { fill: TABLEAU10[0] }
    }
}

impl MarkRenderer for BasicMarks {
    fn draw(&self, plot: &ResolvedPlot, group: &mut Group) -> Result<usize> {
        let before = group.shapes().len();
        let mut unknown = 0usize;

        match plot.plot_type {
            PlotType::Scatter => self.scatter(plot, group, &mut unknown),
            PlotType::Line | PlotType::Area => self.line(plot, group),
            PlotType::Barcode => self.barcode(plot, group),
            PlotType::Bar | PlotType::Column => self.bars(plot, group, &mut unknown),
            PlotType::Heatmap | PlotType::CategoricalHeatmap => self.heatmap(plot, group, &mut unknown),
            PlotType::StackedBar | PlotType::StackedColumn => self.stacks(plot, group),
            PlotType::Donut => self.donut(plot, group),
        }

        if unknown > 0 {
            warn!(target = %plot.target, unknown, "marks with unmapped colors rendered as unknown");
        }
        Ok(group.shapes().len() - before)
    }
}

impl BasicMarks {
    fn fill_for(&self, plot: &ResolvedPlot, color: Option<&Value>, unknown: &mut usize) -> Rgba {
        match (color, plot.scales.color.as_ref()) {
            (Some(c), Some(scale)) => scale.color(c).unwrap_or_else(|| {
                *unknown += 1;
                Rgba::UNKNOWN
            }),
            _ => self.fill,
        }
    }

    fn tooltip(plot: &ResolvedPlot, text: impl FnOnce() -> String) -> Option<String> {
        plot.tooltip.enabled.then(text)
    }

    fn scatter(&self, plot: &ResolvedPlot, group: &mut Group, unknown: &mut usize) {
        for p in &plot.data {
            let (Some(cx), Some(cy)) = (plot.scales.x.position(&p.x), plot.scales.y.position(&p.y)) else {
                continue;
            };
            let r = match (&plot.scales.radius, p.radius) {
                (Some(scale), Some(r)) => scale.scale(r),
                _ => defaults::RADIUS_RANGE.0,
            };
            group.push(Shape::Circle {
                cx: cx + plot.scales.x.bandwidth() / 2.0,
                cy: cy + plot.scales.y.bandwidth() / 2.0,
                r,
                fill: self.fill_for(plot, p.color.as_ref(), unknown),
                tooltip: Self::tooltip(plot, || plot.tooltip.formatter.point(p)),
            });
        }
    }

    fn line(&self, plot: &ResolvedPlot, group: &mut Group) {
        let points: Vec<(f64, f64)> = plot
            .data
            .iter()
            .filter_map(|p| Some((plot.scales.x.position(&p.x)?, plot.scales.y.position(&p.y)?)))
            .collect();
        let Some(&(first_x, _)) = points.first() else {
            return;
        };

        let mut d = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            let _ = write!(d, "{}{x},{y}", if i == 0 { "M" } else { "L" });
        }
        let (fill, stroke) = if plot.plot_type == PlotType::Area {
            let base = plot.inner_height;
            let last_x = points.last().map_or(first_x, |p| p.0);
            let _ = write!(d, "L{last_x},{base}L{first_x},{base}Z");
            (Some(self.fill), None)
        } else {
            (None, Some(self.fill))
        };
        group.push(Shape::Path { d, fill, stroke, stroke_width: 1.5, tooltip: None });
    }

    fn barcode(&self, plot: &ResolvedPlot, group: &mut Group) {
        for p in &plot.data {
            if let Some(x) = plot.scales.x.position(&p.x) {
                group.push(Shape::Line {
                    x1: x,
                    y1: 0.0,
                    x2: x,
                    y2: plot.inner_height,
                    stroke: self.fill,
                    stroke_width: 1.0,
                    class: None,
                });
            }
        }
    }

    fn bars(&self, plot: &ResolvedPlot, group: &mut Group, unknown: &mut usize) {
        let horizontal = plot.plot_type == PlotType::Bar;
        for p in &plot.data {
            let (Some(x), Some(y)) = (plot.scales.x.position(&p.x), plot.scales.y.position(&p.y)) else {
                continue;
            };
            let (rx, ry, w, h) = if horizontal {
                let x0 = plot.scales.x.range().0;
                (x0.min(x), y, (x - x0).abs(), plot.scales.y.bandwidth())
            } else {
                let y0 = plot.scales.y.range().0;
                (x, y.min(y0), plot.scales.x.bandwidth(), (y0 - y).abs())
            };
            group.push(Shape::Rect {
                x: rx,
                y: ry,
                width: w,
                height: h,
                fill: self.fill_for(plot, p.color.as_ref(), unknown),
                tooltip: Self::tooltip(plot, || plot.tooltip.formatter.point(p)),
            });
        }
    }

    fn heatmap(&self, plot: &ResolvedPlot, group: &mut Group, unknown: &mut usize) {
        for p in &plot.data {
            let (Some(x), Some(y)) = (plot.scales.x.position(&p.x), plot.scales.y.position(&p.y)) else {
                continue;
            };
            let fill = match (&p.color, plot.scales.color.as_ref()) {
                (Some(c), Some(scale)) => scale.color(c).unwrap_or_else(|| {
                    *unknown += 1;
                    Rgba::UNKNOWN
                }),
                _ => {
                    *unknown += 1;
                    Rgba::UNKNOWN
                }
            };
            group.push(Shape::Rect {
                x,
                y,
                width: plot.scales.x.bandwidth(),
                height: plot.scales.y.bandwidth(),
                fill,
                tooltip: Self::tooltip(plot, || plot.tooltip.formatter.point(p)),
            });
        }
    }

    fn stacks(&self, plot: &ResolvedPlot, group: &mut Group) {
        let Some(stack) = &plot.stack else {
            return;
        };
        let horizontal = plot.plot_type == PlotType::StackedBar;
        for seg in stack.segments() {
            if seg.end == seg.start {
                continue;
            }
            let tooltip =
                Self::tooltip(plot, || plot.tooltip.formatter.segment(stack.key, &seg.category, &seg.series, seg.value()));
            let (x, y, width, height) = if horizontal {
                let (Some(band), Some(a), Some(b)) = (
                    plot.scales.y.position(&seg.category),
                    plot.scales.x.position(&Value::Number(seg.start)),
                    plot.scales.x.position(&Value::Number(seg.end)),
                ) else {
                    continue;
                };
                (a.min(b), band, (b - a).abs(), plot.scales.y.bandwidth())
            } else {
                let (Some(band), Some(a), Some(b)) = (
                    plot.scales.x.position(&seg.category),
                    plot.scales.y.position(&Value::Number(seg.start)),
                    plot.scales.y.position(&Value::Number(seg.end)),
                ) else {
                    continue;
                };
                (band, a.min(b), plot.scales.x.bandwidth(), (b - a).abs())
            };
            group.push(Shape::Rect { x, y, width, height, fill: seg.color, tooltip });
        }
    }

    fn donut(&self, plot: &ResolvedPlot, group: &mut Group) {
        let Some(layout) = &plot.donut else {
            return;
        };
        let centre = group.push_group(
            Group::new().class("ljs--donutplot-root").translate(plot.inner_width / 2.0, plot.inner_height / 2.0),
        );
        let mut unknown = 0;
        for slice in &layout.slices {
            if slice.end_angle - slice.start_angle <= slice.pad_angle {
                continue;
            }
            let fill = self.fill_for(plot, Some(&slice.category), &mut unknown);
            centre.push(Shape::Path {
                d: arc_path(slice, layout.inner_radius, layout.outer_radius),
                fill: Some(fill),
                stroke: None,
                stroke_width: 0.0,
                tooltip: Self::tooltip(plot, || format!("{}: {}", slice.category, Value::Number(slice.value))),
            });
        }
    }
}

/// SVG path of one donut slice, angles clockwise from 12 o'clock.
#[must_use]
pub fn arc_path(slice: &PieSlice, inner: f64, outer: f64) -> String {
    let a0 = slice.start_angle + slice.pad_angle / 2.0;
    let a1 = slice.end_angle - slice.pad_angle / 2.0;
    let point = |r: f64, a: f64| (r * a.sin(), -r * a.cos());
    let large = i32::from(a1 - a0 > std::f64::consts::PI);

    let (ox0, oy0) = point(outer, a0);
    let (ox1, oy1) = point(outer, a1);
    let (ix1, iy1) = point(inner, a1);
    let (ix0, iy0) = point(inner, a0);
    format!(
        "M{ox0:.3},{oy0:.3}A{outer:.3},{outer:.3},0,{large},1,{ox1:.3},{oy1:.3}\
         L{ix1:.3},{iy1:.3}A{inner:.3},{inner:.3},0,{large},0,{ix0:.3},{iy0:.3}Z"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::ColorAxisOverride;
    use crate::data::Point;
    use crate::plot::config::{PlotConfig, SeriesSpec};
    use crate::plot::Plot;
    use crate::scale::ScaleKind;

    fn draw(plot: &ResolvedPlot) -> Group {
        let mut g = Group::new();
        BasicMarks::default().draw(plot, &mut g).unwrap();
        g
    }

    #[test]
    fn test_scatter_circles() {
        let plot = Plot::new(vec![Point::new(0, 0), Point::new(10, 10)], PlotType::Scatter, "t").resolve().unwrap();
        let g = draw(&plot);
        let shapes = g.shapes();
        assert_eq!(shapes.len(), 2);
        assert!(matches!(shapes[1], Shape::Circle { cx, cy, .. } if *cx == 200.0 && *cy == 0.0));
    }

    #[test]
    fn test_column_rects_grow_from_baseline() {
        let data = vec![Point::new("a", 0), Point::new("b", 10)];
        let plot = Plot::new(data, PlotType::Column, "t").resolve().unwrap();
        let g = draw(&plot);
        match g.shapes()[1] {
            Shape::Rect { y, height, .. } => {
                assert_eq!(*y, 0.0);
                assert_eq!(*height, 200.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_stacked_column_segments() {
        let data = vec![Point::new("A", 10).series("s1"), Point::new("A", 5).series("s2")];
        let config = PlotConfig::default()
            .series(vec![SeriesSpec::new("s1", Rgba::RED), SeriesSpec::new("s2", Rgba::BLUE)]);
        let plot = Plot::new(data, PlotType::StackedColumn, "t").config(config).resolve().unwrap();
        let g = draw(&plot);
        let heights: Vec<f64> = g
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Rect { height, .. } => Some(*height),
                _ => None,
            })
            .collect();
        assert_eq!(heights.len(), 2);
        assert!((heights[0] - 200.0 * 10.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_heatmap_unknown_colors() {
        let data = vec![Point::new("a", "r").color(1), Point::new("b", "r").color(9)];
        let config = PlotConfig::default().color_axis(ColorAxisOverride {
            scale_type: Some(ScaleKind::Ordinal),
            domain: Some(vec![Value::from(1)]),
            range: Some(vec![Rgba::RED]),
            interpolator: None,
        });
        let plot = Plot::new(data, PlotType::CategoricalHeatmap, "t").config(config).resolve().unwrap();
        let fills: Vec<Rgba> = draw(&plot)
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Rect { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Rgba::RED, Rgba::UNKNOWN]);
    }

    #[test]
    fn test_tooltips_follow_config() {
        let plot = Plot::new(vec![Point::new(1, 2)], PlotType::Scatter, "t").resolve().unwrap();
        assert!(matches!(draw(&plot).shapes()[0], Shape::Circle { tooltip: Some(t), .. } if t == "x: 1<br/>y: 2"));
    }

    #[test]
    fn test_donut_arcs() {
        let data = vec![Point::new("a", 1), Point::new("b", 1)];
        let plot = Plot::new(data, PlotType::Donut, "t").resolve().unwrap();
        let g = draw(&plot);
        assert_eq!(g.shapes().len(), 2);
        assert!(matches!(g.shapes()[0], Shape::Path { d, .. } if d.starts_with('M') && d.ends_with('Z')));
    }

    #[test]
    fn test_line_and_area_paths() {
        let data = vec![Point::new(0, 0), Point::new(1, 1)];
        let config = PlotConfig::default().x_axis(crate::axis::AxisOverride {
            scale_type: Some(ScaleKind::Linear),
            ..Default::default()
        });
        let line = Plot::new(data.clone(), PlotType::Line, "t").config(config.clone()).resolve().unwrap();
        let area = Plot::new(data, PlotType::Area, "t").config(config).resolve().unwrap();
        assert!(matches!(draw(&line).shapes()[0], Shape::Path { fill: None, .. }));
        assert!(matches!(draw(&area).shapes()[0], Shape::Path { d, .. } if d.ends_with('Z')));
    }
}
