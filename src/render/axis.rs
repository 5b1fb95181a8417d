//! Axis drawing.
//!
//! The first render of a plot creates the axis group and its title; later
//! renders find the group by id and redraw its ticks under a transition.
//! Label rotation and anchoring are reapplied on every render, and hidden
//! ticks or labels are removed after drawing rather than skipped.

use crate::axis::{AxisConfig, AxisOrientation, TextAnchor};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::render::scene::{Group, Shape, Transition};
use crate::scale::AxisScale;
use tracing::trace;

/// Class of tick mark lines.
pub const TICK_CLASS: &str = "tick";
/// Class of tick label text.
pub const LABEL_CLASS: &str = "tick-label";

const TICK_SIZE: f64 = 6.0;
const UPDATE_DURATION_MS: u32 = 1000;

/// Whether a plot's axes have been drawn before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisRenderState {
    /// Never drawn.
    #[default]
    Uninitialized,
    /// Drawn at least once.
    Rendered,
}

/// Plot geometry the axis needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    /// Drawable width.
    pub inner_width: f64,
    /// Drawable height.
    pub inner_height: f64,
    /// Outer height.
    pub height: f64,
    /// Left padding.
    pub padding_left: f64,
    /// Bottom padding.
    pub padding_bottom: f64,
}

/// Draw (or update) one axis into the plot group.
///
/// # Errors
///
/// Returns [`Error::InvalidAxisOrientation`] before touching the tree when the
/// orientation does not fit the role, and [`Error::Rendering`] when an update
/// cannot find the group drawn by the first render.
pub fn render_axis(
    plot_group: &mut Group,
    axis: &AxisConfig,
    scale: &AxisScale,
    frame: &AxisFrame,
    state: AxisRenderState,
) -> Result<()> {
    axis.validate()?;
    if !axis.displayed {
        return Ok(());
    }

    let id = format!("{}-axis", axis.role);
    let count = if axis.scale_kind.is_numerical() { axis.tick_count } else { None };

    let group = match state {
        AxisRenderState::Uninitialized => {
            if let Some(title) = axis.title.as_deref().filter(|_| !axis.title_hidden) {
                plot_group.push(title_shape(axis, title, frame));
            }
            let mut group = Group::new().id(id.clone()).class(format!("ljs--{id}"));
            match axis.orientation {
                AxisOrientation::Bottom => group = group.translate(0.0, frame.inner_height),
                AxisOrientation::Right => group = group.translate(frame.inner_width, 0.0),
                AxisOrientation::Top | AxisOrientation::Left => {}
            }
            plot_group.push_group(group)
        }
        AxisRenderState::Rendered => {
            let group = plot_group
                .child_mut(&id)
                .ok_or_else(|| Error::Rendering(format!("axis group {id} was never rendered")))?;
            group.children.clear();
            group.transition = Some(Transition { from: 1.0, to: 1.0, duration_ms: UPDATE_DURATION_MS });
            group
        }
    };

    draw_ticks(group, axis.orientation, scale, count);

    let angle = axis.text_angle;
    let anchor = axis.text_anchor;
    group.for_each_class_mut(LABEL_CLASS, &mut |shape| {
        if let Shape::Text { rotate, anchor: a, .. } = shape {
            if angle != 0.0 {
                *rotate = Some(angle);
            }
            if let Some(anchor) = anchor {
                *a = anchor;
            }
        }
    });

    if axis.labels_hidden {
        group.remove_class(LABEL_CLASS);
    }
    if axis.ticks_hidden {
        group.remove_class(TICK_CLASS);
    }
    trace!(axis = %axis.role, ?state, "axis rendered");
    Ok(())
}

fn title_shape(axis: &AxisConfig, title: &str, frame: &AxisFrame) -> Shape {
    let (x, y, anchor) = match axis.orientation {
        AxisOrientation::Bottom => (frame.inner_width / 2.0, frame.height - frame.padding_bottom / 2.0, TextAnchor::Middle),
        AxisOrientation::Top => (frame.inner_width / 2.0, 0.0, TextAnchor::Middle),
        AxisOrientation::Left => (-frame.padding_left, 0.0, TextAnchor::End),
        AxisOrientation::Right => (frame.inner_width, 0.0, TextAnchor::Start),
    };
    Shape::Text {
        x,
        y,
        text: title.to_string(),
        font_size: 12.0,
        fill: Rgba::BLACK,
        anchor,
        rotate: None,
        class: Some(format!("ljs--{}-axis-label", axis.role)),
    }
}

fn draw_ticks(group: &mut Group, orientation: AxisOrientation, scale: &AxisScale, count: Option<usize>) {
    let (r0, r1) = scale.range();
    let (lo, hi) = (r0.min(r1), r0.max(r1));
    let horizontal = matches!(orientation, AxisOrientation::Top | AxisOrientation::Bottom);
    let k = match orientation {
        AxisOrientation::Top | AxisOrientation::Left => -1.0,
        AxisOrientation::Bottom | AxisOrientation::Right => 1.0,
    };

    let domain = if horizontal {
        Shape::Line { x1: lo, y1: 0.0, x2: hi, y2: 0.0, stroke: Rgba::BLACK, stroke_width: 1.0, class: Some("domain".into()) }
    } else {
        Shape::Line { x1: 0.0, y1: lo, x2: 0.0, y2: hi, stroke: Rgba::BLACK, stroke_width: 1.0, class: Some("domain".into()) }
    };
    group.push(domain);

    for tick in scale.ticks(count) {
        let p = tick.position;
        let (x2, y2, tx, ty, anchor) = if horizontal {
            (p, k * TICK_SIZE, p, k * (TICK_SIZE + 9.0), TextAnchor::Middle)
        } else {
            let anchor = if k < 0.0 { TextAnchor::End } else { TextAnchor::Start };
            (k * TICK_SIZE, p, k * (TICK_SIZE + 3.0), p + 3.0, anchor)
        };
        let (x1, y1) = if horizontal { (p, 0.0) } else { (0.0, p) };
        group.push(Shape::Line { x1, y1, x2, y2, stroke: Rgba::BLACK, stroke_width: 1.0, class: Some(TICK_CLASS.into()) });
        group.push(Shape::Text {
            x: tx,
            y: ty,
            text: tick.value.to_string(),
            font_size: 10.0,
            fill: Rgba::BLACK,
            anchor,
            rotate: None,
            class: Some(LABEL_CLASS.into()),
        });
    }
}
