//! Render tree construction.
//!
//! Resolved plots are drawn into a retained [`Scene`] rather than a live
//! document. A [`PlotView`] remembers whether its plot was drawn before so
//! that later renders update the existing groups in place.

pub mod axis;
pub mod marks;
pub mod scene;

pub use axis::{render_axis, AxisFrame, AxisRenderState};
pub use marks::{BasicMarks, MarkRenderer};
pub use scene::{Group, Node, Scene, Shape, Transition, Translate};

use crate::axis::TextAnchor;
use crate::error::{Error, Result};
use crate::plot::ResolvedPlot;
use tracing::debug;

/// A resolved plot bound to its place in a render tree.
#[derive(Debug, Clone)]
pub struct PlotView {
    plot: ResolvedPlot,
    state: AxisRenderState,
}

impl PlotView {
    /// Wrap a resolved plot that has not been drawn yet.
    #[must_use]
    pub fn new(plot: ResolvedPlot) -> Self {
        Self { plot, state: AxisRenderState::Uninitialized }
    }

    /// The plot.
    #[must_use]
    pub fn plot(&self) -> &ResolvedPlot {
        &self.plot
    }

    /// Whether the view has been drawn.
    #[must_use]
    pub fn has_rendered(&self) -> bool {
        self.state == AxisRenderState::Rendered
    }

    /// Id of the plot's group, `<target>-<plot type>`.
    #[must_use]
    pub fn group_id(&self) -> String {
        format!("{}-{}", self.plot.target, self.plot.plot_type)
    }

    /// Swap in a re-resolved plot; the next render updates in place.
    pub fn replace(&mut self, plot: ResolvedPlot) {
        self.plot = plot;
    }

    /// Draw the plot into `parent`. With `reset`, a previous drawing is
    /// removed first and the plot is drawn from scratch.
    ///
    /// # Errors
    ///
    /// Axis configuration errors are returned before `parent` is touched.
    pub fn render(&mut self, parent: &mut Group, marks: &dyn MarkRenderer, reset: bool) -> Result<usize> {
        self.plot.x_axis.validate()?;
        self.plot.y_axis.validate()?;

        let id = self.group_id();
        if reset && self.has_rendered() {
            parent.remove_child(&id);
            self.state = AxisRenderState::Uninitialized;
        }

        let plot = &self.plot;
        let marks_id = format!("{id}-marks");
        let group = match self.state {
            AxisRenderState::Uninitialized => {
                let mut g = Group::new().id(id.clone()).translate(plot.padding.left, plot.padding.top);
                if let Some(title) = &plot.title {
                    g.push(Shape::text(plot.inner_width / 2.0, -plot.padding.top / 3.0, title.clone(), TextAnchor::Middle));
                }
                parent.push_group(g)
            }
            AxisRenderState::Rendered => {
                let g = parent
                    .child_mut(&id)
                    .ok_or_else(|| Error::Rendering(format!("plot group {id} was never rendered")))?;
                g.remove_child(&marks_id);
                g
            }
        };

        let frame = AxisFrame {
            inner_width: plot.inner_width,
            inner_height: plot.inner_height,
            height: plot.height,
            padding_left: plot.padding.left,
            padding_bottom: plot.padding.bottom,
        };
        render_axis(group, &plot.x_axis, &plot.scales.x, &frame, self.state)?;
        render_axis(group, &plot.y_axis, &plot.scales.y, &frame, self.state)?;

        let mark_group = group.push_group(Group::new().id(marks_id));
        let drawn = marks.draw(plot, mark_group)?;

        debug!(plot = %id, drawn, update = self.has_rendered(), "plot rendered");
        self.state = AxisRenderState::Rendered;
        Ok(drawn)
    }
}
