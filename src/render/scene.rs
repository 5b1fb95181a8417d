//! Retained render tree.
//!
//! A [`Scene`] is a tree of [`Group`]s holding [`Shape`]s. Groups carry an
//! optional id (so later renders can find and update them), a class, a
//! translation and an optional entry transition.

use crate::axis::TextAnchor;
use crate::color::Rgba;

/// 2D translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translate {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Translate {
    /// Create a translation.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Opacity animation applied when a group is (re)drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Starting opacity.
    pub from: f64,
    /// Final opacity.
    pub to: f64,
    /// Duration in milliseconds.
    pub duration_ms: u32,
}

impl Transition {
    /// Fade in from transparent.
    #[must_use]
    pub const fn fade_in(duration_ms: u32) -> Self {
        Self { from: 0.0, to: 1.0, duration_ms }
    }
}

/// Drawable leaf.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Shape {
    /// Rectangle.
    Rect { x: f64, y: f64, width: f64, height: f64, fill: Rgba, tooltip: Option<String> },
    /// Circle.
    Circle { cx: f64, cy: f64, r: f64, fill: Rgba, tooltip: Option<String> },
    /// Straight line.
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, stroke_width: f64, class: Option<String> },
    /// SVG path data.
    Path { d: String, fill: Option<Rgba>, stroke: Option<Rgba>, stroke_width: f64, tooltip: Option<String> },
    /// Text.
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        fill: Rgba,
        anchor: TextAnchor,
        /// Rotation in degrees around the anchor point.
        rotate: Option<f64>,
        class: Option<String>,
    },
}

impl Shape {
    /// Class of the shape, if any.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            Shape::Line { class, .. } | Shape::Text { class, .. } => class.as_deref(),
            _ => None,
        }
    }

    /// Plain text with default styling.
    #[must_use]
    pub fn text(x: f64, y: f64, text: impl Into<String>, anchor: TextAnchor) -> Self {
        Shape::Text {
            x,
            y,
            text: text.into(),
            font_size: 10.0,
            fill: Rgba::BLACK,
            anchor,
            rotate: None,
            class: None,
        }
    }
}

/// Tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested group.
    Group(Group),
    /// Leaf shape.
    Shape(Shape),
}

/// Group of nodes sharing a translation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Element id.
    pub id: Option<String>,
    /// Element class.
    pub class: Option<String>,
    /// Translation.
    pub translate: Option<Translate>,
    /// Entry transition.
    pub transition: Option<Transition>,
    /// Children in paint order.
    pub children: Vec<Node>,
}

impl Group {
    /// Empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set translation.
    #[must_use]
    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.translate = Some(Translate::new(x, y));
        self
    }

    /// Set transition.
    #[must_use]
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Append a shape.
    pub fn push(&mut self, shape: Shape) {
        self.children.push(Node::Shape(shape));
    }

    /// Append a group and return it.
    pub fn push_group(&mut self, group: Group) -> &mut Group {
        self.children.push(Node::Group(group));
        match self.children.last_mut() {
            Some(Node::Group(g)) => g,
            _ => unreachable!("group was just pushed"),
        }
    }

    /// Direct child group with `id`.
    pub fn child_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.children.iter_mut().find_map(|n| match n {
            Node::Group(g) if g.id.as_deref() == Some(id) => Some(g),
            _ => None,
        })
    }

    /// Group with `id` anywhere below (or at) this group.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Group> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|n| match n {
            Node::Group(g) => g.find_mut(id),
            Node::Shape(_) => None,
        })
    }

    /// Group with `id` anywhere below (or at) this group.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Group> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|n| match n {
            Node::Group(g) => g.find(id),
            Node::Shape(_) => None,
        })
    }

    /// Remove the direct child group with `id`; returns whether one existed.
    pub fn remove_child(&mut self, id: &str) -> bool {
        let before = self.children.len();
        self.children.retain(|n| !matches!(n, Node::Group(g) if g.id.as_deref() == Some(id)));
        self.children.len() != before
    }

    /// Remove every shape with `class`, recursively. Returns how many went.
    pub fn remove_class(&mut self, class: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|n| !matches!(n, Node::Shape(s) if s.class() == Some(class)));
        let mut removed = before - self.children.len();
        for n in &mut self.children {
            if let Node::Group(g) = n {
                removed += g.remove_class(class);
            }
        }
        removed
    }

    /// Shapes in this group and below, depth first.
    #[must_use]
    pub fn shapes(&self) -> Vec<&Shape> {
        let mut out = Vec::new();
        self.collect_shapes(&mut out);
        out
    }

    fn collect_shapes<'a>(&'a self, out: &mut Vec<&'a Shape>) {
        for n in &self.children {
            match n {
                Node::Shape(s) => out.push(s),
                Node::Group(g) => g.collect_shapes(out),
            }
        }
    }

    /// Shapes with `class`, mutably, recursively.
    pub fn for_each_class_mut(&mut self, class: &str, f: &mut impl FnMut(&mut Shape)) {
        for n in &mut self.children {
            match n {
                Node::Shape(s) if s.class() == Some(class) => f(s),
                Node::Group(g) => g.for_each_class_mut(class, f),
                Node::Shape(_) => {}
            }
        }
    }
}

/// Root of a render tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Root group (the render target).
    pub root: Group,
}

impl Scene {
    /// Empty scene for render target `id`.
    #[must_use]
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self { width, height, root: Group::new().id(id) }
    }

    /// Drop every child of the root.
    pub fn clear(&mut self) {
        self.root.children.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(class: &str) -> Shape {
        Shape::Line { x1: 0.0, y1: 0.0, x2: 0.0, y2: 6.0, stroke: Rgba::BLACK, stroke_width: 1.0, class: Some(class.into()) }
    }

    #[test]
    fn test_find_and_remove_groups() {
        let mut scene = Scene::new("root", 100.0, 100.0);
        let cell = scene.root.push_group(Group::new().id("cell-0-0"));
        cell.push_group(Group::new().id("x-axis"));

        assert!(scene.root.find("x-axis").is_some());
        assert!(scene.root.find_mut("cell-0-0").is_some());
        assert!(scene.root.remove_child("cell-0-0"));
        assert!(!scene.root.remove_child("cell-0-0"));
        assert!(scene.root.find("x-axis").is_none());
    }

    #[test]
    fn test_remove_class_recurses() {
        let mut g = Group::new();
        g.push(tick("tick"));
        g.push_group(Group::new()).push(tick("tick"));
        g.push(tick("domain"));
        assert_eq!(g.remove_class("tick"), 2);
        assert_eq!(g.shapes().len(), 1);
    }

    #[test]
    fn test_for_each_class_mut() {
        let mut g = Group::new();
        g.push(Shape::Text {
            x: 0.0,
            y: 0.0,
            text: "a".into(),
            font_size: 10.0,
            fill: Rgba::BLACK,
            anchor: TextAnchor::Middle,
            rotate: None,
            class: Some("label".into()),
        });
        g.for_each_class_mut("label", &mut |s| {
            if let Shape::Text { rotate, .. } = s {
                *rotate = Some(45.0);
            }
        });
        assert!(matches!(g.shapes()[0], Shape::Text { rotate: Some(_), .. }));
    }

    #[test]
    fn test_clear() {
        let mut scene = Scene::new("root", 10.0, 10.0);
        scene.root.push(Shape::text(0.0, 0.0, "x", TextAnchor::Start));
        scene.clear();
        assert!(scene.root.children.is_empty());
    }
}
