//! SVG serialization of a render tree.

use crate::color::Rgba;
use crate::error::Result;
use crate::render::scene::{Group, Node, Scene, Shape};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG document encoder for a [`Scene`].
#[derive(Debug, Clone)]
pub struct SvgEncoder<'a> {
    scene: &'a Scene,
    background: Option<Rgba>,
}

impl<'a> SvgEncoder<'a> {
    /// Encoder for `scene` with a white background.
    #[must_use]
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene, background: Some(Rgba::WHITE) }
    }

    /// Set the background color (`None` for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);
        let (w, h) = (self.scene.width, self.scene.height);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }
        write_group(&mut svg, &self.scene.root, 1);
        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

fn write_group(svg: &mut String, group: &Group, depth: usize) {
    let pad = "  ".repeat(depth);
    let mut attrs = String::new();
    if let Some(id) = &group.id {
        let _ = write!(attrs, r#" id="{}""#, escape(id));
    }
    if let Some(class) = &group.class {
        let _ = write!(attrs, r#" class="{}""#, escape(class));
    }
    if let Some(t) = group.translate {
        let _ = write!(attrs, r#" transform="translate({},{})""#, t.x, t.y);
    }
    let _ = writeln!(svg, "{pad}<g{attrs}>");

    if let Some(tr) = group.transition {
        let _ = writeln!(
            svg,
            r#"{pad}  <animate attributeName="opacity" from="{}" to="{}" dur="{}ms" fill="freeze"/>"#,
            tr.from, tr.to, tr.duration_ms
        );
    }
    for node in &group.children {
        match node {
            Node::Group(g) => write_group(svg, g, depth + 1),
            Node::Shape(s) => {
                let _ = writeln!(svg, "{pad}  {}", shape_to_svg(s));
            }
        }
    }
    let _ = writeln!(svg, "{pad}</g>");
}

/// Self-closing element, or an open/close pair with a `<title>` child.
fn element(tag: &str, attrs: &str, tooltip: Option<&String>) -> String {
    match tooltip {
        Some(t) => format!("<{tag} {attrs}><title>{}</title></{tag}>", escape(t)),
        None => format!("<{tag} {attrs}/>"),
    }
}

fn class_attr(class: Option<&String>) -> String {
    class.map(|c| format!(r#" class="{}""#, escape(c))).unwrap_or_default()
}

fn shape_to_svg(shape: &Shape) -> String {
    match shape {
        Shape::Rect { x, y, width, height, fill, tooltip } => element(
            "rect",
            &format!(r#"x="{x}" y="{y}" width="{width}" height="{height}" fill="{}""#, fill.to_css()),
            tooltip.as_ref(),
        ),
        Shape::Circle { cx, cy, r, fill, tooltip } => {
            element("circle", &format!(r#"cx="{cx}" cy="{cy}" r="{r}" fill="{}""#, fill.to_css()), tooltip.as_ref())
        }
        Shape::Line { x1, y1, x2, y2, stroke, stroke_width, class } => format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"{}/>"#,
            stroke.to_css(),
            class_attr(class.as_ref())
        ),
        Shape::Path { d, fill, stroke, stroke_width, tooltip } => {
            let fill = fill.map_or_else(|| "none".to_string(), Rgba::to_css);
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, s.to_css()))
                .unwrap_or_default();
            element("path", &format!(r#"d="{d}" fill="{fill}"{stroke_attr}"#), tooltip.as_ref())
        }
        Shape::Text { x, y, text, font_size, fill, anchor, rotate, class } => {
            let transform = rotate.map(|a| format!(r#" transform="rotate({a},{x},{y})""#)).unwrap_or_default();
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}"{transform}{}>{}</text>"#,
                fill.to_css(),
                anchor.as_str(),
                class_attr(class.as_ref()),
                escape(text)
            )
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
