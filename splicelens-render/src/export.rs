//! SVG output for a finished [Scene].

use std::path::Path;

use svg::Document;
use svg::Node;
use svg::node::element::{Circle, Group, Line, Polygon, Rectangle, Text};

use crate::errors::RenderError;
use crate::primitives::{DrawCommand, Scene, Style, TextAnchor};

/// Font size glyphs are set at before scaling to their box.
const GLYPH_EM: f64 = 100.0;
/// Approximate advance width of a capital letter at [GLYPH_EM].
const GLYPH_ADVANCE: f64 = 60.0;
/// Approximate cap height at [GLYPH_EM].
const GLYPH_CAP_HEIGHT: f64 = 72.0;

#[derive(Debug, Clone)]
pub struct SvgBackend {
    pub font_family: String,
}

impl Default for SvgBackend {
    fn default() -> Self {
        SvgBackend {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
        }
    }
}

fn apply_style<N: Node>(mut node: N, style: &Style) -> N {
    node.assign("fill", style.fill.as_deref().unwrap_or("none"));
    if let Some(stroke) = &style.stroke {
        node.assign("stroke", stroke.as_str());
        node.assign("stroke-width", style.stroke_width);
    }
    if let Some(dash) = &style.dash {
        node.assign("stroke-dasharray", dash.as_str());
    }
    if let Some(opacity) = style.opacity {
        node.assign("opacity", opacity);
    }
    node
}

fn anchor_value(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

impl SvgBackend {
    fn glyph(&self, letter: char, x: f64, y: f64, width: f64, height: f64, style: &Style) -> Text {
        // baseline at the bottom of the box, letter stretched to fill it
        let transform = format!(
            "translate({x},{}) scale({},{})",
            y + height,
            width / GLYPH_ADVANCE,
            height / GLYPH_CAP_HEIGHT
        );
        apply_style(
            Text::new(letter.to_string())
                .set("x", 0)
                .set("y", 0)
                .set("font-size", GLYPH_EM)
                .set("font-family", self.font_family.as_str())
                .set("font-weight", "bold")
                .set("transform", transform),
            style,
        )
    }

    fn add_command(&self, group: Group, command: &DrawCommand) -> Group {
        match command {
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                style,
            } => group.add(apply_style(
                Rectangle::new()
                    .set("x", *x)
                    .set("y", *y)
                    .set("width", width.max(0.0))
                    .set("height", height.max(0.0)),
                style,
            )),
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                style,
            } => group.add(apply_style(
                Line::new()
                    .set("x1", *x1)
                    .set("y1", *y1)
                    .set("x2", *x2)
                    .set("y2", *y2),
                style,
            )),
            DrawCommand::Text {
                x,
                y,
                content,
                size,
                anchor,
                style,
            } => group.add(apply_style(
                Text::new(content.as_str())
                    .set("x", *x)
                    .set("y", *y)
                    .set("font-size", *size)
                    .set("font-family", self.font_family.as_str())
                    .set("text-anchor", anchor_value(*anchor)),
                style,
            )),
            DrawCommand::Circle { cx, cy, r, style } => group.add(apply_style(
                Circle::new().set("cx", *cx).set("cy", *cy).set("r", *r),
                style,
            )),
            DrawCommand::Polygon { points, style } => {
                let points = points
                    .iter()
                    .map(|(x, y)| format!("{x},{y}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                group.add(apply_style(Polygon::new().set("points", points), style))
            }
            DrawCommand::Glyph {
                letter,
                x,
                y,
                width,
                height,
                style,
            } => group.add(self.glyph(*letter, *x, *y, *width, *height, style)),
        }
    }

    /// One `<g id=...>` per layer, bottom-to-top.
    pub fn to_document(&self, scene: &Scene) -> Document {
        let mut doc = Document::new()
            .set("viewBox", (0.0, 0.0, scene.width, scene.height))
            .set("width", scene.width)
            .set("height", scene.height)
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", scene.background.as_str()),
            );

        for layer in &scene.layers {
            let group = layer
                .commands
                .iter()
                .fold(Group::new().set("id", layer.name.as_str()), |g, c| {
                    self.add_command(g, c)
                });
            doc = doc.add(group);
        }

        doc
    }

    pub fn to_svg_string(&self, scene: &Scene) -> String {
        self.to_document(scene).to_string()
    }

    pub fn save<P: AsRef<Path>>(&self, scene: &Scene, path: P) -> Result<(), RenderError> {
        svg::save(path, &self.to_document(scene))?;
        Ok(())
    }
}
