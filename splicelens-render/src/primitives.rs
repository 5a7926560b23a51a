//! Backend-independent drawing primitives.
//!
//! Layout code produces plain [DrawCommand] values grouped into named
//! [Layer]s; a [Scene] lists its layers bottom-to-top and is handed to a
//! backend (see [crate::export]) only once it is complete.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub dash: Option<String>,
    pub opacity: Option<f64>,
}

impl Style {
    pub fn filled(color: &str) -> Style {
        Style {
            fill: Some(color.to_string()),
            ..Default::default()
        }
    }

    pub fn stroked(color: &str, width: f64) -> Style {
        Style {
            stroke: Some(color.to_string()),
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn with_fill(mut self, color: &str) -> Style {
        self.fill = Some(color.to_string());
        self
    }

    pub fn with_dash(mut self, dash: &str) -> Style {
        self.dash = Some(dash.to_string());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Style {
        self.opacity = Some(opacity);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: Style,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        anchor: TextAnchor,
        style: Style,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        style: Style,
    },
    /// A letter stretched to fill the box `(x, y, width, height)`
    Glyph {
        letter: char,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Style,
    },
}

impl DrawCommand {
    pub fn text(x: f64, y: f64, content: impl Into<String>, size: f64, anchor: TextAnchor) -> Self {
        DrawCommand::Text {
            x,
            y,
            content: content.into(),
            size,
            anchor,
            style: Style::filled("#222222"),
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, style: Style) -> Self {
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub commands: Vec<DrawCommand>,
}

impl Layer {
    pub fn new(name: &str) -> Layer {
        Layer {
            name: name.to_string(),
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: String,
    /// Bottom-to-top
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Scene {
        Scene {
            width,
            height,
            background: "#ffffff".to_string(),
            layers: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    ///
    /// Move the named layer to the top of the stack. Returns `false` when no
    /// such layer exists.
    ///
    pub fn promote(&mut self, name: &str) -> bool {
        match self.layers.iter().position(|l| l.name == name) {
            Some(index) => {
                let layer = self.layers.remove(index);
                self.layers.push(layer);
                true
            }
            None => false,
        }
    }

    pub fn command_count(&self) -> usize {
        self.layers.iter().map(|l| l.commands.len()).sum()
    }
}
