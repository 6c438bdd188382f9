use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, BLACK, WHITE};

pub const MIN_WIDTH: f64 = 1.0;
pub const MAX_WIDTH: f64 = 50.0;
pub const DEFAULT_WIDTH: f64 = 5.0;
pub const MIN_FONT_SIZE: f64 = 10.0;
pub const MAX_FONT_SIZE: f64 = 100.0;
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Freehand,
    Line,
    Rectangle,
    Circle,
    Text,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Freehand => "freehand",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Text => "text",
        }
    }

    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Line | Tool::Rectangle | Tool::Circle)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "freehand" => Ok(Tool::Freehand),
            "line" => Ok(Tool::Line),
            "rectangle" => Ok(Tool::Rectangle),
            "circle" => Ok(Tool::Circle),
            "text" => Ok(Tool::Text),
            other => Err(format!("unknown tool: {other}")),
        }
    }
}

/// How a pointer gesture is rendered, after the eraser flag is folded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeMode {
    /// Incremental segments; used by the pen and the eraser.
    Freehand,
    /// Geometry committed once on release.
    Shape(Tool),
    /// Stamp on press, no gesture.
    Text,
}

pub fn sanitize_width(width: f64) -> f64 {
    let width = if width.is_finite() {
        width
    } else {
        DEFAULT_WIDTH
    };
    width.max(MIN_WIDTH).min(MAX_WIDTH)
}

pub fn sanitize_font_size(size: f64) -> f64 {
    let size = if size.is_finite() {
        size
    } else {
        DEFAULT_FONT_SIZE
    };
    size.max(MIN_FONT_SIZE).min(MAX_FONT_SIZE)
}

/// Toolbar-driven style state.
///
/// The eraser keeps the chosen brush color untouched; [`ToolState::stroke_color`]
/// derives the effective color, so toggling twice always lands on the
/// color the user picked last.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolState {
    tool: Tool,
    eraser_active: bool,
    brush_color: Color,
    eraser_color: Color,
    brush_width: f64,
    font_size: f64,
    pending_text: String,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(BLACK, DEFAULT_WIDTH, DEFAULT_FONT_SIZE, WHITE)
    }
}

impl ToolState {
    pub fn new(brush_color: Color, brush_width: f64, font_size: f64, eraser_color: Color) -> Self {
        Self {
            tool: Tool::Freehand,
            eraser_active: false,
            brush_color,
            eraser_color,
            brush_width: sanitize_width(brush_width),
            font_size: sanitize_font_size(font_size),
            pending_text: String::new(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn eraser_active(&self) -> bool {
        self.eraser_active
    }

    pub fn brush_color(&self) -> Color {
        self.brush_color
    }

    pub fn brush_width(&self) -> f64 {
        self.brush_width
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    pub fn stroke_color(&self) -> Color {
        if self.eraser_active {
            self.eraser_color
        } else {
            self.brush_color
        }
    }

    pub fn stroke_mode(&self) -> StrokeMode {
        if self.eraser_active {
            return StrokeMode::Freehand;
        }
        match self.tool {
            Tool::Freehand => StrokeMode::Freehand,
            Tool::Text => StrokeMode::Text,
            shape => StrokeMode::Shape(shape),
        }
    }

    /// Selecting any tool switches the eraser off.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.eraser_active = false;
    }

    /// Flips the eraser and returns the new state. Turning it on leaves
    /// text mode for freehand.
    pub fn toggle_eraser(&mut self) -> bool {
        self.eraser_active = !self.eraser_active;
        if self.eraser_active && self.tool == Tool::Text {
            self.tool = Tool::Freehand;
        }
        self.eraser_active
    }

    pub fn set_brush_color(&mut self, color: Color) {
        self.brush_color = color;
    }

    pub fn set_brush_width(&mut self, width: f64) {
        self.brush_width = sanitize_width(width);
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = sanitize_font_size(size);
    }

    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        self.pending_text = text.into();
    }

    pub fn take_pending_text(&mut self) -> String {
        std::mem::take(&mut self.pending_text)
    }
}
