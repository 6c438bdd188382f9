use serde::{Deserialize, Serialize};

mod board;
mod color;
mod config;
mod geometry;
mod surface;
mod tool;

pub use board::Board;
pub use color::{Color, ColorParseError, BLACK, WHITE};
pub use config::{BoardConfig, ConfigError};
pub use geometry::{circle_radius, normalize_rect, Rect, Shape};
pub use surface::{font_css, Surface};
pub use tool::{sanitize_font_size, sanitize_width, StrokeMode, Tool, ToolState};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}
