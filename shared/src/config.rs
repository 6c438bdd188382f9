use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, BLACK, WHITE};
use crate::tool::{
    sanitize_font_size, sanitize_width, ToolState, DEFAULT_FONT_SIZE, DEFAULT_WIDTH,
};

pub const DEFAULT_BOARD_WIDTH: u32 = 800;
pub const DEFAULT_BOARD_HEIGHT: u32 = 600;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid board config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board size must be non-zero, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },
}

/// Startup settings embedded by the host page as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub brush_color: Color,
    pub brush_width: f64,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            background: WHITE,
            brush_color: BLACK,
            brush_width: DEFAULT_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(text)?;
        config.validated()
    }

    /// Rejects an empty board and clamps sizes into the widget ranges.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        self.brush_width = sanitize_width(self.brush_width);
        self.font_size = sanitize_font_size(self.font_size);
        if self.font_family.trim().is_empty() {
            self.font_family = DEFAULT_FONT_FAMILY.to_string();
        }
        Ok(self)
    }

    pub fn tool_state(&self) -> ToolState {
        ToolState::new(
            self.brush_color,
            self.brush_width,
            self.font_size,
            self.background,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = BoardConfig::from_json(
            r##"{"width": 1024, "brushColor": "#ff0000", "brushWidth": 80, "fontFamily": "Arial"}"##,
        )
        .unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, DEFAULT_BOARD_HEIGHT);
        assert_eq!(config.brush_color, Color::new(0xff, 0, 0));
        assert_eq!(config.brush_width, 50.0);
        assert_eq!(config.font_family, "Arial");
    }

    #[test]
    fn rejects_zero_sized_board() {
        let err = BoardConfig::from_json(r#"{"height": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBoard { height: 0, .. }));
    }

    #[test]
    fn rejects_bad_colors() {
        let err = BoardConfig::from_json(r#"{"background": "white"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn tool_state_erases_with_background() {
        let config = BoardConfig {
            background: Color::new(0xee, 0xee, 0xee),
            ..BoardConfig::default()
        };
        let mut tools = config.tool_state();
        tools.toggle_eraser();
        assert_eq!(tools.stroke_color(), Color::new(0xee, 0xee, 0xee));
    }
}
