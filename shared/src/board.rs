use std::f64::consts::PI;

use log::{debug, info};

use crate::color::Color;
use crate::config::BoardConfig;
use crate::geometry::Shape;
use crate::surface::{font_css, Surface};
use crate::tool::{StrokeMode, Tool, ToolState};
use crate::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum GestureState {
    #[default]
    Idle,
    Drawing {
        start: Point,
        last: Point,
        mode: StrokeMode,
    },
}

impl GestureState {
    fn is_drawing(&self) -> bool {
        matches!(self, GestureState::Drawing { .. })
    }
}

/// Owns the drawing surface and translates pointer gestures into draw calls.
pub struct Board<S: Surface> {
    surface: S,
    pub tools: ToolState,
    gesture: GestureState,
    background: Color,
    font_family: String,
    background_name: Option<String>,
}

impl<S: Surface> Board<S> {
    /// Takes ownership of the surface and paints the empty background.
    pub fn new(surface: S, config: &BoardConfig) -> Self {
        let mut board = Self {
            surface,
            tools: config.tool_state(),
            gesture: GestureState::Idle,
            background: config.background,
            font_family: config.font_family.clone(),
            background_name: None,
        };
        board.surface.set_round_line_style();
        board.fill_background();
        board
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_drawing()
    }

    pub fn background_name(&self) -> Option<&str> {
        self.background_name.as_deref()
    }

    pub fn pointer_down(&mut self, point: Point) {
        if self.gesture.is_drawing() {
            debug!("pointer down ignored, gesture already active");
            return;
        }
        match self.tools.stroke_mode() {
            StrokeMode::Text => self.stamp_text(point),
            StrokeMode::Freehand => {
                self.apply_stroke_style();
                self.surface.begin_path();
                self.surface.move_to(point.x, point.y);
                self.gesture = GestureState::Drawing {
                    start: point,
                    last: point,
                    mode: StrokeMode::Freehand,
                };
            }
            mode @ StrokeMode::Shape(_) => {
                self.gesture = GestureState::Drawing {
                    start: point,
                    last: point,
                    mode,
                };
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        let GestureState::Drawing {
            last,
            mode: StrokeMode::Freehand,
            ..
        } = &mut self.gesture
        else {
            return;
        };
        let from = *last;
        *last = point;
        draw_segment(&mut self.surface, from, point);
    }

    pub fn pointer_up(&mut self, point: Point) {
        let GestureState::Drawing { start, mode, .. } = std::mem::take(&mut self.gesture) else {
            return;
        };
        if let StrokeMode::Shape(tool) = mode {
            let shape = match tool {
                Tool::Line => Shape::Line {
                    from: start,
                    to: point,
                },
                Tool::Rectangle => Shape::rectangle(start, point),
                Tool::Circle => Shape::circle(start, point),
                Tool::Freehand | Tool::Text => return,
            };
            debug!("committing {tool} {shape:?}");
            self.apply_stroke_style();
            self.commit_shape(&shape);
        }
    }

    /// Ends the gesture without committing anything.
    pub fn cancel(&mut self) {
        if self.gesture.is_drawing() {
            debug!("gesture cancelled");
        }
        self.gesture = GestureState::Idle;
    }

    fn commit_shape(&mut self, shape: &Shape) {
        let surface = &mut self.surface;
        surface.begin_path();
        match *shape {
            Shape::Line { from, to } => {
                surface.move_to(from.x, from.y);
                surface.line_to(to.x, to.y);
            }
            Shape::Rectangle {
                origin,
                width,
                height,
            } => surface.rect(origin.x, origin.y, width, height),
            Shape::Circle { center, radius } => {
                surface.arc(center.x, center.y, radius.max(0.0), 0.0, PI * 2.0)
            }
        }
        surface.stroke();
    }

    pub fn toggle_eraser(&mut self) -> bool {
        let active = self.tools.toggle_eraser();
        debug!("eraser {}", if active { "on" } else { "off" });
        active
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select_tool(tool);
    }

    pub fn clear(&mut self) {
        self.fill_background();
        if let Some(name) = self.background_name.take() {
            info!("background {name} discarded");
        }
    }

    /// Replaces the board content with `image`, stretched to the full surface.
    pub fn set_background(&mut self, image: &S::Image, name: impl Into<String>) {
        self.fill_background();
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface.draw_image(image, 0.0, 0.0, width, height);
        let name = name.into();
        info!("background {name} composited at {width}x{height}");
        self.background_name = Some(name);
    }

    fn stamp_text(&mut self, point: Point) {
        let text = self.tools.take_pending_text();
        if text.is_empty() {
            return;
        }
        let font = font_css(self.tools.font_size(), &self.font_family);
        self.surface.set_font(&font);
        self.surface.set_fill_color(self.tools.brush_color());
        self.surface.fill_text(&text, point.x, point.y);
        debug!("stamped {text:?} at ({}, {})", point.x, point.y);
    }

    fn apply_stroke_style(&mut self) {
        self.surface.set_stroke_color(self.tools.stroke_color());
        self.surface.set_line_width(self.tools.brush_width());
    }

    fn fill_background(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface.clear_rect(0.0, 0.0, width, height);
        self.surface.set_fill_color(self.background);
        self.surface.fill_rect(0.0, 0.0, width, height);
    }
}

fn draw_segment<S: Surface>(surface: &mut S, from: Point, to: Point) {
    surface.begin_path();
    surface.move_to(from.x, from.y);
    surface.line_to(to.x, to.y);
    surface.stroke();
}
