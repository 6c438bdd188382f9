use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, HtmlSelectElement, HtmlSpanElement, PointerEvent,
};

use sketchpad_shared::{BoardConfig, Point, ToolState};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Handles to every toolbar widget the board listens to.
#[derive(Clone)]
pub struct Toolbar {
    pub color_input: HtmlInputElement,
    pub width_input: HtmlInputElement,
    pub width_value: HtmlSpanElement,
    pub tool_select: HtmlSelectElement,
    pub text_input: HtmlInputElement,
    pub font_size_input: HtmlInputElement,
    pub clear_button: HtmlButtonElement,
    pub eraser_button: HtmlButtonElement,
    pub file_input: HtmlInputElement,
    pub background_label: HtmlElement,
}

impl Toolbar {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            color_input: get_element(document, "brush-color")?,
            width_input: get_element(document, "brush-width")?,
            width_value: get_element(document, "brush-width-value")?,
            tool_select: get_element(document, "tool")?,
            text_input: get_element(document, "text-input")?,
            font_size_input: get_element(document, "font-size")?,
            clear_button: get_element(document, "clear")?,
            eraser_button: get_element(document, "eraser")?,
            file_input: get_element(document, "background-file")?,
            background_label: get_element(document, "background-name")?,
        })
    }

    /// Seeds widget values from the startup config.
    pub fn apply_config(&self, config: &BoardConfig) {
        self.color_input.set_value(&config.brush_color.to_css());
        self.width_input.set_value(&config.brush_width.to_string());
        self.font_size_input.set_value(&config.font_size.to_string());
        update_width_label(&self.width_input, &self.width_value);
        let _ = self.file_input.set_attribute("accept", "image/*");
        set_background_label(&self.background_label, None);
    }

    pub fn sync(&self, canvas: &HtmlCanvasElement, tools: &ToolState) {
        let erasing = tools.eraser_active();
        set_tool_button(&self.eraser_button, erasing);
        self.eraser_button.set_text_content(Some(if erasing {
            "Switch to Brush"
        } else {
            "Switch to Eraser"
        }));
        self.color_input.set_disabled(erasing);
        self.tool_select.set_value(tools.tool().as_str());
        if self.text_input.value() != tools.pending_text() {
            self.text_input.set_value(tools.pending_text());
        }
        set_canvas_mode(canvas, erasing);
    }
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context not supported"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("Invalid 2d context"))
}

pub fn update_width_label(input: &HtmlInputElement, value: &HtmlSpanElement) {
    value.set_text_content(Some(&input.value()));
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

/// Inline styles for the canvas. `touch-action: none` keeps touch and pen
/// drags from scrolling the page instead of reaching the pointer listeners.
pub fn canvas_style(erasing: bool) -> [(&'static str, &'static str); 2] {
    let cursor = if erasing { "cell" } else { "crosshair" };
    [("cursor", cursor), ("touch-action", "none")]
}

pub fn set_canvas_mode(canvas: &HtmlCanvasElement, erasing: bool) {
    let Ok(element) = canvas.clone().dyn_into::<HtmlElement>() else {
        return;
    };
    let style = element.style();
    for (property, value) in canvas_style(erasing) {
        if let Err(err) = style.set_property(property, value) {
            log::warn!("Failed to set canvas {property}: {err:?}");
        }
    }
}

pub fn set_background_label(label: &HtmlElement, name: Option<&str>) {
    match name {
        Some(name) => {
            label.set_text_content(Some(&format!("Background: {name}")));
            label.set_hidden(false);
        }
        None => {
            label.set_text_content(None);
            label.set_hidden(true);
        }
    }
}

/// Maps a pointer event to surface pixels, accounting for CSS scaling of
/// the canvas. Points outside the canvas are passed through unclamped.
pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    // The bounding rect includes the border; the bitmap fills the content box.
    let content = ContentBox {
        left: rect.left() + canvas.client_left() as f64,
        top: rect.top() + canvas.client_top() as f64,
        width: canvas.client_width() as f64,
        height: canvas.client_height() as f64,
    };
    content.to_surface(
        event.client_x() as f64,
        event.client_y() as f64,
        canvas.width() as f64,
        canvas.height() as f64,
    )
}

/// Viewport position and CSS size of the canvas content box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContentBox {
    /// `None` when the box has no layout size.
    pub fn to_surface(
        self,
        client_x: f64,
        client_y: f64,
        surface_width: f64,
        surface_height: f64,
    ) -> Option<Point> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let point = Point::new(
            (client_x - self.left) * surface_width / self.width,
            (client_y - self.top) * surface_height / self.height,
        );
        point.is_finite().then_some(point)
    }
}
