use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use sketchpad_shared::{Color, Surface};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        }
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_round_line_style(&mut self) {
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        if let Err(err) = self.ctx.arc(x, y, radius, start_angle, end_angle) {
            log::warn!("arc rejected by canvas: {err:?}");
        }
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(err) = self.ctx.fill_text(text, x, y) {
            log::warn!("fill_text rejected by canvas: {err:?}");
        }
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f64, y: f64, width: f64, height: f64) {
        if let Err(err) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
        {
            log::error!("failed to draw background image: {err:?}");
        }
    }
}
