use crate::color::Color;

/// Immediate-mode 2D drawing target, shaped after `CanvasRenderingContext2d`.
///
/// Path calls accumulate into the current path until `stroke`. Styles are
/// sticky, like the canvas context they mirror.
pub trait Surface {
    /// Decoded bitmap the host can blit.
    type Image;

    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    /// Round caps and joins, so freehand segments chain without gaps.
    fn set_round_line_style(&mut self);
    fn set_font(&mut self, font: &str);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64);
}

/// CSS font shorthand for the text tool, e.g. `24px sans-serif`.
pub fn font_css(size: f64, family: &str) -> String {
    format!("{size}px {family}")
}
