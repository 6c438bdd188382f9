use pretty_assertions::assert_eq;

use sketchpad_shared::{Board, BoardConfig, Color, Point, Surface, Tool, WHITE};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f64),
    RoundLineStyle,
    Font(String),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Rect(f64, f64, f64, f64),
    Arc(f64, f64, f64),
    Stroke,
    FillRect(f64, f64, f64, f64),
    ClearRect(f64, f64, f64, f64),
    FillText(String, f64, f64),
    DrawImage(&'static str, f64, f64, f64, f64),
}

/// Records every call and tracks the path built since the last `begin_path`.
#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    path: Vec<Call>,
    stroked: Vec<Vec<Call>>,
}

impl Recorder {
    fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for Recorder {
    type Image = &'static str;

    fn width(&self) -> f64 {
        800.0
    }

    fn height(&self) -> f64 {
        600.0
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(Call::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(Call::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(Call::LineWidth(width));
    }

    fn set_round_line_style(&mut self) {
        self.calls.push(Call::RoundLineStyle);
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(Call::Font(font.to_string()));
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.calls.push(Call::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(Call::MoveTo(x, y));
        self.calls.push(Call::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(Call::LineTo(x, y));
        self.calls.push(Call::LineTo(x, y));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.path.push(Call::Rect(x, y, width, height));
        self.calls.push(Call::Rect(x, y, width, height));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        assert!(radius >= 0.0, "negative radius");
        assert_eq!(start_angle, 0.0);
        assert_eq!(end_angle, std::f64::consts::PI * 2.0);
        self.path.push(Call::Arc(x, y, radius));
        self.calls.push(Call::Arc(x, y, radius));
    }

    fn stroke(&mut self) {
        self.stroked.push(self.path.clone());
        self.calls.push(Call::Stroke);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::FillRect(x, y, width, height));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::ClearRect(x, y, width, height));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(Call::FillText(text.to_string(), x, y));
    }

    fn draw_image(&mut self, image: &&'static str, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::DrawImage(*image, x, y, width, height));
    }
}

fn new_board() -> Board<Recorder> {
    Board::new(Recorder::default(), &BoardConfig::default())
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn background_fill() -> Vec<Call> {
    vec![
        Call::ClearRect(0.0, 0.0, 800.0, 600.0),
        Call::FillColor(WHITE),
        Call::FillRect(0.0, 0.0, 800.0, 600.0),
    ]
}

#[test]
fn mount_sets_round_caps_and_fills_background() {
    let board = new_board();
    let mut expected = vec![Call::RoundLineStyle];
    expected.extend(background_fill());
    assert_eq!(board.surface().calls, expected);
    assert!(!board.is_drawing());
}

#[test]
fn freehand_strokes_one_segment_per_move() {
    let mut board = new_board();
    let moves = [p(12.0, 10.0), p(20.0, 18.0), p(25.0, 30.0), p(40.0, 31.0)];

    board.pointer_down(p(10.0, 10.0));
    for point in moves {
        board.pointer_move(point);
    }
    board.pointer_up(p(40.0, 31.0));

    let stroked = &board.surface().stroked;
    assert_eq!(stroked.len(), moves.len());
    let mut last = p(10.0, 10.0);
    for (segment, point) in stroked.iter().zip(moves) {
        assert_eq!(
            segment,
            &vec![Call::MoveTo(last.x, last.y), Call::LineTo(point.x, point.y)]
        );
        last = point;
    }
    assert!(!board.is_drawing());
}

#[test]
fn freehand_applies_brush_style_on_press() {
    let mut board = new_board();
    let red = Color::new(0xff, 0, 0);
    board.tools.set_brush_color(red);
    board.tools.set_brush_width(12.0);

    board.pointer_down(p(5.0, 5.0));
    let calls = board.surface().calls.clone();
    assert_eq!(
        calls[calls.len() - 4..].to_vec(),
        vec![
            Call::StrokeColor(red),
            Call::LineWidth(12.0),
            Call::BeginPath,
            Call::MoveTo(5.0, 5.0),
        ]
    );
}

#[test]
fn line_commits_on_release_only() {
    let mut board = new_board();
    board.select_tool(Tool::Line);

    board.pointer_down(p(100.0, 100.0));
    board.pointer_move(p(200.0, 80.0));
    board.pointer_move(p(250.0, 60.0));
    assert!(board.surface().stroked.is_empty());

    board.pointer_up(p(300.0, 50.0));
    assert_eq!(
        board.surface().stroked,
        vec![vec![Call::MoveTo(100.0, 100.0), Call::LineTo(300.0, 50.0)]]
    );
}

#[test]
fn rectangle_drag_up_left_keeps_signed_extent() {
    let mut board = new_board();
    board.select_tool(Tool::Rectangle);

    board.pointer_down(p(300.0, 200.0));
    board.pointer_up(p(100.0, 50.0));

    assert_eq!(
        board.surface().stroked,
        vec![vec![Call::Rect(300.0, 200.0, -200.0, -150.0)]]
    );
}

#[test]
fn circle_radius_is_distance_to_release() {
    let mut board = new_board();
    board.select_tool(Tool::Circle);

    board.pointer_down(p(100.0, 100.0));
    board.pointer_up(p(130.0, 60.0));

    assert_eq!(
        board.surface().stroked,
        vec![vec![Call::Arc(100.0, 100.0, 50.0)]]
    );
}

#[test]
fn zero_radius_circle_is_committed_without_failing() {
    let mut board = new_board();
    board.select_tool(Tool::Circle);

    board.pointer_down(p(50.0, 50.0));
    board.pointer_up(p(50.0, 50.0));

    assert_eq!(
        board.surface().stroked,
        vec![vec![Call::Arc(50.0, 50.0, 0.0)]]
    );
}

#[test]
fn release_without_press_is_a_no_op() {
    let mut board = new_board();
    board.select_tool(Tool::Line);
    let before = board.surface().calls.len();

    board.pointer_up(p(10.0, 10.0));
    board.pointer_move(p(20.0, 20.0));

    assert_eq!(board.surface().calls.len(), before);
}

#[test]
fn second_press_during_gesture_is_ignored() {
    let mut board = new_board();
    board.select_tool(Tool::Line);

    board.pointer_down(p(0.0, 0.0));
    board.pointer_down(p(500.0, 500.0));
    board.pointer_up(p(10.0, 0.0));

    assert_eq!(
        board.surface().stroked,
        vec![vec![Call::MoveTo(0.0, 0.0), Call::LineTo(10.0, 0.0)]]
    );
}

#[test]
fn cancel_drops_pending_shape() {
    let mut board = new_board();
    board.select_tool(Tool::Rectangle);

    board.pointer_down(p(0.0, 0.0));
    board.cancel();
    board.pointer_up(p(40.0, 40.0));

    assert!(board.surface().stroked.is_empty());
    assert!(!board.is_drawing());
}

#[test]
fn board_accepts_new_gesture_after_cancel() {
    let mut board = new_board();
    board.select_tool(Tool::Line);

    board.pointer_down(p(0.0, 0.0));
    board.cancel();
    board.pointer_down(p(5.0, 5.0));
    assert!(board.is_drawing());
    board.pointer_up(p(15.0, 5.0));

    assert_eq!(
        board.surface().stroked,
        vec![vec![Call::MoveTo(5.0, 5.0), Call::LineTo(15.0, 5.0)]]
    );
}

#[test]
fn eraser_paints_background_even_with_shape_tool() {
    let mut board = new_board();
    board.select_tool(Tool::Rectangle);
    board.toggle_eraser();

    board.pointer_down(p(10.0, 10.0));
    board.pointer_move(p(20.0, 20.0));
    board.pointer_up(p(20.0, 20.0));

    let surface = board.surface();
    assert!(surface.calls.contains(&Call::StrokeColor(WHITE)));
    assert_eq!(
        surface.stroked,
        vec![vec![Call::MoveTo(10.0, 10.0), Call::LineTo(20.0, 20.0)]]
    );
}

#[test]
fn eraser_toggled_twice_restores_brush_color() {
    let mut board = new_board();
    let green = Color::new(0, 0x80, 0);
    board.tools.set_brush_color(green);

    assert!(board.toggle_eraser());
    assert!(!board.toggle_eraser());

    board.pointer_down(p(0.0, 0.0));
    assert!(board.surface().calls.contains(&Call::StrokeColor(green)));
    assert!(!board.surface().calls.contains(&Call::StrokeColor(WHITE)));
}

#[test]
fn text_is_stamped_on_press_and_pending_text_cleared() {
    let mut board = new_board();
    let blue = Color::new(0, 0, 0xff);
    board.select_tool(Tool::Text);
    board.tools.set_brush_color(blue);
    board.tools.set_font_size(32.0);
    board.tools.set_pending_text("Hi");

    board.pointer_down(p(400.0, 200.0));

    let calls = board.surface().calls.clone();
    assert_eq!(
        calls[calls.len() - 3..].to_vec(),
        vec![
            Call::Font("32px sans-serif".to_string()),
            Call::FillColor(blue),
            Call::FillText("Hi".to_string(), 400.0, 200.0),
        ]
    );
    assert_eq!(board.tools.pending_text(), "");
    assert!(!board.is_drawing());
}

#[test]
fn text_with_nothing_pending_draws_nothing() {
    let mut board = new_board();
    board.select_tool(Tool::Text);
    let before = board.surface().calls.len();

    board.pointer_down(p(1.0, 1.0));
    board.pointer_up(p(1.0, 1.0));

    assert_eq!(board.surface().calls.len(), before);
}

#[test]
fn clear_refills_background_and_drops_uploaded_image() {
    let mut board = new_board();
    board.set_background(&"cat.png", "cat.png");
    assert_eq!(board.background_name(), Some("cat.png"));

    board.surface_mut().take();
    board.clear();
    assert_eq!(board.surface().calls, background_fill());
    assert_eq!(board.background_name(), None);

    board.clear();
    assert_eq!(board.background_name(), None);
}

#[test]
fn background_upload_is_stretched_over_cleared_surface() {
    let mut board = new_board();
    board.surface_mut().take();

    board.set_background(&"photo.jpg", "photo.jpg");

    let mut expected = background_fill();
    expected.push(Call::DrawImage("photo.jpg", 0.0, 0.0, 800.0, 600.0));
    assert_eq!(board.surface().calls, expected);
}

#[test]
fn drags_outside_the_surface_are_not_clamped() {
    let mut board = new_board();
    board.select_tool(Tool::Line);

    board.pointer_down(p(790.0, 590.0));
    board.pointer_up(p(900.0, -40.0));

    assert_eq!(
        board.surface().stroked,
        vec![vec![Call::MoveTo(790.0, 590.0), Call::LineTo(900.0, -40.0)]]
    );
}
