use crate::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Geometry committed by a shape tool on release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Line { from: Point, to: Point },
    /// Corner at the press point; width/height are signed.
    Rectangle { origin: Point, width: f64, height: f64 },
    Circle { center: Point, radius: f64 },
}

impl Shape {
    pub fn rectangle(start: Point, end: Point) -> Self {
        Shape::Rectangle {
            origin: start,
            width: end.x - start.x,
            height: end.y - start.y,
        }
    }

    pub fn circle(start: Point, end: Point) -> Self {
        Shape::Circle {
            center: start,
            radius: circle_radius(start, end),
        }
    }

    /// Axis-aligned bounds, independent of drag direction.
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::Line { from, to } => normalize_rect(from, to),
            Shape::Rectangle {
                origin,
                width,
                height,
            } => normalize_rect(origin, Point::new(origin.x + width, origin.y + height)),
            Shape::Circle { center, radius } => Rect {
                x: center.x - radius,
                y: center.y - radius,
                width: radius * 2.0,
                height: radius * 2.0,
            },
        }
    }
}

pub fn normalize_rect(a: Point, b: Point) -> Rect {
    Rect {
        x: a.x.min(b.x),
        y: a.y.min(b.y),
        width: (b.x - a.x).abs(),
        height: (b.y - a.y).abs(),
    }
}

pub fn circle_radius(center: Point, edge: Point) -> f64 {
    center.distance(edge)
}
