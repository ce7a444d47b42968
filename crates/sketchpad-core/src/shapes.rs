//! Shape geometry produced by the line, rectangle and circle tools.

use crate::tools::ToolKind;
use kurbo::{Circle, Line, Point, Rect};

/// A stamped shape, in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Line(Line),
    Rectangle(Rect),
    Circle(Circle),
}

impl Shape {
    /// Build the shape a tool produces for a drag from `anchor` to `current`.
    ///
    /// Returns `None` for freehand tools, which render incrementally instead.
    pub fn from_drag(tool: ToolKind, anchor: Point, current: Point) -> Option<Self> {
        match tool {
            ToolKind::Line => Some(Shape::Line(Line::new(anchor, current))),
            ToolKind::Rectangle => Some(Shape::rectangle(anchor, current)),
            ToolKind::Circle => Some(Shape::circle(anchor, current)),
            ToolKind::Pencil | ToolKind::Brush | ToolKind::Eraser => None,
        }
    }

    /// Axis-aligned rectangle spanning two opposite corners, in either drag direction.
    pub fn rectangle(p1: Point, p2: Point) -> Self {
        Shape::Rectangle(Rect::from_points(p1, p2))
    }

    /// Circle centered at `center` passing through `edge`.
    pub fn circle(center: Point, edge: Point) -> Self {
        Shape::Circle(Circle::new(center, center.distance(edge)))
    }

    /// Segments making up the outline of a line or rectangle.
    ///
    /// Circles are not segment-based and return an empty list.
    pub fn outline_segments(&self) -> Vec<Line> {
        match *self {
            Shape::Line(line) => vec![line],
            Shape::Rectangle(rect) => {
                let tl = Point::new(rect.x0, rect.y0);
                let tr = Point::new(rect.x1, rect.y0);
                let br = Point::new(rect.x1, rect.y1);
                let bl = Point::new(rect.x0, rect.y1);
                vec![
                    Line::new(tl, tr),
                    Line::new(tr, br),
                    Line::new(br, bl),
                    Line::new(bl, tl),
                ]
            }
            Shape::Circle(_) => Vec::new(),
        }
    }

    /// Tight bounds of the geometric shape (stroke width not included).
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::Line(line) => Rect::from_points(line.p0, line.p1),
            Shape::Rectangle(rect) => rect,
            Shape::Circle(circle) => Rect::new(
                circle.center.x - circle.radius,
                circle.center.y - circle.radius,
                circle.center.x + circle.radius,
                circle.center.y + circle.radius,
            ),
        }
    }
}
