pub mod ellipse;
pub mod line;
pub mod polygon;
pub mod rect;

// Re-export the specific shape types
pub use ellipse::Ellipse;
pub use line::Line;
pub use polygon::Polygon;
pub use rect::Rect;

use crate::collision::bounds::Bounds;
use crate::math::vec2::Vec2;
use thiserror::Error;

/// Errors raised when constructing or recalculating a shape.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("polygon requires at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("shape extents must be positive, got {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
}

/// Enum representing the geometric shape attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Polygon),
    Rect(Rect),
    Line(Line),
    Ellipse(Ellipse),
}

/// Borrowed polygonal view used by the SAT tests.
///
/// Polygon, Rect and Line all project the same way, so the tests work on
/// this view instead of the concrete shape type.
#[derive(Debug, Clone, Copy)]
pub struct PolygonView<'a> {
    /// Local origin of the shape, relative to the owning body.
    pub position: Vec2,
    pub vertices: &'a [Vec2],
    pub edges: &'a [Vec2],
    pub normals: &'a [Vec2],
}

impl Shape {
    /// Local origin of the shape, relative to the owning body.
    pub fn position(&self) -> Vec2 {
        match self {
            Shape::Polygon(p) => p.position,
            Shape::Rect(r) => r.position,
            Shape::Line(l) => l.position,
            Shape::Ellipse(e) => e.position,
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Shape::Polygon(p) => p.position = position,
            Shape::Rect(r) => r.position = position,
            Shape::Line(l) => l.position = position,
            Shape::Ellipse(e) => e.position = position,
        }
    }

    /// Axis-aligned bounding rectangle of the shape, in the same space as
    /// its position.
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Polygon(p) => p.bounds(),
            Shape::Rect(r) => r.bounds(),
            Shape::Line(l) => l.bounds(),
            Shape::Ellipse(e) => e.bounds(),
        }
    }

    /// Point containment test. A line has no interior and contains nothing.
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Shape::Polygon(p) => p.contains_point(point),
            Shape::Rect(r) => r.contains_point(point),
            Shape::Line(_) => false,
            Shape::Ellipse(e) => e.contains_point(point),
        }
    }

    /// Polygonal view for the SAT tests; `None` for ellipses.
    pub fn as_polygon_view(&self) -> Option<PolygonView<'_>> {
        match self {
            Shape::Polygon(p) => Some(PolygonView {
                position: p.position,
                vertices: &p.vertices,
                edges: p.edges(),
                normals: p.normals(),
            }),
            Shape::Rect(r) => Some(PolygonView {
                position: r.position,
                vertices: r.vertices(),
                edges: r.edges(),
                normals: r.normals(),
            }),
            Shape::Line(l) => Some(PolygonView {
                position: l.position,
                vertices: l.vertices(),
                edges: l.edges(),
                normals: l.normals(),
            }),
            Shape::Ellipse(_) => None,
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}
