use crate::collision::bounds::Bounds;
use crate::math::vec2::Vec2;

/// A line segment: the degenerate 2-point polygon with a single edge and
/// normal. Participates in the SAT tests like any other polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Local origin of the shape, relative to the owning body.
    pub position: Vec2,
    vertices: [Vec2; 2],
    edges: [Vec2; 1],
    normals: [Vec2; 1],
}

impl Line {
    pub fn new(position: Vec2, a: Vec2, b: Vec2) -> Self {
        let edge = b - a;
        Line {
            position,
            vertices: [a, b],
            edges: [edge],
            normals: [edge.perpendicular().normalize()],
        }
    }

    /// Replaces both endpoints and recomputes the edge and normal.
    pub fn set_points(&mut self, a: Vec2, b: Vec2) {
        let edge = b - a;
        self.vertices = [a, b];
        self.edges = [edge];
        self.normals = [edge.perpendicular().normalize()];
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Axis-aligned bounding rectangle, translated by the shape position.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.vertices[0] + self.position,
            self.vertices[1] + self.position,
        )
    }
}
