use crate::collision::bounds::Bounds;
use crate::math::vec2::Vec2;
use crate::shapes::ShapeError;

/// An axis-aligned rectangle, stored as a specialized 4-corner polygon.
///
/// The corner points, edges and normals are precomputed from the extents, so
/// the SAT tests can treat a Rect exactly like a [`Polygon`](super::Polygon).
/// Its bounding box is the shape itself, which spares the vertex scan the
/// general polygon needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    /// Top-left corner, relative to the owning body.
    pub position: Vec2,
    width: f64,
    height: f64,
    vertices: [Vec2; 4],
    edges: [Vec2; 4],
    normals: [Vec2; 4],
}

impl Rect {
    /// Creates a new rectangle. Fails on non-positive extents.
    pub fn new(position: Vec2, width: f64, height: f64) -> Result<Self, ShapeError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ShapeError::InvalidDimensions { width, height });
        }
        let mut rect = Rect {
            position,
            width,
            height,
            vertices: [Vec2::ZERO; 4],
            edges: [Vec2::ZERO; 4],
            normals: [Vec2::ZERO; 4],
        };
        rect.recalc();
        Ok(rect)
    }

    // Corner order TL, TR, BR, BL: clockwise in screen coordinates.
    fn recalc(&mut self) {
        let (w, h) = (self.width, self.height);
        self.vertices = [
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ];
        for i in 0..4 {
            let edge = self.vertices[(i + 1) % 4] - self.vertices[i];
            self.edges[i] = edge;
            self.normals[i] = edge.perpendicular().normalize();
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Changes the extents and recomputes the corner points.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ShapeError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ShapeError::InvalidDimensions { width, height });
        }
        self.width = width;
        self.height = height;
        self.recalc();
        Ok(())
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

    /// Checks whether a point lies inside the rectangle, edges included.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.height
    }

    /// The rectangle is its own bounding box.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.position,
            max: self.position + Vec2::new(self.width, self.height),
        }
    }
}
