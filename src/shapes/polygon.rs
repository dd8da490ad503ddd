use crate::collision::bounds::Bounds;
use crate::math::vec2::Vec2;
use crate::shapes::ShapeError;

/// A convex polygon defined by its vertices in local space.
/// Vertices must be wound clockwise (screen coordinates, y down) and are
/// stored relative to `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Local origin of the shape, relative to the owning body.
    pub position: Vec2,
    /// Vertex list. After mutating it, call [`Polygon::recalc`] or subsequent
    /// tests will use stale edges and normals.
    pub vertices: Vec<Vec2>,
    edges: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a new polygon from a vector of vertices.
    ///
    /// Fails if fewer than 3 vertices are provided.
    pub fn new(position: Vec2, vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        let mut polygon = Polygon {
            position,
            vertices,
            edges: Vec::new(),
            normals: Vec::new(),
        };
        polygon.recalc()?;
        Ok(polygon)
    }

    /// Recomputes `edges` and `normals` from the current vertices.
    /// Must be invoked after every manual mutation of the vertex list.
    pub fn recalc(&mut self) -> Result<(), ShapeError> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(ShapeError::TooFewVertices(n));
        }
        self.edges.clear();
        self.normals.clear();
        for i in 0..n {
            let edge = self.vertices[(i + 1) % n] - self.vertices[i];
            self.edges.push(edge);
            self.normals.push(edge.perpendicular().normalize());
        }
        Ok(())
    }

    /// Edge vectors, `edges[i] = vertices[(i + 1) % n] - vertices[i]`.
    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    /// Outward unit normals, one per edge.
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Checks whether a point (in the same space as `position`) lies inside
    /// the polygon, using an even-odd ray cast over the edges.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let p = point - self.position;
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y)
                && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Axis-aligned bounding rectangle, translated by the shape position.
    pub fn bounds(&self) -> Bounds {
        // new()/recalc() guarantee at least 3 vertices
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for v in self.vertices.iter().skip(1) {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Bounds::new(min + self.position, max + self.position)
    }
}
