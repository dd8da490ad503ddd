use crate::collision::bounds::Bounds;
use crate::math::vec2::Vec2;
use crate::shapes::ShapeError;

/// An ellipse described by its center and per-axis radii.
///
/// `radius` is the bounding-circle radius (the larger half-extent); the SAT
/// tests treat the ellipse as that circle for overlap and use `ratio` to
/// scale the containment checks for non-circular ellipses.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    /// Center of the ellipse, relative to the owning body.
    pub position: Vec2,
    radius: f64,
    radius_vector: Vec2,
    radius_sq: Vec2,
    ratio: f64,
}

impl Ellipse {
    /// Creates a new ellipse centered at `position` with the given full
    /// extents. Fails on non-positive extents.
    pub fn new(position: Vec2, width: f64, height: f64) -> Result<Self, ShapeError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ShapeError::InvalidDimensions { width, height });
        }
        let radius_vector = Vec2::new(width / 2.0, height / 2.0);
        Ok(Ellipse {
            position,
            radius: radius_vector.x.max(radius_vector.y),
            radius_vector,
            radius_sq: Vec2::new(
                radius_vector.x * radius_vector.x,
                radius_vector.y * radius_vector.y,
            ),
            ratio: radius_vector.x / radius_vector.y,
        })
    }

    /// Convenience constructor for a circle.
    pub fn circle(position: Vec2, radius: f64) -> Result<Self, ShapeError> {
        Ellipse::new(position, radius * 2.0, radius * 2.0)
    }

    /// Bounding-circle radius: the larger half-extent.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Per-axis half-extents.
    pub fn radius_vector(&self) -> Vec2 {
        self.radius_vector
    }

    /// x/y scale factor versus a circle; exactly 1.0 for circles.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Inscribed-circle radius: the bounding radius scaled down by the
    /// aspect ratio on the narrow axis.
    pub fn inner_radius(&self) -> f64 {
        self.radius * self.ratio.min(1.0 / self.ratio)
    }

    /// Quadratic-form containment test against the squared radii.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let d = point - self.position;
        d.x * d.x / self.radius_sq.x + d.y * d.y / self.radius_sq.y <= 1.0
    }

    /// Axis-aligned bounding rectangle, `position ± radius_vector`.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.position - self.radius_vector,
            max: self.position + self.radius_vector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_ellipse_new() {
        let e = Ellipse::new(Vec2::ZERO, 10.0, 4.0).unwrap();
        assert!((e.radius() - 5.0).abs() < EPSILON);
        assert_eq!(e.radius_vector(), Vec2::new(5.0, 2.0));
        assert!((e.ratio() - 2.5).abs() < EPSILON);
        assert!((e.inner_radius() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_ellipse_invalid_dimensions() {
        assert!(matches!(
            Ellipse::new(Vec2::ZERO, 0.0, 4.0),
            Err(ShapeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Ellipse::circle(Vec2::ZERO, -1.0),
            Err(ShapeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_circle_ratio_is_one() {
        let c = Ellipse::circle(Vec2::new(2.0, 2.0), 3.0).unwrap();
        assert!((c.ratio() - 1.0).abs() < EPSILON);
        assert!((c.radius() - 3.0).abs() < EPSILON);
        assert!((c.inner_radius() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_contains_point() {
        // Radius 5 circle at the origin
        let c = Ellipse::new(Vec2::ZERO, 10.0, 10.0).unwrap();
        assert!(c.contains_point(Vec2::new(3.0, 3.0))); // 18 < 25
        assert!(!c.contains_point(Vec2::new(8.0, 8.0))); // 128 > 25
        assert!(c.contains_point(Vec2::new(5.0, 0.0))); // on the rim
    }

    #[test]
    fn test_ellipse_contains_point_respects_axes() {
        let e = Ellipse::new(Vec2::ZERO, 10.0, 4.0).unwrap();
        assert!(e.contains_point(Vec2::new(4.0, 0.0)));
        assert!(!e.contains_point(Vec2::new(0.0, 4.0)));
        assert!(e.contains_point(Vec2::new(0.0, 1.5)));
    }

    #[test]
    fn test_ellipse_bounds() {
        let e = Ellipse::new(Vec2::new(10.0, 20.0), 6.0, 2.0).unwrap();
        let bounds = e.bounds();
        assert_eq!(bounds.min, Vec2::new(7.0, 19.0));
        assert_eq!(bounds.max, Vec2::new(13.0, 21.0));
    }
}
