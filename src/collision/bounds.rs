// Axis-aligned bounding rectangle used by the broad phase and shape layer

use crate::math::vec2::Vec2;

/// An axis-aligned rectangle defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Creates a new Bounds.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        // Ensure min coordinates are <= max coordinates
        Bounds {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Creates a Bounds from a top-left corner and extents.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Bounds::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Checks if this Bounds overlaps with another Bounds.
    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }

    /// Checks if `other` lies entirely within this Bounds.
    pub fn contains(&self, other: &Bounds) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Merges another Bounds into this one, expanding this Bounds to contain both.
    pub fn merge(&mut self, other: &Bounds) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
    }

    /// Returns this Bounds shifted by an offset.
    pub fn translated(&self, offset: Vec2) -> Self {
        Bounds {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Creates a Bounds that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_pt = points[0];
        let mut max_pt = points[0];
        for point in points.iter().skip(1) {
            min_pt.x = min_pt.x.min(point.x);
            min_pt.y = min_pt.y.min(point.y);
            max_pt.x = max_pt.x.max(point.x);
            max_pt.y = max_pt.y.max(point.y);
        }
        Some(Bounds::new(min_pt, max_pt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corners() {
        let b = Bounds::new(Vec2::new(5.0, 1.0), Vec2::new(-1.0, 4.0));
        assert_eq!(b.min, Vec2::new(-1.0, 1.0));
        assert_eq!(b.max, Vec2::new(5.0, 4.0));
    }

    #[test]
    fn test_from_rect_and_extents() {
        let b = Bounds::from_rect(2.0, 3.0, 4.0, 5.0);
        assert_eq!(b.min, Vec2::new(2.0, 3.0));
        assert_eq!(b.max, Vec2::new(6.0, 8.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 5.0);
        assert_eq!(b.center(), Vec2::new(4.0, 5.5));
    }

    #[test]
    fn test_overlaps() {
        let a = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::from_rect(5.0, 5.0, 10.0, 10.0);
        let c = Bounds::from_rect(20.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        // Sharing an edge is not an overlap
        let d = Bounds::from_rect(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_contains() {
        let outer = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        let inner = Bounds::from_rect(2.0, 2.0, 3.0, 3.0);
        let straddling = Bounds::from_rect(8.0, 8.0, 5.0, 5.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&straddling));
        // A Bounds contains itself
        assert!(outer.contains(&outer));
    }

    #[test]
    fn test_merge() {
        let mut a = Bounds::from_rect(0.0, 0.0, 5.0, 5.0);
        let b = Bounds::from_rect(3.0, -2.0, 5.0, 5.0);
        a.merge(&b);
        assert_eq!(a.min, Vec2::new(0.0, -2.0));
        assert_eq!(a.max, Vec2::new(8.0, 5.0));
    }

    #[test]
    fn test_translated() {
        let b = Bounds::from_rect(1.0, 1.0, 2.0, 2.0).translated(Vec2::new(10.0, -1.0));
        assert_eq!(b.min, Vec2::new(11.0, 0.0));
        assert_eq!(b.max, Vec2::new(13.0, 2.0));
    }

    #[test]
    fn test_from_points() {
        assert_eq!(Bounds::from_points(&[]), None);
        let pts = [
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, -1.0),
        ];
        let b = Bounds::from_points(&pts).unwrap();
        assert_eq!(b.min, Vec2::new(-2.0, -1.0));
        assert_eq!(b.max, Vec2::new(4.0, 5.0));
    }
}
