//! Separating Axis Theorem tests for every shape pairing.
//!
//! Polygons, rectangles and lines all present a [`PolygonView`] and share the
//! projection-based test. Ellipses are treated as their bounding circle for
//! overlap and tested against polygons with Voronoi region classification.
//! Every test takes the two owning world positions plus the shapes and fills
//! a [`Response`] with the minimum translation data when the shapes overlap.
//!
//! Shapes that merely touch are reported as non-colliding; a zero-width
//! projection overlap is a separation.

use crate::collision::response::Response;
use crate::math::vec2::Vec2;
use crate::shapes::{Ellipse, PolygonView, Shape};

/// Projects `points` onto `axis`, returning the (min, max) scalar range.
fn flatten_points_on(points: &[Vec2], axis: Vec2) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &point in points {
        let dot = point.dot(axis);
        min = min.min(dot);
        max = max.max(dot);
    }
    (min, max)
}

/// Tests one candidate axis. Returns `true` when the projections are
/// disjoint, which proves the shapes do not overlap. Otherwise records the
/// signed overlap along the axis into `response` when it is the smallest
/// seen so far, and downgrades the containment flags.
fn is_separating_axis(
    pos_a: Vec2,
    a: &PolygonView<'_>,
    pos_b: Vec2,
    b: &PolygonView<'_>,
    axis: Vec2,
    response: &mut Response,
) -> bool {
    let offset = (pos_b + b.position) - (pos_a + a.position);
    let offset_dot = offset.dot(axis);

    let (min_a, max_a) = flatten_points_on(a.vertices, axis);
    let (min_b, max_b) = flatten_points_on(b.vertices, axis);
    let (min_b, max_b) = (min_b + offset_dot, max_b + offset_dot);

    if min_a >= max_b || min_b >= max_a {
        return true;
    }

    let overlap;
    if min_a < min_b {
        response.a_in_b = false;
        if max_a < max_b {
            overlap = max_a - min_b;
            response.b_in_a = false;
        } else {
            let option1 = max_a - min_b;
            let option2 = max_b - min_a;
            overlap = if option1 < option2 { option1 } else { -option2 };
        }
    } else {
        response.b_in_a = false;
        if max_a > max_b {
            overlap = min_a - max_b;
            response.a_in_b = false;
        } else {
            let option1 = max_a - min_b;
            let option2 = max_b - min_a;
            overlap = if option1 < option2 { option1 } else { -option2 };
        }
    }

    let abs_overlap = overlap.abs();
    if abs_overlap < response.overlap {
        response.overlap = abs_overlap;
        response.overlap_normal = if overlap < 0.0 { -axis } else { axis };
    }
    false
}

/// Full polygon versus polygon test over both shapes' edge normals.
///
/// On overlap, `response` holds the minimum translation: subtracting
/// `overlap_vector` from A's position separates the pair.
pub fn test_polygon_polygon(
    pos_a: Vec2,
    a: &PolygonView<'_>,
    pos_b: Vec2,
    b: &PolygonView<'_>,
    response: &mut Response,
) -> bool {
    for &axis in a.normals {
        if is_separating_axis(pos_a, a, pos_b, b, axis, response) {
            return false;
        }
    }
    for &axis in b.normals {
        if is_separating_axis(pos_a, a, pos_b, b, axis, response) {
            return false;
        }
    }
    response.overlap_vector = response.overlap_normal * response.overlap;
    true
}

/// Bounding-circle test between two ellipses.
///
/// The containment flags use the inscribed radii, so a flattened ellipse is
/// only reported as containing the other when the whole bounding circle fits
/// inside its narrow axis.
pub fn test_ellipse_ellipse(
    pos_a: Vec2,
    a: &Ellipse,
    pos_b: Vec2,
    b: &Ellipse,
    response: &mut Response,
) -> bool {
    let center_a = pos_a + a.position;
    let center_b = pos_b + b.position;
    let difference = center_b - center_a;
    let total_radius = a.radius() + b.radius();

    let distance_sq = difference.magnitude_squared();
    if distance_sq >= total_radius * total_radius {
        return false;
    }

    let distance = distance_sq.sqrt();
    response.overlap = total_radius - distance;
    response.overlap_normal = if distance > 0.0 {
        difference * (1.0 / distance)
    } else {
        // Coincident centers give no direction to separate along; push up.
        Vec2::new(0.0, -1.0)
    };
    response.overlap_vector = response.overlap_normal * response.overlap;
    response.a_in_b = distance + a.radius() <= b.inner_radius();
    response.b_in_a = distance + b.radius() <= a.inner_radius();
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Left,
    Middle,
    Right,
}

/// Classifies `point` against the Voronoi regions of `edge`, where both are
/// relative to the edge's starting vertex.
fn voronoi_region(edge: Vec2, point: Vec2) -> Region {
    let len_sq = edge.magnitude_squared();
    let dot = point.dot(edge);
    if dot < 0.0 {
        Region::Left
    } else if dot > len_sq {
        Region::Right
    } else {
        Region::Middle
    }
}

/// Polygon versus ellipse test.
///
/// Walks every polygon edge and classifies the ellipse center into the
/// edge's Voronoi regions. Vertex regions compare center distance against
/// the bounding radius; the middle region projects onto the outward edge
/// normal. A single-edge view (a line) owns both of its endpoint regions
/// outright since there is no neighbouring edge to defer to.
pub fn test_polygon_ellipse(
    pos_a: Vec2,
    a: &PolygonView<'_>,
    pos_b: Vec2,
    ellipse: &Ellipse,
    response: &mut Response,
) -> bool {
    let circle_pos = (pos_b + ellipse.position) - (pos_a + a.position);
    let radius = ellipse.radius();
    let vertex_count = a.vertices.len();
    let edge_count = a.edges.len();
    let single_edge = edge_count == 1;

    // The polygon fits inside the ellipse only when every vertex is within
    // the inscribed circle.
    let inner_sq = ellipse.inner_radius() * ellipse.inner_radius();
    for &vertex in a.vertices {
        if (circle_pos - vertex).magnitude_squared() > inner_sq {
            response.a_in_b = false;
            break;
        }
    }

    for i in 0..edge_count {
        let next = if i + 1 == vertex_count { 0 } else { i + 1 };
        let prev = if i == 0 { edge_count - 1 } else { i - 1 };

        let edge = a.edges[i];
        let point = circle_pos - a.vertices[i];

        let mut axis_overlap: Option<(f64, Vec2)> = None;
        match voronoi_region(edge, point) {
            Region::Left => {
                // The starting vertex owns this region only when the center
                // also sits right of the previous edge.
                let owned = single_edge
                    || voronoi_region(a.edges[prev], circle_pos - a.vertices[prev])
                        == Region::Right;
                if owned {
                    let distance = point.magnitude();
                    if distance >= radius {
                        return false;
                    }
                    response.b_in_a = false;
                    axis_overlap = Some((radius - distance, point.normalize()));
                }
            }
            Region::Right => {
                let point_next = circle_pos - a.vertices[next];
                let owned = single_edge
                    || voronoi_region(a.edges[next % edge_count], point_next) == Region::Left;
                if owned {
                    let distance = point_next.magnitude();
                    if distance >= radius {
                        return false;
                    }
                    response.b_in_a = false;
                    axis_overlap = Some((radius - distance, point_next.normalize()));
                }
            }
            Region::Middle => {
                let normal = a.normals[i];
                let distance = point.dot(normal);
                if distance >= radius {
                    return false;
                }
                let overlap = radius - distance;
                if distance >= 0.0 || overlap < 2.0 * radius {
                    response.b_in_a = false;
                }
                axis_overlap = Some((overlap, normal));
            }
        }

        if let Some((overlap, normal)) = axis_overlap {
            if overlap.abs() < response.overlap {
                response.overlap = overlap.abs();
                response.overlap_normal = normal;
            }
        }
    }

    response.overlap_vector = response.overlap_normal * response.overlap;
    true
}

/// Ellipse versus polygon: the mirrored test with the translation data
/// flipped back into A's frame.
pub fn test_ellipse_polygon(
    pos_a: Vec2,
    ellipse: &Ellipse,
    pos_b: Vec2,
    b: &PolygonView<'_>,
    response: &mut Response,
) -> bool {
    let hit = test_polygon_ellipse(pos_b, b, pos_a, ellipse, response);
    if hit {
        response.overlap_normal = -response.overlap_normal;
        response.overlap_vector = -response.overlap_vector;
        std::mem::swap(&mut response.a_in_b, &mut response.b_in_a);
    }
    hit
}

/// Dispatches the pair to the matching SAT test.
///
/// `response` must be freshly cleared; the chosen test fills it only when
/// the shapes overlap.
pub fn test_shapes(
    pos_a: Vec2,
    a: &Shape,
    pos_b: Vec2,
    b: &Shape,
    response: &mut Response,
) -> bool {
    match (a, b) {
        (Shape::Ellipse(ellipse_a), Shape::Ellipse(ellipse_b)) => {
            test_ellipse_ellipse(pos_a, ellipse_a, pos_b, ellipse_b, response)
        }
        (Shape::Ellipse(ellipse_a), other) => match other.as_polygon_view() {
            Some(view_b) => test_ellipse_polygon(pos_a, ellipse_a, pos_b, &view_b, response),
            None => false,
        },
        (other, Shape::Ellipse(ellipse_b)) => match other.as_polygon_view() {
            Some(view_a) => test_polygon_ellipse(pos_a, &view_a, pos_b, ellipse_b, response),
            None => false,
        },
        (shape_a, shape_b) => match (shape_a.as_polygon_view(), shape_b.as_polygon_view()) {
            (Some(view_a), Some(view_b)) => {
                test_polygon_polygon(pos_a, &view_a, pos_b, &view_b, response)
            }
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Polygon, Rect};

    const EPSILON: f64 = 1e-9;

    fn rect_shape(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Rect::new(Vec2::new(x, y), w, h).unwrap().into()
    }

    fn circle_shape(x: f64, y: f64, r: f64) -> Shape {
        Ellipse::circle(Vec2::new(x, y), r).unwrap().into()
    }

    #[test]
    fn test_separated_rects_do_not_collide() {
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(20.0, 0.0, 10.0, 10.0);
        let mut response = Response::new(0, 1);
        assert!(!test_shapes(Vec2::ZERO, &a, Vec2::ZERO, &b, &mut response));
        assert_eq!(response.overlap, f64::INFINITY);
    }

    #[test]
    fn test_touching_rects_do_not_collide() {
        // Shared edge at x = 10, zero-width overlap.
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(10.0, 0.0, 10.0, 10.0);
        let mut response = Response::new(0, 1);
        assert!(!test_shapes(Vec2::ZERO, &a, Vec2::ZERO, &b, &mut response));
    }

    #[test]
    fn test_overlapping_rects_minimal_axis() {
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(8.0, 0.0, 10.0, 10.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(Vec2::ZERO, &a, Vec2::ZERO, &b, &mut response));
        assert!((response.overlap - 2.0).abs() < EPSILON);
        assert_eq!(response.overlap_normal, Vec2::new(1.0, 0.0));
        assert_eq!(response.overlap_vector, Vec2::new(2.0, 0.0));
        assert!(!response.a_in_b);
        assert!(!response.b_in_a);
    }

    #[test]
    fn test_subtracting_overlap_vector_separates() {
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(8.0, 0.0, 10.0, 10.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(Vec2::ZERO, &a, Vec2::ZERO, &b, &mut response));

        // One positional correction resolves the pair completely
        let corrected = Vec2::ZERO - response.overlap_vector;
        response.clear();
        assert!(!test_shapes(corrected, &a, Vec2::ZERO, &b, &mut response));
    }

    #[test]
    fn test_polygon_test_is_symmetric() {
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(8.0, 0.0, 10.0, 10.0);

        let mut forward = Response::new(0, 1);
        let mut reverse = Response::new(1, 0);
        assert!(test_shapes(Vec2::ZERO, &a, Vec2::ZERO, &b, &mut forward));
        assert!(test_shapes(Vec2::ZERO, &b, Vec2::ZERO, &a, &mut reverse));

        assert!((forward.overlap - reverse.overlap).abs() < EPSILON);
        assert_eq!(forward.overlap_vector, -reverse.overlap_vector);
    }

    #[test]
    fn test_rect_inside_rect_sets_containment() {
        let inner = rect_shape(2.0, 2.0, 2.0, 2.0);
        let outer = rect_shape(0.0, 0.0, 10.0, 10.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &inner,
            Vec2::ZERO,
            &outer,
            &mut response
        ));
        assert!(response.a_in_b);
        assert!(!response.b_in_a);
        assert!((response.overlap - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_body_positions_offset_the_shapes() {
        // Same local shapes, separated purely by body position.
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(0.0, 0.0, 10.0, 10.0);
        let mut response = Response::new(0, 1);
        assert!(!test_shapes(
            Vec2::ZERO,
            &a,
            Vec2::new(30.0, 0.0),
            &b,
            &mut response
        ));
        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &a,
            Vec2::new(8.0, 0.0),
            &b,
            &mut response
        ));
        assert!((response.overlap - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_circle_overlap() {
        let a = Ellipse::circle(Vec2::ZERO, 5.0).unwrap();
        let b = Ellipse::circle(Vec2::ZERO, 5.0).unwrap();
        let mut response = Response::new(0, 1);
        assert!(test_ellipse_ellipse(
            Vec2::ZERO,
            &a,
            Vec2::new(8.0, 0.0),
            &b,
            &mut response
        ));
        assert!((response.overlap - 2.0).abs() < EPSILON);
        assert_eq!(response.overlap_normal, Vec2::new(1.0, 0.0));
        assert_eq!(response.overlap_vector, Vec2::new(2.0, 0.0));
        assert!(!response.a_in_b);
        assert!(!response.b_in_a);
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        let a = Ellipse::circle(Vec2::ZERO, 5.0).unwrap();
        let b = Ellipse::circle(Vec2::ZERO, 5.0).unwrap();
        let mut response = Response::new(0, 1);
        assert!(!test_ellipse_ellipse(
            Vec2::ZERO,
            &a,
            Vec2::new(10.0, 0.0),
            &b,
            &mut response
        ));
    }

    #[test]
    fn test_concentric_circles_containment() {
        let big = Ellipse::circle(Vec2::ZERO, 5.0).unwrap();
        let small = Ellipse::circle(Vec2::ZERO, 2.0).unwrap();
        let mut response = Response::new(0, 1);
        assert!(test_ellipse_ellipse(
            Vec2::ZERO,
            &big,
            Vec2::ZERO,
            &small,
            &mut response
        ));
        assert!(!response.a_in_b);
        assert!(response.b_in_a);
        // No direction between coincident centers; fallback pushes up.
        assert_eq!(response.overlap_normal, Vec2::new(0.0, -1.0));
        assert!((response.overlap - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_flat_ellipse_containment_uses_inscribed_radius() {
        // Bounding circles coincide, but the flat ellipse only spans 4 on y.
        // It fits inside the circle while the circle pokes out of it.
        let circle = Ellipse::circle(Vec2::ZERO, 5.0).unwrap();
        let flat = Ellipse::new(Vec2::ZERO, 10.0, 4.0).unwrap();
        let mut response = Response::new(0, 1);
        assert!(test_ellipse_ellipse(
            Vec2::ZERO,
            &circle,
            Vec2::ZERO,
            &flat,
            &mut response
        ));
        assert!(!response.a_in_b);
        assert!(response.b_in_a);
    }

    #[test]
    fn test_circle_against_rect_edge() {
        // Circle centered above the top edge, reaching 1 unit past it.
        let rect = rect_shape(0.0, 0.0, 10.0, 10.0);
        let circle = circle_shape(5.0, -3.0, 4.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &rect,
            Vec2::ZERO,
            &circle,
            &mut response
        ));
        assert!((response.overlap - 1.0).abs() < EPSILON);
        assert_eq!(response.overlap_normal, Vec2::new(0.0, -1.0));
        assert_eq!(response.overlap_vector, Vec2::new(0.0, -1.0));
        assert!(!response.b_in_a);
    }

    #[test]
    fn test_circle_against_rect_corner() {
        // Center at (13, -4): 3 right and 4 up from the (10, 0) corner,
        // distance 5 with radius 6 leaves a 1 unit overlap along (0.6, -0.8).
        let rect = rect_shape(0.0, 0.0, 10.0, 10.0);
        let circle = circle_shape(13.0, -4.0, 6.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &rect,
            Vec2::ZERO,
            &circle,
            &mut response
        ));
        assert!((response.overlap - 1.0).abs() < EPSILON);
        assert!((response.overlap_normal.x - 0.6).abs() < EPSILON);
        assert!((response.overlap_normal.y + 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_circle_outside_rect_corner() {
        // Same corner, radius 5: exactly touching, which is a separation.
        let rect = rect_shape(0.0, 0.0, 10.0, 10.0);
        let circle = circle_shape(13.0, -4.0, 5.0);
        let mut response = Response::new(0, 1);
        assert!(!test_shapes(
            Vec2::ZERO,
            &rect,
            Vec2::ZERO,
            &circle,
            &mut response
        ));
    }

    #[test]
    fn test_ellipse_against_rect_flips_translation() {
        let rect = rect_shape(0.0, 0.0, 10.0, 10.0);
        let circle = circle_shape(5.0, -3.0, 4.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &circle,
            Vec2::ZERO,
            &rect,
            &mut response
        ));
        assert!((response.overlap - 1.0).abs() < EPSILON);
        assert_eq!(response.overlap_normal, Vec2::new(0.0, 1.0));
        assert_eq!(response.overlap_vector, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_line_against_circle() {
        let line: Shape = Line::new(Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 0.0)).into();

        // Circle above the segment interior, middle region of its one edge.
        let circle = circle_shape(5.0, -3.0, 4.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &line,
            Vec2::ZERO,
            &circle,
            &mut response
        ));
        assert!((response.overlap - 1.0).abs() < EPSILON);
        assert_eq!(response.overlap_normal, Vec2::new(0.0, -1.0));

        // Circle past the far endpoint and out of reach.
        let far = circle_shape(15.0, 0.0, 4.0);
        let mut response = Response::new(0, 1);
        assert!(!test_shapes(
            Vec2::ZERO,
            &line,
            Vec2::ZERO,
            &far,
            &mut response
        ));

        // Circle past the far endpoint but close enough to clip it.
        let near = circle_shape(13.0, 0.0, 4.0);
        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &line,
            Vec2::ZERO,
            &near,
            &mut response
        ));
        assert!((response.overlap - 1.0).abs() < EPSILON);
        assert_eq!(response.overlap_normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_line_against_polygon() {
        let line: Shape = Line::new(Vec2::ZERO, Vec2::new(0.0, 5.0), Vec2::new(20.0, 5.0)).into();
        let triangle: Shape = Polygon::new(
            Vec2::ZERO,
            vec![Vec2::new(5.0, 0.0), Vec2::new(10.0, 8.0), Vec2::new(0.0, 8.0)],
        )
        .unwrap()
        .into();

        let mut response = Response::new(0, 1);
        assert!(test_shapes(
            Vec2::ZERO,
            &line,
            Vec2::ZERO,
            &triangle,
            &mut response
        ));
        assert!(response.overlap > 0.0);
        assert!(!response.a_in_b);
    }
}
