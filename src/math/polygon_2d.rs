use std::f64::consts::PI;

use crate::geometry::{BoundingBox, Segment};

use super::distance_2d::distance_point_segment;
use super::intersect_2d::segment_segments_intersections;
use super::point_2d::{lerp_points, points_equal};
use super::Point2;

/// Signed shoelace area of a closed polygon.
///
/// Positive area means clockwise in screen space (y axis pointing down).
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    let Some(mut prev) = points.last() else {
        return 0.0;
    };
    let mut area = 0.0;
    for pt in points {
        area += pt.x * prev.y - prev.x * pt.y;
        prev = pt;
    }
    area * 0.5
}

/// Winding test derived from [`polygon_area`].
#[must_use]
pub fn polygon_is_clockwise(points: &[Point2]) -> bool {
    polygon_area(points) > 0.0
}

/// Outcome of a point-in-polygon query, including how many rays it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Containment {
    pub inside: bool,
    /// `0` when the bounding box rejected the point outright.
    pub rays_cast: u8,
}

/// Ray-casting point-in-polygon test that reports how it decided.
///
/// Points outside the polygon's bounding box are rejected without casting.
/// Otherwise a ray is cast from far beyond the top-left corner; an odd
/// crossing count is double-checked with a ray from the opposite corner,
/// since a ray grazing a vertex or running along an edge miscounts. If the
/// second count is still odd and `ignore_touching` is set, a point lying on
/// the boundary itself counts as outside.
#[must_use]
pub fn point_in_polygon_test(pt: &Point2, polygon: &[Segment], ignore_touching: bool) -> Containment {
    let bb = BoundingBox::from_segments(polygon);
    if !bb.contains_point(pt) {
        return Containment {
            inside: false,
            rays_cast: 0,
        };
    }

    let mut rays_cast = 1;
    let start = Point2::new(bb.min_x - PI * 72.0, bb.min_y - PI * 100.0);
    let mut hits = segment_segments_intersections(&Segment::new(start, *pt), polygon, false, false);

    if hits.len() % 2 == 1 {
        rays_cast = 2;
        let start = Point2::new(bb.max_x + PI * 100.0, bb.max_y + PI * 72.0);
        hits = segment_segments_intersections(&Segment::new(start, *pt), polygon, false, false);
    }

    let odd = hits.len() % 2 == 1;
    if odd && ignore_touching && points_equal(pt, &hits[0].point, 1.0) {
        return Containment {
            inside: false,
            rays_cast,
        };
    }

    Containment {
        inside: odd,
        rays_cast,
    }
}

/// `true` when `pt` lies inside the closed polygon given as segments.
///
/// With `ignore_touching`, points on the boundary are reported outside.
#[must_use]
pub fn point_within_polygon(pt: &Point2, polygon: &[Segment], ignore_touching: bool) -> bool {
    point_in_polygon_test(pt, polygon, ignore_touching).inside
}

/// `true` when the segment lies inside the polygon: both ends strictly
/// inside, or one inside and the other on the boundary.
///
/// A `scale` other than `1` first shrinks the segment symmetrically about
/// its midpoint (`1.01` trims one percent off each end), which keeps
/// segments that merely share an endpoint with the boundary from being
/// misread.
#[must_use]
pub fn segment_within_polygon(seg: &Segment, polygon: &[Segment], scale: f64) -> bool {
    let (a, b) = if (scale - 1.0).abs() > f64::EPSILON {
        (
            lerp_points(&seg.a, &seg.b, scale - 1.0),
            lerp_points(&seg.a, &seg.b, 2.0 - scale),
        )
    } else {
        (seg.a, seg.b)
    };

    let a_touching = point_within_polygon(&a, polygon, false);
    let b_touching = point_within_polygon(&b, polygon, false);
    let a_within = point_within_polygon(&a, polygon, true);
    let b_within = point_within_polygon(&b, polygon, true);
    (a_within && b_within) || (a_within && b_touching) || (b_within && a_touching)
}

/// Loose polygon-in-polygon test: every edge of `inner` must cross the
/// boundary of `outer` an odd number of times.
#[must_use]
pub fn polygon_within_polygon(inner: &[Segment], outer: &[Segment]) -> bool {
    let inner_bb = BoundingBox::from_segments(inner);
    let outer_bb = BoundingBox::from_segments(outer);
    if !inner_bb.intersects(&outer_bb) {
        return false;
    }
    inner
        .iter()
        .all(|seg| segment_segments_intersections(seg, outer, false, false).len() % 2 == 1)
}

fn sign(p1: &Point2, p2: &Point2, p3: &Point2) -> f64 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

/// Same-side test against the triangle `v1, v2, v3`.
///
/// With `ignore_touching`, points within one unit of an edge are reported
/// outside.
#[must_use]
pub fn point_within_triangle(
    pt: &Point2,
    v1: &Point2,
    v2: &Point2,
    v3: &Point2,
    ignore_touching: bool,
) -> bool {
    let d1 = sign(pt, v1, v2);
    let d2 = sign(pt, v2, v3);
    let d3 = sign(pt, v3, v1);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    let inside = !(has_neg && has_pos);

    if inside && ignore_touching {
        let near_edge = [(v1, v2), (v2, v3), (v3, v1)]
            .into_iter()
            .any(|(a, b)| distance_point_segment(pt, &Segment::new(*a, *b)) < 1.0);
        if near_edge {
            return false;
        }
    }

    inside
}

/// `true` when the segment lies within the triangle, allowing either or
/// both ends to touch its edges.
#[must_use]
pub fn segment_within_triangle(seg: &Segment, v1: &Point2, v2: &Point2, v3: &Point2) -> bool {
    let a_touching = point_within_triangle(&seg.a, v1, v2, v3, false);
    let b_touching = point_within_triangle(&seg.b, v1, v2, v3, false);
    let a_within = point_within_triangle(&seg.a, v1, v2, v3, true);
    let b_within = point_within_triangle(&seg.b, v1, v2, v3, true);
    (a_within && b_within)
        || (a_within && b_touching)
        || (b_within && a_touching)
        || (a_touching && b_touching)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::points_to_closed_segments;
    use crate::math::point_2d::average_points;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    fn pentagon() -> Vec<Point2> {
        (0..5)
            .map(|i| {
                let ang = f64::from(i) * 2.0 * PI / 5.0;
                Point2::new(50.0 + 20.0 * ang.cos(), 50.0 + 20.0 * ang.sin())
            })
            .collect()
    }

    #[test]
    fn area_sign_matches_clockwise() {
        let pts = square(10.0);
        let area = polygon_area(&pts);
        assert_relative_eq!(area.abs(), 100.0);
        assert_eq!(polygon_is_clockwise(&pts), area > 0.0);

        let reversed: Vec<Point2> = pts.iter().rev().copied().collect();
        assert_relative_eq!(polygon_area(&reversed), -area);
        assert_ne!(polygon_is_clockwise(&pts), polygon_is_clockwise(&reversed));
    }

    #[test]
    fn winding_survives_start_rotation() {
        let pts = pentagon();
        let expected = polygon_is_clockwise(&pts);
        for shift in 0..pts.len() {
            let mut rotated = pts.clone();
            rotated.rotate_left(shift);
            assert_eq!(polygon_is_clockwise(&rotated), expected);
            assert_relative_eq!(polygon_area(&rotated), polygon_area(&pts), epsilon = 1e-9);
        }
    }

    #[test]
    fn pentagon_centroid_is_inside() {
        let pts = pentagon();
        let poly = points_to_closed_segments(&pts);
        let centroid = average_points(&pts).unwrap();
        let result = point_in_polygon_test(&centroid, &poly, false);
        assert!(result.inside);
        assert!(result.rays_cast >= 1);
    }

    #[test]
    fn far_point_is_rejected_by_bounds() {
        let pts = pentagon();
        let poly = points_to_closed_segments(&pts);
        let bb = BoundingBox::from_points(&pts);
        let diagonal = (bb.width().powi(2) + bb.height().powi(2)).sqrt();
        let far = Point2::new(bb.max_x + diagonal * 10.0, bb.max_y + diagonal * 10.0);
        let result = point_in_polygon_test(&far, &poly, false);
        assert!(!result.inside);
        assert_eq!(result.rays_cast, 0);
    }

    #[test]
    fn point_outside_concave_notch() {
        // U shape opening upward.
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 30.0),
            Point2::new(20.0, 30.0),
            Point2::new(20.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 30.0),
            Point2::new(0.0, 30.0),
        ];
        let poly = points_to_closed_segments(&pts);
        assert!(!point_within_polygon(&Point2::new(15.0, 20.0), &poly, false));
        assert!(point_within_polygon(&Point2::new(5.0, 20.0), &poly, false));
    }

    #[test]
    fn segment_containment_with_shrink() {
        let poly = points_to_closed_segments(&square(10.0));
        let inner = Segment::new(Point2::new(2.0, 2.0), Point2::new(8.0, 8.0));
        let outer = Segment::new(Point2::new(12.0, 2.0), Point2::new(18.0, 8.0));
        let edge_to_inside = Segment::new(Point2::new(0.0, 5.0), Point2::new(5.0, 5.0));
        assert!(segment_within_polygon(&inner, &poly, 1.0));
        assert!(!segment_within_polygon(&outer, &poly, 1.0));
        assert!(segment_within_polygon(&edge_to_inside, &poly, 1.01));
    }

    #[test]
    fn triangle_containment() {
        let v1 = Point2::new(0.0, 0.0);
        let v2 = Point2::new(20.0, 0.0);
        let v3 = Point2::new(0.0, 20.0);
        assert!(point_within_triangle(&Point2::new(5.0, 5.0), &v1, &v2, &v3, true));
        assert!(point_within_triangle(&Point2::new(0.5, 5.0), &v1, &v2, &v3, false));
        assert!(!point_within_triangle(&Point2::new(0.5, 5.0), &v1, &v2, &v3, true));
        assert!(!point_within_triangle(&Point2::new(15.0, 15.0), &v1, &v2, &v3, false));

        let seg = Segment::new(Point2::new(0.0, 5.0), Point2::new(5.0, 5.0));
        assert!(segment_within_triangle(&seg, &v1, &v2, &v3));
    }
}
