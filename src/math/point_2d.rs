//! Scalar and point helpers shared by every geometry operator.
//!
//! Equality is always tolerance based: coordinates are snapped to a fixed
//! grid of `POINT_PRECISION / scale` before comparison, so a larger `scale`
//! accepts points that are further apart.

use std::f64::consts::PI;

use super::{Point2, Vector2, POINT_PRECISION};

/// Returns `true` when both coordinates agree after rounding to
/// `1 / (POINT_PRECISION / scale)` units.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn points_equal(a: &Point2, b: &Point2, scale: f64) -> bool {
    let factor = POINT_PRECISION / scale;
    (a.x * factor).round() == (b.x * factor).round()
        && (a.y * factor).round() == (b.y * factor).round()
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Squared Euclidean distance between two points.
#[must_use]
pub fn distance_squared(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance_squared(a, b)
}

/// Linear interpolation between two scalars.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Linear interpolation between two points. `t` may leave `[0, 1]` to
/// extrapolate along the line.
#[must_use]
pub fn lerp_points(a: &Point2, b: &Point2, t: f64) -> Point2 {
    Point2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Direction angle of the vector `a -> b` in radians.
#[must_use]
pub fn angle_between(a: &Point2, b: &Point2) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Wraps an angle into `[-pi, pi]`.
#[must_use]
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= PI * 2.0;
    }
    while angle < -PI {
        angle += PI * 2.0;
    }
    angle
}

/// Rotates `pt` about the origin by `rad`.
///
/// Positive angles turn clockwise on screen (y axis pointing down).
#[must_use]
pub fn rotate_point(pt: &Point2, rad: f64) -> Point2 {
    let (sin, cos) = rad.sin_cos();
    Point2::new(sin * pt.y + cos * pt.x, cos * pt.y - sin * pt.x)
}

/// Rotates `pt` about the origin by `deg` degrees.
#[must_use]
pub fn rotate_point_deg(pt: &Point2, deg: f64) -> Point2 {
    rotate_point(pt, deg.to_radians())
}

/// Arithmetic mean of a point set, `None` when the set is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_points(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, pt| acc + pt.coords);
    Some(Point2::from(sum / points.len() as f64))
}

/// Dot product of two vectors.
#[must_use]
pub fn dot(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Z component of the cross product of two vectors.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Which side of the line `a -> b` the point lies on, rounded to two
/// decimals. Zero means collinear.
#[must_use]
pub fn line_side(pt: &Point2, a: &Point2, b: &Point2) -> f64 {
    let side = (b.x - a.x) * (pt.y - a.y) - (b.y - a.y) * (pt.x - a.x);
    (side * 100.0).round() / 100.0
}

/// Splits `a -> b` into `segments` equal parts, returning `segments + 1`
/// points including both ends.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn interpolate_points(a: &Point2, b: &Point2, segments: usize) -> Vec<Point2> {
    let segments = segments.max(1);
    let step = (b - a) / segments as f64;
    let mut points = Vec::with_capacity(segments + 1);
    points.push(*a);
    for i in 1..segments {
        points.push(a + step * i as f64);
    }
    points.push(*b);
    points
}

/// Subdivides `a -> b` into pieces no longer than roughly `delta`.
///
/// The step is stretched so the leftover distance is spread evenly across
/// all pieces; both endpoints are always included. A non-positive `delta`
/// or a span no longer than `delta` yields just `[a, b]`.
#[must_use]
pub fn subdivide_by_distance(a: &Point2, b: &Point2, delta: f64) -> Vec<Point2> {
    let dist = distance(a, b);
    if delta <= 0.0 || dist <= delta {
        return vec![*a, *b];
    }

    // Stretching the step by `remainder / pieces` makes every piece exactly
    // `dist / pieces` long.
    let pieces = (dist / delta).floor();
    let step = (b - a) / pieces;

    let mut points = vec![*a];
    let mut i = 1.0;
    while i < pieces {
        points.push(a + step * i);
        i += 1.0;
    }
    points.push(*b);
    points
}

/// Places points exactly `delta` apart starting at `a`. The final point
/// falls short of `b` unless the length is an exact multiple of `delta`.
#[must_use]
pub fn subdivide_by_distance_exact(a: &Point2, b: &Point2, delta: f64) -> Vec<Point2> {
    let dist = distance(a, b);
    if delta <= 0.0 || dist <= 0.0 {
        return vec![*a, *b];
    }

    let perc = delta / dist;
    let step = (b - a) * perc;
    let mut points = Vec::new();
    let mut travel = perc;
    let mut i = 0.0;
    while travel <= 1.0 {
        points.push(a + step * i);
        travel += perc;
        i += 1.0;
    }
    points
}

/// Drops every point equal to its predecessor at the given `scale`.
#[must_use]
pub fn remove_coincident_points(points: &[Point2], scale: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for (idx, pt) in points.iter().enumerate() {
        if idx == 0 || !points_equal(pt, &points[idx - 1], scale) {
            out.push(*pt);
        }
    }
    out
}

/// Subdivides the corner `a, b, c` into a softened curve.
///
/// Each iteration inserts one point between every pair, biased 60/40 toward
/// the corner on the first two fifths and 40/60 on the last two fifths.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn spline_points(a: &Point2, b: &Point2, c: &Point2, iterations: usize) -> Vec<Point2> {
    let mut points = vec![*a, *b, *c];
    for _ in 0..iterations {
        let len = points.len() as f64;
        let mut out = Vec::with_capacity(points.len() * 2);
        out.push(points[0]);
        for (i, pair) in points.windows(2).enumerate() {
            let next = (i + 1) as f64;
            let pt = if next < len * 0.4 {
                Point2::from(pair[0].coords * 0.4 + pair[1].coords * 0.6)
            } else if next > len * 0.6 {
                Point2::from(pair[0].coords * 0.6 + pair[1].coords * 0.4)
            } else {
                nalgebra::center(&pair[0], &pair[1])
            };
            out.push(pt);
        }
        out.push(points[points.len() - 1]);
        points = out;
    }
    points
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn points_equal_is_reflexive_and_symmetric() {
        let a = Point2::new(1.234_56, -7.5);
        let b = Point2::new(1.234_58, -7.500_01);
        assert!(points_equal(&a, &a, 1.0));
        assert_eq!(points_equal(&a, &b, 1.0), points_equal(&b, &a, 1.0));
    }

    #[test]
    fn larger_scale_loosens_equality() {
        let a = Point2::new(10.0, 10.0);
        let b = Point2::new(10.3, 10.0);
        assert!(!points_equal(&a, &b, 1.0));
        assert!(!points_equal(&a, &b, 10.0));
        assert!(points_equal(&a, &b, 10_000.0));

        // Anything equal at a fine scale stays equal at a coarser one.
        let c = Point2::new(10.000_04, 10.0);
        for scale in [1.0, 10.0, 100.0, 10_000.0] {
            assert!(points_equal(&a, &c, scale));
        }
    }

    #[test]
    fn rotate_quarter_turn() {
        let pt = rotate_point_deg(&Point2::new(0.0, 1.0), 90.0);
        assert_relative_eq!(pt.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pt.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_wraps_into_half_open_range() {
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-1.5 * PI), 0.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn average_of_empty_is_none() {
        assert!(average_points(&[]).is_none());
        let avg = average_points(&[Point2::new(0.0, 0.0), Point2::new(4.0, 2.0)]).unwrap();
        assert_relative_eq!(avg.x, 2.0);
        assert_relative_eq!(avg.y, 1.0);
    }

    #[test]
    fn subdivide_spreads_remainder() {
        let pts = subdivide_by_distance(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0), 3.0);
        // 10 / 3 fits three pieces, the leftover stretches each to 3.33.
        assert_eq!(pts.len(), 4);
        assert_relative_eq!(pts[1].x, 10.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(pts[3].x, 10.0);
    }

    #[test]
    fn subdivide_zero_delta_returns_endpoints() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(5.0, 5.0);
        assert_eq!(subdivide_by_distance(&a, &b, 0.0), vec![a, b]);
    }

    #[test]
    fn subdivide_exact_keeps_fixed_spacing() {
        let pts =
            subdivide_by_distance_exact(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0), 4.0);
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[1].x, 4.0);
    }

    #[test]
    fn interpolate_includes_both_ends() {
        let pts = interpolate_points(&Point2::new(0.0, 0.0), &Point2::new(0.0, 9.0), 3);
        assert_eq!(pts.len(), 4);
        assert_relative_eq!(pts[2].y, 6.0);
    }

    #[test]
    fn coincident_points_are_removed() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(0.000_01, 0.0),
            Point2::new(1.0, 0.0),
        ];
        assert_eq!(remove_coincident_points(&pts, 1.0).len(), 2);
    }

    #[test]
    fn line_side_sign() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert!(line_side(&Point2::new(5.0, 1.0), &a, &b) > 0.0);
        assert!(line_side(&Point2::new(5.0, -1.0), &a, &b) < 0.0);
        assert_relative_eq!(line_side(&Point2::new(5.0, 0.0), &a, &b), 0.0);
    }

    #[test]
    fn spline_grows_each_iteration() {
        let pts = spline_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(5.0, 5.0),
            &Point2::new(10.0, 0.0),
            2,
        );
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], Point2::new(0.0, 0.0));
        assert_eq!(pts[4], Point2::new(10.0, 0.0));
    }
}
