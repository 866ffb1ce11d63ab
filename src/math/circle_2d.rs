use crate::geometry::Segment;

use super::Point2;

/// Converts `(x, y)` into `(radius, angle)` stored as a point.
#[must_use]
pub fn cartesian_to_polar(pt: &Point2) -> Point2 {
    Point2::new(pt.coords.norm(), pt.y.atan2(pt.x))
}

/// Converts `(radius, angle)` back into cartesian coordinates.
#[must_use]
pub fn polar_to_cartesian(pt: &Point2) -> Point2 {
    let (sin, cos) = pt.y.sin_cos();
    Point2::new(pt.x * cos, pt.x * sin)
}

/// Returns the two outer tangent segments of circles `(a, ra)` and `(b, rb)`.
///
/// `None` when one circle contains the other and no outer tangent exists.
#[must_use]
pub fn outer_tangents(a: &Point2, ra: f64, b: &Point2, rb: f64) -> Option<[Segment; 2]> {
    let delta = b - a;
    let dist = delta.norm();
    if dist <= (rb - ra).abs() {
        return None;
    }

    let base = delta.y.atan2(delta.x);
    let spread = ((ra - rb) / dist).acos();

    let tangent = |angle: f64| {
        let (sin, cos) = angle.sin_cos();
        Segment::new(
            Point2::new(a.x + ra * cos, a.y + ra * sin),
            Point2::new(b.x + rb * cos, b.y + rb * sin),
        )
    };

    Some([tangent(base + spread), tangent(base - spread)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polar_round_trip() {
        let pt = Point2::new(3.0, 4.0);
        let polar = cartesian_to_polar(&pt);
        assert_relative_eq!(polar.x, 5.0);
        let back = polar_to_cartesian(&polar);
        assert_relative_eq!(back.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(back.y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn equal_circles_have_parallel_tangents() {
        let [upper, lower] =
            outer_tangents(&Point2::new(0.0, 0.0), 1.0, &Point2::new(10.0, 0.0), 1.0).unwrap();
        assert_relative_eq!(upper.a.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(upper.b.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(lower.a.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(upper.length(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn nested_circles_have_no_tangent() {
        assert!(outer_tangents(&Point2::new(0.0, 0.0), 5.0, &Point2::new(1.0, 0.0), 1.0).is_none());
    }
}
