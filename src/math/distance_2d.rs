use crate::geometry::Segment;

use super::point_2d::distance;
use super::Point2;

/// Closest point to `pt` on the segment, clamped to its endpoints.
#[must_use]
pub fn closest_point_on_segment(pt: &Point2, seg: &Segment) -> Point2 {
    let ab = seg.b - seg.a;
    let t = (pt - seg.a).dot(&ab);
    if t < 0.0 {
        return seg.a;
    }
    let denom = ab.dot(&ab);
    if t >= denom {
        return seg.b;
    }
    seg.a + ab * (t / denom)
}

/// Closest point to `pt` over a set of segments, `None` for an empty set.
#[must_use]
pub fn closest_point_on_segments(pt: &Point2, segments: &[Segment]) -> Option<Point2> {
    segments
        .iter()
        .map(|seg| {
            let closest = closest_point_on_segment(pt, seg);
            (distance(pt, &closest), closest)
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, closest)| closest)
}

/// Minimum distance from `pt` to the segment.
#[must_use]
pub fn distance_point_segment(pt: &Point2, seg: &Segment) -> f64 {
    distance(pt, &closest_point_on_segment(pt, seg))
}
