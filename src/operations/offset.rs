//! Parallel offsets of segment runs.

use std::f64::consts::PI;

use crate::geometry::Segment;
use crate::math::intersect_2d::segment_segment_intersect;
use crate::math::point_2d::{lerp_points, normalize_angle, rotate_point};
use crate::math::{Point2, EPSILON};

/// Largest heading change, in radians, an offset segment may show before it
/// counts as flipped.
const HEADING_TOLERANCE: f64 = 0.005;

/// Shifts `seg` sideways by `dist`, stretching both ends by `2 * dist` so
/// neighbors still overlap at corners. `pin_a` and `pin_b` keep an end at
/// its original position along the segment.
fn shifted(seg: &Segment, dist: f64, pin_a: bool, pin_b: bool) -> Segment {
    let len = seg.length();
    let side = rotate_point(&Point2::new(dist, 0.0), PI * 0.5 - seg.angle()).coords;
    let stretch = -dist / len * 2.0;
    let a = if pin_a { seg.a } else { lerp_points(&seg.a, &seg.b, stretch) };
    let b = if pin_b { seg.b } else { lerp_points(&seg.b, &seg.a, stretch) };
    Segment {
        a: a + side,
        b: b + side,
        tags: seg.tags.clone(),
    }
}

/// Offsets each segment by `dist` to its right (in y-up terms) and trims
/// neighbors against each other at the corners.
///
/// Closed runs wrap around; open runs keep their first start and last end
/// and do not join the last segment back to the first. A segment whose
/// offset flips direction, as happens on tight inner corners, is dropped.
#[must_use]
pub fn offset_segments(segments: &[Segment], dist: f64, is_open: bool) -> Vec<Segment> {
    let n = segments.len();
    let mut out = Vec::with_capacity(n);
    let mut flipped = 0usize;
    for (idx, seg) in segments.iter().enumerate() {
        if seg.length() <= EPSILON {
            continue;
        }
        let prev = if idx > 0 {
            Some(&segments[idx - 1])
        } else if is_open {
            None
        } else {
            segments.last()
        };
        let next = if idx + 1 < n {
            Some(&segments[idx + 1])
        } else if is_open {
            None
        } else {
            segments.first()
        };

        let mut this = shifted(seg, dist, is_open && idx == 0, is_open && idx == n - 1);
        let start = prev.and_then(|p| segment_segment_intersect(&shifted(p, dist, false, false), &this, false));
        let end = next.and_then(|q| segment_segment_intersect(&this, &shifted(q, dist, false, false), false));
        if let Some(hit) = start {
            this.a = hit.point;
        }
        if let Some(hit) = end {
            this.b = hit.point;
        }

        if normalize_angle(this.angle() - seg.angle()).abs() < HEADING_TOLERANCE {
            out.push(this);
        } else {
            flipped += 1;
        }
    }
    if flipped > 0 {
        tracing::debug!(flipped, kept = out.len(), "offset dropped flipped segments");
    }
    out
}

/// Offsets an open polyline. A negative `dist` offsets to the other side
/// by walking the points in reverse.
#[must_use]
pub fn offset_points(points: &[Point2], dist: f64) -> Vec<Point2> {
    let mut points = points.to_vec();
    let dist = if dist < 0.0 {
        points.reverse();
        -dist
    } else {
        dist
    };
    let segments: Vec<Segment> = points
        .windows(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .collect();

    let offset = offset_segments(&segments, dist, true);
    let Some(first) = offset.first() else {
        return Vec::new();
    };
    std::iter::once(first.a)
        .chain(offset.iter().map(|seg| seg.b))
        .collect()
}
