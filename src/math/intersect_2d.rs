use crate::geometry::Segment;

use super::point_2d::{distance, points_equal};
use super::Point2;

/// A crossing found on `seg_a`, with its distance from `seg_a.a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Point2,
    pub distance: f64,
}

/// Bounded segment-segment intersection.
///
/// Solves `a.a + t * (a.b - a.a) = b.a + s * (b.b - b.a)` and accepts the
/// hit only when both `s` and `t` lie in `[0, 1]`. Parallel or collinear
/// segments yield `None`. With `ignore_touching`, a hit that coincides with
/// an endpoint of either segment is suppressed so that only true crossings
/// are reported.
#[must_use]
pub fn segment_segment_intersect(
    seg_a: &Segment,
    seg_b: &Segment,
    ignore_touching: bool,
) -> Option<Intersection> {
    let s1 = seg_a.b - seg_a.a;
    let s2 = seg_b.b - seg_b.a;
    let d = seg_a.a - seg_b.a;

    let denom = -s2.x * s1.y + s1.x * s2.y;
    if denom.abs() < f64::EPSILON {
        return None;
    }

    let s = (-s1.y * d.x + s1.x * d.y) / denom;
    let t = (s2.x * d.y - s2.y * d.x) / denom;
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&t) {
        return None;
    }

    let point = seg_a.a + s1 * t;
    if ignore_touching
        && [seg_b.a, seg_b.b, seg_a.a, seg_a.b]
            .iter()
            .any(|end| points_equal(&point, end, 1.0))
    {
        return None;
    }

    Some(Intersection {
        point,
        distance: distance(&seg_a.a, &point),
    })
}

/// All intersections of `seg` against `segments`, in `segments` order.
///
/// The segment itself is skipped if it appears in the list. With
/// `remove_duplicates`, hits equal to an already collected hit are dropped.
#[must_use]
pub fn segment_segments_intersections(
    seg: &Segment,
    segments: &[Segment],
    ignore_touching: bool,
    remove_duplicates: bool,
) -> Vec<Intersection> {
    let mut hits: Vec<Intersection> = Vec::new();
    for other in segments {
        if std::ptr::eq(seg, other) {
            continue;
        }
        let Some(hit) = segment_segment_intersect(seg, other, ignore_touching) else {
            continue;
        };
        if remove_duplicates
            && hits
                .iter()
                .any(|existing| points_equal(&existing.point, &hit.point, 1.0))
        {
            continue;
        }
        hits.push(hit);
    }
    hits
}

/// `true` when `p1, p2, p3` turn counter-clockwise in y-up terms.
#[must_use]
pub fn ccw(p1: &Point2, p2: &Point2, p3: &Point2) -> bool {
    (p3.y - p1.y) * (p2.x - p1.x) > (p2.y - p1.y) * (p3.x - p1.x)
}

/// Orientation-only crossing test. Touching and collinear overlap are not
/// reported.
#[must_use]
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    ccw(&a.a, &b.a, &b.b) != ccw(&a.b, &b.a, &b.b) && ccw(&a.a, &a.b, &b.a) != ccw(&a.a, &a.b, &b.b)
}

/// Casts a ray from `from` toward `to` and returns the hit points ordered
/// by distance.
///
/// A first hit sitting on `from` itself is discarded, as are hits closer
/// than `min_dist`. When nothing is hit the result is `[to]`.
#[must_use]
pub fn raycast(from: &Point2, to: &Point2, segments: &[Segment], min_dist: f64) -> Vec<Point2> {
    let ray = Segment::new(*from, *to);
    let mut hits = segment_segments_intersections(&ray, segments, false, false);
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let mut start = 0;
    if hits.first().is_some_and(|hit| points_equal(&hit.point, from, 10.0)) {
        start = 1;
    }
    if min_dist > 0.0 {
        while start < hits.len() && hits[start].distance < min_dist {
            start += 1;
        }
    }

    if start == hits.len() {
        return vec![*to];
    }
    hits[start..].iter().map(|hit| hit.point).collect()
}
