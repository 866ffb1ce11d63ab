use std::collections::BTreeMap;

use crate::math::point_2d::{angle_between, distance, distance_squared, normalize_angle, points_equal};
use crate::math::{Point2, EPSILON};

/// A directed line from `a` to `b`.
///
/// Most queries treat `a -> b` and `b -> a` as the same segment, but the
/// merge and offset operators read the direction as winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
    /// Free-form labels that travel with the segment through operators.
    pub tags: BTreeMap<String, String>,
}

impl Segment {
    /// Creates an untagged segment.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            a,
            b,
            tags: BTreeMap::new(),
        }
    }

    /// Returns the segment with an extra tag attached.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.a, &self.b)
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        distance_squared(&self.a, &self.b)
    }

    /// Direction of travel in radians, wrapped into `[-pi, pi]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        normalize_angle(angle_between(&self.a, &self.b))
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.a, &self.b)
    }

    /// Returns a copy running `b -> a`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            tags: self.tags.clone(),
        }
    }

    /// Swaps the endpoints in place.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.a, &mut self.b);
    }

    /// Endpoint equality at `scale`. Unless `no_reverse` is set, a segment
    /// running the opposite way also matches.
    #[must_use]
    pub fn is_equal(&self, other: &Segment, scale: f64, no_reverse: bool) -> bool {
        (points_equal(&self.a, &other.a, scale) && points_equal(&self.b, &other.b, scale))
            || (!no_reverse
                && points_equal(&self.b, &other.a, scale)
                && points_equal(&self.a, &other.b, scale))
    }
}

/// `true` when both segments head the same way, within `EPSILON` radians.
#[must_use]
pub fn same_angle(a: &Segment, b: &Segment) -> bool {
    (angle_between(&a.a, &a.b) - angle_between(&b.a, &b.b)).abs() < EPSILON
}

/// `true` when the segments head in opposite directions, within `EPSILON`
/// radians.
#[must_use]
pub fn same_angle_rev(a: &Segment, b: &Segment) -> bool {
    (angle_between(&a.a, &a.b) - angle_between(&b.b, &b.a)).abs() < EPSILON
}

/// Reverses both the order of `segments` and the direction of each one.
///
/// Applying it twice restores the input.
#[must_use]
pub fn reverse_segments(segments: &[Segment]) -> Vec<Segment> {
    segments.iter().rev().map(Segment::reversed).collect()
}

/// `true` when `a` ends where `b` starts or `b` ends where `a` starts.
#[must_use]
pub fn segments_connected(a: &Segment, b: &Segment, scale: f64) -> bool {
    points_equal(&a.b, &b.a, scale) || points_equal(&a.a, &b.b, scale)
}

/// Flattens a segment run into its vertices, dropping each point that
/// repeats its predecessor.
#[must_use]
pub fn segments_to_points(segments: &[Segment]) -> Vec<Point2> {
    let mut points: Vec<Point2> = Vec::with_capacity(segments.len() * 2);
    for seg in segments {
        for pt in [seg.a, seg.b] {
            if points.last().is_some_and(|last| points_equal(last, &pt, 1.0)) {
                continue;
            }
            points.push(pt);
        }
    }
    points
}

/// Links `points` into a closed ring of segments, the last one returning to
/// the first point.
#[must_use]
pub fn points_to_closed_segments(points: &[Point2]) -> Vec<Segment> {
    let n = points.len();
    (0..n)
        .map(|i| Segment::new(points[i], points[(i + 1) % n]))
        .collect()
}
