//! Ordering and sampling helpers for segment runs.

use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::geometry::Segment;
use crate::math::point_2d::{average_points, lerp_points, points_equal};
use crate::math::{Point2, Vector2, EPSILON};

pub use crate::geometry::segments_connected;

/// Chains segments so each one starts where the previous one ended.
///
/// Greedy: from the current end, the first remaining segment starting at
/// that point (at unit scale) is taken next. When none does, the next
/// remaining segment in input order starts a new run. Directions are never
/// flipped.
#[must_use]
pub fn order_segments(segments: &[Segment]) -> Vec<Segment> {
    let mut remaining: VecDeque<Segment> = segments.iter().cloned().collect();
    let mut ordered: Vec<Segment> = Vec::with_capacity(segments.len());
    while !remaining.is_empty() {
        let found = ordered.last().and_then(|last| {
            remaining
                .iter()
                .position(|seg| points_equal(&last.b, &seg.a, 1.0))
        });
        let next = match found {
            Some(i) => remaining.remove(i),
            None => remaining.pop_front(),
        };
        let Some(next) = next else {
            break;
        };
        ordered.push(next);
    }
    ordered
}

/// Moves the segments so the average of their start points sits on the
/// origin.
pub fn center_segments(segments: &mut [Segment]) {
    let starts: Vec<Point2> = segments.iter().map(|seg| seg.a).collect();
    let Some(center) = average_points(&starts) else {
        return;
    };
    for seg in segments {
        seg.a -= center.coords;
        seg.b -= center.coords;
    }
}

/// A free end of a segment network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    pub point: Point2,
    /// Unit vector pointing out of the network along the end segment.
    pub direction: Vector2,
}

/// Finds segment ends that no other segment touches.
///
/// Degenerate segments are ignored. Results run from the last segment to
/// the first.
#[must_use]
pub fn find_endpoints(segments: &[Segment]) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    for (i, seg) in segments.iter().enumerate().rev() {
        let len = seg.length();
        if len <= EPSILON {
            continue;
        }
        let touches = |pt: &Point2| {
            segments.iter().enumerate().any(|(j, other)| {
                j != i && (points_equal(pt, &other.a, 1.0) || points_equal(pt, &other.b, 1.0))
            })
        };
        if !touches(&seg.a) {
            endpoints.push(Endpoint {
                point: seg.a,
                direction: (seg.a - seg.b) / len,
            });
        }
        if !touches(&seg.b) {
            endpoints.push(Endpoint {
                point: seg.b,
                direction: (seg.b - seg.a) / len,
            });
        }
    }
    endpoints
}

/// A point on a path with the path's heading there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathMark {
    pub point: Point2,
    /// `PI` minus the segment angle, averaged with the neighbor near a
    /// joint.
    pub angle: f64,
}

fn heading(seg: &Segment) -> f64 {
    PI - seg.angle()
}

/// Places `count` marks evenly along `path`, the first on its start.
///
/// Marks landing within one percent of a joint blend the headings of both
/// segments. The path is treated as a loop for neighbor lookup.
#[must_use]
pub fn points_along_path(path: &[Segment], count: usize) -> Vec<PathMark> {
    if path.is_empty() || count == 0 {
        return Vec::new();
    }
    let total: f64 = path.iter().map(Segment::length).sum();
    #[allow(clippy::cast_precision_loss)]
    let separation = total / count as f64;

    let mut marks = Vec::with_capacity(count);
    for j in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let target = separation * j as f64;
        let mut travelled = 0.0;
        let mut i = 0;
        while i < path.len() - 1
            && (travelled + path[i].length() < target - 0.0001 || path[i].length() <= 0.0)
        {
            travelled += path[i].length();
            i += 1;
        }

        let seg = &path[i];
        let len = seg.length();
        if len <= 0.0 {
            continue;
        }
        let prev = &path[if i > 0 { i - 1 } else { path.len() - 1 }];
        let next = &path[(i + 1) % path.len()];

        let t = (target - travelled) / len;
        let mut angle = heading(seg);
        if t < 0.01 {
            angle = (angle + heading(prev)) * 0.5;
        }
        if t > 0.99 {
            angle = (angle + heading(next)) * 0.5;
        }
        marks.push(PathMark {
            point: lerp_points(&seg.a, &seg.b, t),
            angle,
        });
    }
    marks
}

/// The midpoint and heading of every segment.
#[must_use]
pub fn midpoints_in_path(path: &[Segment]) -> Vec<PathMark> {
    path.iter()
        .map(|seg| PathMark {
            point: seg.midpoint(),
            angle: heading(seg),
        })
        .collect()
}
