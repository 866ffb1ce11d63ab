//! Chaikin corner cutting for polylines and segment runs.

use crate::geometry::Segment;
use crate::math::point_2d::{distance, points_equal};
use crate::math::Point2;

/// Corner-cutting parameters.
///
/// Each pass replaces an edge `p1 -> p2` longer than `2 * min_dist` by the
/// two points `p1 * second_cut + p2 * first_cut` and
/// `p1 * first_cut + p2 * second_cut`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    pub iterations: usize,
    pub min_dist: f64,
    pub first_cut: f64,
    pub second_cut: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            iterations: 1,
            min_dist: 5.0,
            first_cut: 0.25,
            second_cut: 0.75,
        }
    }
}

impl Smoothing {
    #[must_use]
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_min_dist(mut self, min_dist: f64) -> Self {
        self.min_dist = min_dist;
        self
    }

    #[must_use]
    pub fn with_cuts(mut self, first_cut: f64, second_cut: f64) -> Self {
        self.first_cut = first_cut;
        self.second_cut = second_cut;
        self
    }

    fn cut(&self, p1: &Point2, p2: &Point2) -> [Point2; 2] {
        [
            Point2::from(p1.coords * self.second_cut + p2.coords * self.first_cut),
            Point2::from(p1.coords * self.first_cut + p2.coords * self.second_cut),
        ]
    }
}

/// `true` when four consecutive points share an x or a y coordinate.
#[allow(clippy::float_cmp)]
fn axis_aligned_run(p0: &Point2, p1: &Point2, p2: &Point2, p3: &Point2) -> bool {
    (p0.x == p1.x && p1.x == p2.x && p2.x == p3.x) || (p0.y == p1.y && p1.y == p2.y && p2.y == p3.y)
}

fn smooth_pass(prev: &[Point2], options: &Smoothing, closed: bool) -> Vec<Point2> {
    let mut out = Vec::with_capacity(prev.len() * 2);
    if !closed {
        if let Some(first) = prev.first() {
            out.push(*first);
        }
    }

    let edges = if closed { prev.len() } else { prev.len().saturating_sub(1) };
    for i in 0..edges {
        let p1 = &prev[i];
        let p2 = prev.get(i + 1).unwrap_or(&prev[0]);

        if i > 1 && i + 2 < edges && axis_aligned_run(&prev[i - 1], p1, p2, &prev[i + 2]) {
            out.push(*p1);
            continue;
        }

        if distance(p1, p2) > options.min_dist * 2.0 {
            out.extend(options.cut(p1, p2));
        } else if closed {
            out.push(nalgebra::center(p1, p2));
        } else {
            out.push(*p2);
        }
    }
    out
}

/// Smooths a polyline with `options.iterations` corner-cutting passes.
///
/// Interior points inside a run of four axis-aligned points are passed
/// through untouched. Open lines keep both endpoints; closed lines are
/// returned with their first point repeated at the end. Zero iterations
/// return the input as is.
#[must_use]
pub fn smooth_line(points: &[Point2], options: &Smoothing, closed: bool) -> Vec<Point2> {
    if options.iterations == 0 || points.is_empty() {
        return points.to_vec();
    }

    let mut out = points.to_vec();
    for _ in 0..options.iterations {
        out = smooth_pass(&out, options, closed);
    }

    if closed {
        if let Some(first) = out.first().copied() {
            out.push(first);
        }
    } else if let Some(last) = points.last() {
        if out.last() != Some(last) {
            out.push(*last);
        }
    }
    out
}

/// Splits `segments` into connected runs and smooths each one.
///
/// A run breaks wherever a segment does not start at the previous end, and
/// is treated as closed when its last end meets its first start.
#[must_use]
pub fn smooth_segments(segments: &[Segment], options: &Smoothing) -> Vec<Segment> {
    let mut runs: Vec<&[Segment]> = Vec::new();
    let mut start = 0;
    for i in 1..segments.len() {
        if !points_equal(&segments[i - 1].b, &segments[i].a, 1.0) {
            runs.push(&segments[start..i]);
            start = i;
        }
    }
    if start < segments.len() {
        runs.push(&segments[start..]);
    }

    let mut out = Vec::with_capacity(segments.len() * 2);
    for run in runs {
        let (Some(first), Some(last)) = (run.first(), run.last()) else {
            continue;
        };
        let closed = points_equal(&first.a, &last.b, 1.0);
        let mut points = Vec::with_capacity(run.len() + 1);
        if !closed {
            points.push(first.a);
        }
        points.extend(run.iter().map(|seg| seg.b));

        let points = smooth_line(&points, options, closed);
        out.extend(points.windows(2).map(|pair| Segment::new(pair[0], pair[1])));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::points_to_closed_segments;
    use approx::assert_relative_eq;

    fn corner() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ]
    }

    #[test]
    fn one_pass_cuts_each_long_edge() {
        let out = smooth_line(&corner(), &Smoothing::new(1).with_min_dist(1.0), false);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0], Point2::new(0.0, 0.0));
        assert_relative_eq!(out[1].x, 2.5);
        assert_relative_eq!(out[2].x, 7.5);
        assert_relative_eq!(out[4].y, 7.5);
        assert_eq!(out[5], Point2::new(10.0, 10.0));
    }

    #[test]
    fn short_edges_are_left_alone() {
        let out = smooth_line(&corner(), &Smoothing::new(3), false);
        assert_eq!(out, corner());
        assert_eq!(smooth_line(&corner(), &Smoothing::new(0), false), corner());
    }

    #[test]
    fn straight_runs_pass_through() {
        let pts: Vec<Point2> = (0..6).map(|i| Point2::new(f64::from(i) * 10.0, 0.0)).collect();
        let out = smooth_line(&pts, &Smoothing::new(1).with_min_dist(1.0), false);
        assert_eq!(out.len(), 11);
        assert!(out.contains(&Point2::new(20.0, 0.0)));
    }

    #[test]
    fn closed_line_repeats_its_start() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let out = smooth_line(&square, &Smoothing::new(1).with_min_dist(1.0), true);
        assert_eq!(out.len(), 9);
        assert_eq!(out.first(), out.last());
        assert_relative_eq!(out[0].x, 2.5);
    }

    #[test]
    fn segments_smooth_per_run() {
        let mut segs = vec![
            Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)),
            Segment::new(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0)),
            Segment::new(Point2::new(20.0, 20.0), Point2::new(40.0, 20.0)),
        ];
        let options = Smoothing::new(1).with_min_dist(1.0);
        assert_eq!(smooth_segments(&segs, &options).len(), 8);

        segs = points_to_closed_segments(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ]);
        let ring = smooth_segments(&segs, &options);
        assert_eq!(ring.len(), 6);
        assert!(points_equal(&ring[0].a, &ring[5].b, 1.0));
    }
}
