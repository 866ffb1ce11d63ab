use crate::geometry::{Segment, Style};
use crate::math::point_2d::{angle_between, points_equal};
use crate::math::Point2;

use super::{link_in_order, make_absolute, subdivide_outline, Placement, Shape};

/// A shape over caller-supplied points.
///
/// Unlike the generated shapes there is no center offset, and segments keep
/// the given point order instead of normalizing the winding.
#[derive(Debug, Clone)]
pub struct PolygonShape {
    pub placement: Placement,
    pub style: Style,
    points: Vec<Point2>,
    division_distance: f64,
}

impl PolygonShape {
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            placement: Placement::closed(),
            style: Style::default(),
            points,
            division_distance: 0.0,
        }
    }

    #[must_use]
    pub fn from_coords(coords: &[[f64; 2]]) -> Self {
        Self::new(coords.iter().map(|c| Point2::new(c[0], c[1])).collect())
    }

    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Normalizes the outline for plotting.
    ///
    /// An open outline whose ends meet is closed and its duplicate end
    /// dropped. A closed outline is then rotated so it starts at its
    /// sharpest turn, and interior points on a straight run are removed.
    /// Open outlines are otherwise left alone.
    pub fn optimize(&mut self) {
        let n = self.points.len();
        if n < 2 {
            return;
        }
        if self.placement.is_open && points_equal(&self.points[0], &self.points[n - 1], 1.0) {
            self.placement.is_open = false;
            self.points.pop();
        }
        if self.placement.is_open {
            return;
        }

        let mut last_angle = f64::NAN;
        let mut max_turn = 0.0;
        let mut max_idx = 0;
        for i in (0..self.points.len() - 1).rev() {
            let ang = angle_between(&self.points[i], &self.points[i + 1]);
            if !last_angle.is_nan() {
                let turn = (last_angle - ang).abs();
                if max_turn <= turn {
                    max_turn = turn;
                    max_idx = i;
                }
            }
            last_angle = ang;
        }
        let len = self.points.len();
        self.points.rotate_right(max_idx % len);

        last_angle = f64::NAN;
        for i in (0..self.points.len() - 1).rev() {
            let ang = angle_between(&self.points[i], &self.points[i + 1]);
            if !last_angle.is_nan() && (last_angle - ang).abs() < 0.0001 {
                self.points.remove(i + 1);
            }
            last_angle = ang;
        }
    }
}

impl Shape for PolygonShape {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let mut points = self.points.clone();
        if !local {
            make_absolute(&mut points, &self.placement);
        }
        if self.division_distance <= 0.0 {
            points
        } else {
            subdivide_outline(&points, self.division_distance)
        }
    }

    fn to_segments(&self, local: bool) -> Vec<Segment> {
        link_in_order(&self.to_points(local), self.placement.is_open)
    }
}
