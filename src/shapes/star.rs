use crate::error::Result;
use crate::geometry::Style;
use crate::math::Point2;

use super::{finish_points, radial_point, require_count, subdivide_outline, Placement, Shape};

/// A star alternating between `inner_radius` and `outer_radius`.
///
/// The ring starts and ends on the same inner point, so the closed outline
/// carries one zero-length edge.
#[derive(Debug, Clone)]
pub struct Star {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    inner_radius: f64,
    outer_radius: f64,
    points: u32,
    division_distance: f64,
}

impl Star {
    /// # Errors
    ///
    /// Returns an error if `points` is zero.
    pub fn new(center: Point2, inner_radius: f64, outer_radius: f64, points: u32) -> Result<Self> {
        require_count("points", points, 1)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            inner_radius,
            outer_radius,
            points,
            division_distance: 0.0,
        })
    }

    /// Subdivides every edge after placement.
    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }
}

impl Shape for Star {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let step = 360.0 / f64::from(self.points);
        let mut points = Vec::with_capacity(self.points as usize * 2 + 1);
        for i in 0..=self.points {
            let deg = f64::from(i) * step;
            points.push(radial_point(self.inner_radius, deg));
            if i != self.points {
                points.push(radial_point(self.outer_radius, deg + 0.5 * step));
            }
        }
        let points = finish_points(points, &self.placement, local, &self.center);
        if self.division_distance <= 0.0 {
            points
        } else {
            subdivide_outline(&points, self.division_distance)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn five_point_star() {
        let star = Star::new(Point2::origin(), 5.0, 10.0, 5).unwrap();
        let pts = star.to_points(true);
        assert_eq!(pts.len(), 11);
        assert_relative_eq!(pts[0].y, 5.0);
        assert_relative_eq!(pts[1].coords.norm(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(pts[10].x, pts[0].x, epsilon = 1e-9);
        assert_relative_eq!(star.bounding_radius(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn subdivision_runs_every_edge() {
        let star = Star::new(Point2::origin(), 5.0, 10.0, 4)
            .unwrap()
            .with_division_distance(1000.0);
        // each of the 9 edges contributes its two endpoints
        assert_eq!(star.to_points(false).len(), 18);
    }
}
