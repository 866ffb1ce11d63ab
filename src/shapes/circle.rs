use crate::error::Result;
use crate::geometry::Style;
use crate::math::Point2;

use super::{finish_points, radial_point, require_count, require_positive, Placement, Shape};

/// A regular polygon approximating a circle.
///
/// Points start at `+y` and advance `360 / segments` degrees each. Extra
/// overdraw steps continue past the start, which opens the outline so the
/// pen laps its own beginning.
#[derive(Debug, Clone)]
pub struct Circle {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    segments: u32,
    overdraw_steps: u32,
}

impl Circle {
    /// Creates a closed circle.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn new(center: Point2, radius: f64, segments: u32) -> Result<Self> {
        require_count("segments", segments, 1)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            radius,
            segments,
            overdraw_steps: 0,
        })
    }

    /// Continues the outline `steps` points past the start. Any overdraw
    /// makes the circle open.
    #[must_use]
    pub fn with_overdraw(mut self, steps: u32) -> Self {
        self.overdraw_steps = steps;
        self.placement.is_open = steps > 0;
        self
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let step = 360.0 / f64::from(self.segments);
        let points = (0..self.segments + self.overdraw_steps)
            .map(|i| radial_point(self.radius, f64::from(i) * step))
            .collect();
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A flat-topped hexagon.
#[derive(Debug, Clone)]
pub struct Hexagon {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
}

impl Hexagon {
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            radius,
        }
    }
}

impl Shape for Hexagon {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let points = (0..6)
            .map(|i| radial_point(self.radius, f64::from(i) * 60.0 + 30.0))
            .collect();
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A circle with a deterministic sinusoidal wobble.
///
/// `variance` scales the wobble relative to the radius; `0` yields a plain
/// circle.
#[derive(Debug, Clone)]
pub struct RoundShape {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    segments: u32,
    variance: f64,
}

impl RoundShape {
    /// # Errors
    ///
    /// Returns an error if `segments` is zero or `radius` is not positive.
    pub fn new(center: Point2, radius: f64, segments: u32, variance: f64) -> Result<Self> {
        require_count("segments", segments, 1)?;
        require_positive("radius", radius)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            radius,
            segments,
            variance,
        })
    }
}

impl Shape for RoundShape {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let step = 360.0 / f64::from(self.segments);
        let points = (0..self.segments)
            .map(|i| {
                let mut pt = radial_point(self.radius, f64::from(i) * step);
                pt.x *= 1.0 + ((pt.y + 10_000.0) / self.radius * 1.2).sin() * self.variance;
                pt.y *= 1.0 + ((pt.x + 10_000.0) / self.radius * 1.35).cos() * self.variance;
                pt
            })
            .collect();
        finish_points(points, &self.placement, local, &self.center)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn circle_points_sit_on_radius() {
        let circle = Circle::new(Point2::new(5.0, 5.0), 10.0, 12).unwrap();
        let pts = circle.to_points(false);
        assert_eq!(pts.len(), 12);
        for pt in &pts {
            assert_relative_eq!((pt - Point2::new(5.0, 5.0)).norm(), 10.0, epsilon = 1e-9);
        }
        assert_relative_eq!(pts[0].y, 15.0, epsilon = 1e-12);
        assert_eq!(circle.to_segments(false).len(), 12);
    }

    #[test]
    fn overdraw_opens_the_outline() {
        let circle = Circle::new(Point2::origin(), 10.0, 8).unwrap().with_overdraw(2);
        assert!(circle.placement.is_open);
        assert_eq!(circle.to_points(true).len(), 10);
        assert_eq!(circle.to_segments(true).len(), 9);
    }

    #[test]
    fn zero_segments_is_rejected() {
        assert!(Circle::new(Point2::origin(), 1.0, 0).is_err());
    }

    #[test]
    fn rotation_turns_before_centering() {
        let mut circle = Circle::new(Point2::new(100.0, 0.0), 10.0, 4).unwrap();
        circle.placement.rotation = 90.0;
        let local = circle.to_points(true);
        let absolute = circle.to_points(false);
        assert_relative_eq!(local[0].y, 10.0, epsilon = 1e-12);
        assert_relative_eq!(absolute[0].x, 110.0, epsilon = 1e-9);
        assert_relative_eq!(absolute[0].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn hexagon_bounding_radius() {
        let hex = Hexagon::new(Point2::origin(), 7.0);
        assert_eq!(hex.to_points(false).len(), 6);
        assert_relative_eq!(hex.bounding_radius(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn round_shape_without_variance_is_a_circle() {
        let shape = RoundShape::new(Point2::origin(), 10.0, 16, 0.0).unwrap();
        for pt in shape.to_points(true) {
            assert_relative_eq!(pt.coords.norm(), 10.0, epsilon = 1e-9);
        }
        assert!(RoundShape::new(Point2::origin(), 0.0, 16, 0.1).is_err());
    }
}
