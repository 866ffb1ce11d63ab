use crate::error::Result;
use crate::geometry::Style;
use crate::math::Point2;

use super::{finish_points, radial_point, require_count, require_finite, Placement, Shape};

/// A circular arc swept clockwise (in degrees from +y) from `from_deg` to
/// `to_deg`.
///
/// The closed variant starts at the center, producing a pie slice. Interior
/// points snap to multiples of `360 / segments`, so arcs sharing a segment
/// count line up with full circles.
#[derive(Debug, Clone)]
pub struct Arc {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    from_deg: f64,
    to_deg: f64,
    segments: u32,
}

impl Arc {
    /// Creates a closed arc. `to_deg` is wound forward by whole turns until
    /// it is not less than `from_deg`.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero or an angle is not finite.
    pub fn new(center: Point2, radius: f64, from_deg: f64, to_deg: f64, segments: u32) -> Result<Self> {
        require_count("segments", segments, 1)?;
        require_finite("from_deg", from_deg)?;
        require_finite("to_deg", to_deg)?;
        let mut to_deg = to_deg;
        while to_deg < from_deg {
            to_deg += 360.0;
        }
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            radius,
            from_deg,
            to_deg,
            segments,
        })
    }

    /// Drops the center point so only the curve remains.
    #[must_use]
    pub fn into_open(mut self) -> Self {
        self.placement.is_open = true;
        self
    }

    #[must_use]
    pub fn sweep(&self) -> (f64, f64) {
        (self.from_deg, self.to_deg)
    }
}

impl Shape for Arc {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let mut points = Vec::new();
        if !self.placement.is_open {
            points.push(Point2::origin());
        }

        let step = 360.0 / f64::from(self.segments);
        let last = (self.to_deg / step).floor();

        points.push(radial_point(self.radius, self.from_deg));
        let mut k = (self.from_deg / step).ceil();
        while k <= last {
            points.push(radial_point(self.radius, k * step));
            k += 1.0;
        }
        points.push(radial_point(self.radius, self.to_deg));

        finish_points(points, &self.placement, local, &self.center)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn to_angle_wraps_forward() {
        let arc = Arc::new(Point2::origin(), 1.0, 270.0, 90.0, 12).unwrap();
        assert_relative_eq!(arc.sweep().1, 450.0);
    }

    #[test]
    fn closed_arc_starts_at_center() {
        let arc = Arc::new(Point2::new(3.0, 4.0), 10.0, 0.0, 90.0, 4).unwrap();
        let pts = arc.to_points(false);
        assert_relative_eq!(pts[0].x, 3.0);
        assert_relative_eq!(pts[0].y, 4.0);
        // center, from, steps at 0 and 90, to
        assert_eq!(pts.len(), 5);
    }

    #[test]
    fn open_arc_stays_on_the_circle() {
        let arc = Arc::new(Point2::origin(), 5.0, 10.0, 100.0, 12)
            .unwrap()
            .into_open();
        let pts = arc.to_points(true);
        // from, 30, 60, 90, to
        assert_eq!(pts.len(), 5);
        for pt in &pts {
            assert_relative_eq!(pt.coords.norm(), 5.0, epsilon = 1e-9);
        }
        assert_eq!(arc.to_segments(true).len(), 4);
    }
}
