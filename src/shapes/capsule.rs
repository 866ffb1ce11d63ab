use crate::error::Result;
use crate::geometry::Style;
use crate::math::point_2d::rotate_point_deg;
use crate::math::Point2;

use super::{finish_points, radial_point, require_count, Arc, Placement, Shape};

/// A stadium: two half circles of `radius` joined by straight runs of
/// `length` along x.
#[derive(Debug, Clone)]
pub struct Capsule {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    length: f64,
    segments: u32,
}

impl Capsule {
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn new(center: Point2, radius: f64, length: f64, segments: u32) -> Result<Self> {
        require_count("segments", segments, 1)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            radius,
            length,
            segments,
        })
    }
}

impl Shape for Capsule {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let segs = self.segments;
        let step = 360.0 / f64::from(segs);
        let half = self.length * 0.5;
        let mut points = Vec::with_capacity(segs as usize + 2);
        for i in 0..segs {
            let mut pt = radial_point(self.radius, f64::from(i) * step);
            // the right half turns through 0..=180 degrees
            pt.x += if 2 * i <= segs { half } else { -half };
            points.push(pt);
            if i == 0 {
                points.insert(0, Point2::new(pt.x - self.length, pt.y));
            }
            if 2 * i == segs {
                points.push(Point2::new(pt.x - self.length, pt.y));
            } else if 2 * i < segs && 2 * (i + 1) > segs {
                let mut bottom = radial_point(self.radius, 180.0);
                bottom.x += half;
                points.push(bottom);
                points.push(Point2::new(bottom.x - self.length, bottom.y));
            }
        }
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A capsule bent along a circular arc sweeping `angle` degrees, with half
/// circle caps at both ends. Negative angles bend the other way.
#[derive(Debug, Clone)]
pub struct ArcCapsule {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    length: f64,
    angle: f64,
    segments: u32,
}

impl ArcCapsule {
    /// A zero `angle` is nudged to `0.01` degrees to keep the bend radius
    /// finite.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn new(center: Point2, radius: f64, length: f64, angle: f64, segments: u32) -> Result<Self> {
        require_count("segments", segments, 1)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            radius,
            length,
            angle: if angle.abs() < f64::EPSILON { 0.01 } else { angle },
            segments,
        })
    }

    fn outline(&self) -> Result<Vec<Point2>> {
        let sweep = self.angle.abs();
        let step = sweep / f64::from(self.segments);
        let bend = self.length / sweep.to_radians().tan();
        let rail = |offset: f64| -> Vec<Point2> {
            (0..=self.segments)
                .map(|k| {
                    let mut pt = radial_point(bend + offset, f64::from(k) * step + 90.0);
                    pt.x -= bend;
                    pt
                })
                .collect()
        };

        let mut right = rail(self.radius);
        right.reverse();
        let mut left = rail(-self.radius);

        let cap_segments = self.segments * 4;
        let start_cap = Arc::new(Point2::origin(), self.radius, -90.0, 90.0, cap_segments)?.into_open();
        right.extend(start_cap.to_points(false).into_iter().rev());

        let mut end = radial_point(bend, sweep + 90.0);
        end.x -= bend;
        let mut end_cap = Arc::new(end, self.radius, 90.0, 270.0, cap_segments)?.into_open();
        end_cap.placement.rotation = sweep;
        left.extend(end_cap.to_points(false).into_iter().rev());

        right.extend(left);
        let mut points = right;
        if self.angle < 0.0 {
            for pt in &mut points {
                pt.x = -pt.x;
            }
            points.reverse();
        }
        Ok(points
            .iter()
            .map(|pt| rotate_point_deg(pt, -90.0))
            .collect())
    }
}

impl Shape for ArcCapsule {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        // Cap arcs only fail on a zero segment count, rejected in `new`.
        let points = self.outline().unwrap_or_default();
        finish_points(points, &self.placement, local, &self.center)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn capsule_spans_length_plus_caps() {
        let capsule = Capsule::new(Point2::origin(), 5.0, 10.0, 12).unwrap();
        let pts = capsule.to_points(true);
        assert_eq!(pts.len(), 14);
        let bb = capsule.bounding_box();
        assert_relative_eq!(bb.width(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(bb.height(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn odd_segment_capsule_still_closes_the_bottom_run() {
        let capsule = Capsule::new(Point2::origin(), 5.0, 10.0, 7).unwrap();
        let pts = capsule.to_points(true);
        assert_eq!(pts.len(), 10);
        assert!(pts
            .iter()
            .any(|pt| (pt.y + 5.0).abs() < 1e-9 && (pt.x + 5.0).abs() < 1e-9));
    }

    #[test]
    fn arc_capsule_has_both_caps() {
        let capsule = ArcCapsule::new(Point2::origin(), 2.0, 20.0, 45.0, 12).unwrap();
        let pts = capsule.to_points(true);
        // two rails of 13 plus two caps of 27
        assert_eq!(pts.len(), 80);
        assert!(pts.iter().all(|pt| pt.x.is_finite() && pt.y.is_finite()));
    }

    #[test]
    fn negative_angle_mirrors() {
        let pos = ArcCapsule::new(Point2::origin(), 2.0, 20.0, 30.0, 6).unwrap();
        let neg = ArcCapsule::new(Point2::origin(), 2.0, 20.0, -30.0, 6).unwrap();
        let a = pos.bounding_box();
        let b = neg.bounding_box();
        assert_relative_eq!(a.width(), b.width(), epsilon = 1e-9);
        assert_relative_eq!(a.height(), b.height(), epsilon = 1e-9);
    }
}
