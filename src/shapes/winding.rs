use std::f64::consts::PI;

use crate::error::Result;
use crate::geometry::Style;
use crate::math::point_2d::{angle_between, distance, lerp_points, rotate_point, subdivide_by_distance};
use crate::math::Point2;

use super::{finish_points, radial_point, require_count, Placement, Shape};

/// Concentric rings stepping inward by `offset`, joined into one open
/// stroke. Each ring ends `offset` short of a full turn so it can drop to
/// the next.
#[derive(Debug, Clone)]
pub struct Winding {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    segments: u32,
    offset: f64,
}

impl Winding {
    /// A non-positive `offset` produces no points.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is below two.
    pub fn new(center: Point2, radius: f64, segments: u32, offset: f64) -> Result<Self> {
        require_count("segments", segments, 2)?;
        Ok(Self {
            placement: Placement::open(),
            style: Style::default(),
            center,
            radius,
            segments,
            offset,
        })
    }
}

impl Shape for Winding {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn to_points(&self, local: bool) -> Vec<Point2> {
        let offset = self.offset;
        let mut points: Vec<Point2> = Vec::new();
        if offset <= 0.0 {
            return finish_points(points, &self.placement, local, &self.center);
        }

        let winds = (self.radius / offset).round().max(0.0) as u32;
        let step = 360.0 / f64::from(self.segments);
        let mut ring = self.radius;
        for j in 0..winds {
            for i in 1..=self.segments {
                let mut pt = radial_point(ring, f64::from(i) * step);
                if i == self.segments {
                    if let Some(prev) = points.last() {
                        let delta = distance(prev, &pt);
                        if delta > 0.0 {
                            pt = lerp_points(&pt, prev, offset / delta);
                        }
                    }
                }
                if j == 0 && i == 2 {
                    // Pull the opening point forward so the stroke starts
                    // `offset` into the first ring.
                    if let Some(prev) = points.last_mut() {
                        let delta = distance(prev, &pt);
                        if offset >= delta || pt.coords.norm() < offset * 0.75 {
                            continue;
                        }
                        *prev = lerp_points(prev, &pt, offset / delta);
                    }
                }
                points.push(pt);
            }
            ring -= offset;
        }
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A pair of interleaved meanders folding in from opposite sides of a
/// circle, nested `steps` levels deep.
#[derive(Debug, Clone)]
pub struct DoubleWinding {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    steps: u32,
    division_distance: f64,
    merge_final: bool,
}

impl DoubleWinding {
    /// # Errors
    ///
    /// Returns an error if `steps` is zero.
    pub fn new(center: Point2, radius: f64, steps: u32) -> Result<Self> {
        require_count("steps", steps, 1)?;
        Ok(Self {
            placement: Placement::open(),
            style: Style::default(),
            center,
            radius,
            steps,
            division_distance: 0.0,
            merge_final: false,
        })
    }

    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }

    /// Joins the two innermost points into their midpoint.
    #[must_use]
    pub fn with_merge_final(mut self, merge_final: bool) -> Self {
        self.merge_final = merge_final;
        self
    }

    fn split(&self, a: Point2, b: Point2, step_num: u32) -> Vec<Point2> {
        let unit = self.radius / f64::from(self.steps);
        let offset = if step_num == 0 { 0.0 } else { unit };
        let mut len = self.radius * 2.0 - offset * f64::from(step_num) * 2.0 + offset;
        if step_num == 0 {
            len -= unit;
        }
        let ang = angle_between(&a, &b);
        let mid = nalgebra::center(&a, &b);

        let off_a = rotate_point(&Point2::new(0.0, len * 0.5 - offset), -ang).coords;
        let off_b = rotate_point(&Point2::new(0.0, -len * 0.5 + offset), -ang).coords;
        let mut p0 = a + off_a;
        let p2 = mid + off_a;
        let p3 = mid + off_b;
        let mut p5 = b + off_b;

        if step_num == 0 {
            p0 += rotate_point(&Point2::new(0.0, unit * 1.5), ang + PI * 0.5).coords;
            p5 += rotate_point(&Point2::new(0.0, -unit * 1.5), ang + PI * 0.5).coords;
        }

        let next = step_num + 1;
        let inner = if next < self.steps {
            self.split(p2, p3, next)
        } else if self.merge_final {
            vec![nalgebra::center(&p2, &p3)]
        } else {
            vec![p2, p3]
        };

        let mut points = Vec::with_capacity(inner.len() + 4);
        points.extend([p0, p0]);
        points.extend(inner);
        points.extend([p5, p5]);
        points
    }
}

impl Shape for DoubleWinding {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let r = self.radius;
        let mut points = self.split(Point2::new(-r, 0.0), Point2::new(r, 0.0), 0);

        if self.division_distance > 0.0 {
            let mut divided = Vec::with_capacity(points.len());
            divided.extend(points.first().copied());
            for pair in points.windows(2) {
                divided.extend(subdivide_by_distance(&pair[0], &pair[1], self.division_distance));
            }
            points = divided;
        }

        finish_points(points, &self.placement, local, &self.center)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn winding_rings_step_inward() {
        let winding = Winding::new(Point2::origin(), 50.0, 12, 10.0).unwrap();
        let pts = winding.to_points(true);
        assert_eq!(pts.len(), 60);
        assert!(winding.bounding_radius() <= 50.0 + 1e-9);
        assert!(pts.last().unwrap().coords.norm() < 15.0);
    }

    #[test]
    fn winding_without_offset_is_empty() {
        let winding = Winding::new(Point2::origin(), 50.0, 12, 0.0).unwrap();
        assert!(winding.to_points(false).is_empty());
        assert!(Winding::new(Point2::origin(), 50.0, 1, 10.0).is_err());
    }

    #[test]
    fn double_winding_nests_each_step() {
        let shape = DoubleWinding::new(Point2::origin(), 30.0, 3).unwrap();
        let pts = shape.to_points(true);
        assert_eq!(pts.len(), 14);
        for pt in &pts {
            assert!(pt.x.abs() <= 30.0 + 1e-9 && pt.y.abs() <= 30.0 + 1e-9);
        }
        let merged = shape.clone().with_merge_final(true);
        assert_eq!(merged.to_points(true).len(), 13);
    }

    #[test]
    fn double_winding_subdivision_adds_points() {
        let shape = DoubleWinding::new(Point2::origin(), 30.0, 2)
            .unwrap()
            .with_division_distance(2.0);
        let plain = DoubleWinding::new(Point2::origin(), 30.0, 2).unwrap();
        assert!(shape.to_points(true).len() > plain.to_points(true).len() * 2);
    }
}
