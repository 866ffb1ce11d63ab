use crate::error::Result;
use crate::geometry::{BoundingBox, Style};
use crate::math::point_2d::{rotate_point_deg, subdivide_by_distance};
use crate::math::Point2;

use super::{
    finish_points, make_absolute, require_count, subdivide_outline, Arc, Placement, Shape,
};

fn centered_box(center: &Point2, w: f64, h: f64) -> BoundingBox {
    BoundingBox::new(
        center.x - w * 0.5,
        center.y - h * 0.5,
        center.x + w * 0.5,
        center.y + h * 0.5,
    )
}

/// An axis-aligned rectangle centered on `center`.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    width: f64,
    height: f64,
    division_distance: f64,
}

impl Rectangle {
    #[must_use]
    pub fn new(center: Point2, width: f64, height: f64) -> Self {
        Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            width,
            height,
            division_distance: 0.0,
        }
    }

    #[must_use]
    pub fn square(center: Point2, size: f64) -> Self {
        Self::new(center, size, size)
    }

    /// Subdivides every edge into pieces of about `distance`. Zero keeps
    /// only the corners.
    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Bounds from center and size alone, each edge rounded to the nearest
    /// integer. Placement is ignored.
    #[must_use]
    pub fn rounded_bounding_box(&self) -> BoundingBox {
        centered_box(&self.center, self.width, self.height).rounded()
    }
}

impl Shape for Rectangle {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        let corners = [
            Point2::new(-hw, -hh),
            Point2::new(-hw, hh),
            Point2::new(hw, hh),
            Point2::new(hw, -hh),
        ];
        let points = if self.division_distance <= 0.0 {
            corners.to_vec()
        } else {
            subdivide_outline(&corners, self.division_distance)
        };
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A rectangle whose long edges zigzag inward, like the torn edge of tape.
#[derive(Debug, Clone)]
pub struct Tape {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    width: f64,
    height: f64,
    zigzags: u32,
}

impl Tape {
    /// # Errors
    ///
    /// Returns an error if `zigzags` is zero.
    pub fn new(center: Point2, width: f64, height: f64, zigzags: u32) -> Result<Self> {
        require_count("zigzags", zigzags, 1)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            width,
            height,
            zigzags,
        })
    }
}

impl Shape for Tape {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        let delta = self.width / f64::from(self.zigzags * 2);

        let mut points = vec![Point2::new(-hw, -hh), Point2::new(-hw, hh)];
        for i in 0..self.zigzags {
            let i = f64::from(i);
            points.push(Point2::new(-hw + delta * (i * 2.0) + delta, hh - delta));
            if i + 1.0 < f64::from(self.zigzags) {
                points.push(Point2::new(-hw + delta * ((i + 1.0) * 2.0), hh));
            }
        }
        points.push(Point2::new(hw, hh));
        points.push(Point2::new(hw, -hh));
        for i in 0..self.zigzags {
            let i = f64::from(i);
            points.push(Point2::new(hw - delta * (i * 2.0) - delta, -hh + delta));
            if i + 1.0 < f64::from(self.zigzags) {
                points.push(Point2::new(hw - delta * ((i + 1.0) * 2.0), -hh));
            }
        }

        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A rectangle with quarter-circle corners of radius `corner_radius`.
#[derive(Debug, Clone)]
pub struct RoundedRect {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    width: f64,
    height: f64,
    corner_radius: f64,
    corner_segments: u32,
    division_distance: f64,
}

impl RoundedRect {
    /// `corner_segments` counts segments per full turn, so each corner gets
    /// a quarter of them.
    ///
    /// # Errors
    ///
    /// Returns an error if `corner_segments` is zero.
    pub fn new(
        center: Point2,
        width: f64,
        height: f64,
        corner_radius: f64,
        corner_segments: u32,
    ) -> Result<Self> {
        require_count("corner_segments", corner_segments, 1)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            width,
            height,
            corner_radius,
            corner_segments,
            division_distance: 0.0,
        })
    }

    /// Subdivides the straight edges between corners.
    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }

    fn corners(&self) -> Result<[Vec<Point2>; 4]> {
        let (hw, hh, r) = (self.width * 0.5, self.height * 0.5, self.corner_radius);
        let corner = |cx: f64, cy: f64, from: f64, to: f64| -> Result<Vec<Point2>> {
            let arc = Arc::new(Point2::new(cx, cy), r, from, to, self.corner_segments)?.into_open();
            Ok(arc.to_points(true))
        };
        Ok([
            corner(-hw + r, -hh + r, 180.0, 270.0)?,
            corner(-hw + r, hh - r, 270.0, 360.0)?,
            corner(hw - r, hh - r, 0.0, 90.0)?,
            corner(hw - r, -hh + r, 90.0, 180.0)?,
        ])
    }
}

impl Shape for RoundedRect {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        // Corner arcs only fail on a zero segment count, rejected in `new`.
        let Ok(arcs) = self.corners() else {
            return Vec::new();
        };
        let mut points = Vec::new();
        for (idx, arc) in arcs.iter().enumerate() {
            points.extend_from_slice(arc);
            if self.division_distance > 0.0 {
                if let (Some(a), Some(b)) = (points.last().copied(), arcs[(idx + 1) % 4].first()) {
                    points.extend(subdivide_by_distance(&a, b, self.division_distance));
                }
            }
        }
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A rectangle anchored at its minimum corner rather than its center.
///
/// Edges are always run through subdivision, so each corner is emitted
/// twice even when `division_distance` is zero.
#[derive(Debug, Clone)]
pub struct CornerRect {
    pub placement: Placement,
    pub style: Style,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    division_distance: f64,
}

impl CornerRect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            placement: Placement::closed(),
            style: Style::default(),
            x,
            y,
            width,
            height,
            division_distance: 0.0,
        }
    }

    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }
}

impl Shape for CornerRect {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let corners = [
            Point2::new(self.x, self.y),
            Point2::new(self.x, self.y + self.height),
            Point2::new(self.x + self.width, self.y + self.height),
            Point2::new(self.x + self.width, self.y),
        ];
        let mut points = subdivide_outline(&corners, self.division_distance);
        if !local {
            make_absolute(&mut points, &self.placement);
        }
        points
    }
}

/// A trapezoid growing from its base at `center` toward +y, narrowed by
/// `taper` on each side at the tip. Used to build branching structures.
#[derive(Debug, Clone)]
pub struct BranchRect {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    width: f64,
    height: f64,
    taper: f64,
    division_distance: f64,
}

impl BranchRect {
    #[must_use]
    pub fn new(center: Point2, width: f64, height: f64, taper: f64) -> Self {
        Self {
            placement: Placement::closed(),
            style: Style::default(),
            center,
            width,
            height,
            taper,
            division_distance: 0.0,
        }
    }

    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }

    /// Tip of the branch: `(0, height)` turned by the rotation and moved to
    /// the center. The pivot is not applied.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        rotate_point_deg(&Point2::new(0.0, self.height), self.placement.rotation) + self.center.coords
    }
}

impl Shape for BranchRect {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let hw = self.width * 0.5;
        let corners = [
            Point2::new(-hw, 0.0),
            Point2::new(-hw + self.taper, self.height),
            Point2::new(hw - self.taper, self.height),
            Point2::new(hw, 0.0),
        ];
        let points = if self.division_distance <= 0.0 {
            corners.to_vec()
        } else {
            subdivide_outline(&corners, self.division_distance)
        };
        finish_points(points, &self.placement, local, &self.center)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plain_rectangle_has_four_corners() {
        let rect = Rectangle::new(Point2::origin(), 10.0, 10.0);
        assert_eq!(rect.to_points(false).len(), 4);
        assert_eq!(rect.to_segments(false).len(), 4);
    }

    #[test]
    fn inversion_flips_winding() {
        let plain = Rectangle::new(Point2::origin(), 10.0, 10.0);
        let mut inverted = plain.clone();
        inverted.placement.is_inverted = true;

        let a = plain.to_segments(false);
        let b = inverted.to_segments(false);
        assert_relative_eq!(a[0].a.x, 5.0);
        assert_relative_eq!(a[0].a.y, -5.0);
        assert_relative_eq!(b[0].a.x, -5.0);
        assert_relative_eq!(b[0].b.y, 5.0);
    }

    #[test]
    fn subdivided_rectangle_repeats_corners() {
        let rect = Rectangle::square(Point2::new(5.0, 5.0), 10.0).with_division_distance(5.0);
        // two pieces per edge, three points per edge
        assert_eq!(rect.to_points(false).len(), 12);
    }

    #[test]
    fn rectangle_bounds_follow_rotation() {
        let mut rect = Rectangle::new(Point2::new(10.0, 10.0), 4.4, 2.0);
        rect.placement.rotation = 45.0;
        let bb = rect.bounding_box();
        let reach = 3.2 * std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(bb.min_x, 10.0 - reach, epsilon = 1e-9);
        assert_relative_eq!(bb.max_y, 10.0 + reach, epsilon = 1e-9);
        assert_relative_eq!(rect.rounded_bounding_box().min_x, 8.0);
    }

    #[test]
    fn rectangle_bounds_follow_pivot() {
        let mut rect = Rectangle::new(Point2::origin(), 10.0, 10.0);
        rect.placement.pivot = Point2::new(100.0, 100.0);
        let bb = rect.bounding_box();
        assert_relative_eq!(bb.min_x, 95.0, epsilon = 1e-9);
        assert_relative_eq!(bb.max_y, 105.0, epsilon = 1e-9);

        let mut tape = Tape::new(Point2::origin(), 12.0, 4.0, 3).unwrap();
        tape.placement.pivot = Point2::new(50.0, 0.0);
        assert_relative_eq!(tape.bounding_box().min_x, 44.0, epsilon = 1e-9);
    }

    #[test]
    fn tape_zigzags_both_long_edges() {
        let tape = Tape::new(Point2::origin(), 12.0, 4.0, 3).unwrap();
        // 2 + (3 + 2) + 2 + (3 + 2)
        assert_eq!(tape.to_points(true).len(), 14);
        assert!(Tape::new(Point2::origin(), 1.0, 1.0, 0).is_err());
    }

    #[test]
    fn rounded_rect_stays_inside_bounds() {
        let rect = RoundedRect::new(Point2::origin(), 20.0, 10.0, 2.0, 12).unwrap();
        let bb = rect.bounding_box();
        assert!(bb.min_x >= -10.0 - 1e-9 && bb.max_x <= 10.0 + 1e-9);
        assert!(bb.min_y >= -5.0 - 1e-9 && bb.max_y <= 5.0 + 1e-9);
        assert_relative_eq!(bb.width(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn corner_rect_starts_at_its_corner() {
        let rect = CornerRect::new(2.0, 3.0, 4.0, 5.0);
        let pts = rect.to_points(false);
        assert_eq!(pts.len(), 8);
        assert_relative_eq!(pts[0].x, 2.0);
        assert_relative_eq!(pts[0].y, 3.0);
    }

    #[test]
    fn branch_end_point_follows_rotation() {
        let mut branch = BranchRect::new(Point2::new(1.0, 1.0), 4.0, 10.0, 1.0);
        assert_relative_eq!(branch.end_point().y, 11.0);
        branch.placement.rotation = 90.0;
        let end = branch.end_point();
        assert_relative_eq!(end.x, 11.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 1.0, epsilon = 1e-9);
    }
}
