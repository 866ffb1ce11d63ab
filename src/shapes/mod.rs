//! Parametric contour generators.
//!
//! Every generator implements [`Shape`]: it produces its ordered outline
//! points in local space and the trait derives absolute points, segments
//! and bounds from them. Local space is centered on the shape's own
//! center; absolute space additionally rotates by [`Placement::rotation`]
//! and translates by [`Placement::pivot`].

mod arc;
mod capsule;
mod circle;
mod hatch;
mod parametric;
mod polygon;
mod rectangle;
mod segments;
mod spiral;
mod star;
mod winding;

pub use arc::Arc;
pub use capsule::{ArcCapsule, Capsule};
pub use circle::{Circle, Hexagon, RoundShape};
pub use hatch::{LineHatch, Paperclip, SquareWave};
pub use parametric::ParametricShape;
pub use polygon::PolygonShape;
pub use rectangle::{BranchRect, CornerRect, Rectangle, RoundedRect, Tape};
pub use segments::Segments;
pub use spiral::{MorphSpiral, Spiral};
pub use star::Star;
pub use winding::{DoubleWinding, Winding};

use crate::error::{GeometryError, Result};
use crate::geometry::{BoundingBox, Segment, Style};
use crate::math::point_2d::{rotate_point_deg, subdivide_by_distance};
use crate::math::polygon_2d::polygon_is_clockwise;
use crate::math::Point2;

/// Placement state shared by every shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Translation applied after rotation.
    pub pivot: Point2,
    /// Rotation about the local origin, in degrees.
    pub rotation: f64,
    /// Open shapes omit the segment closing the last point to the first.
    pub is_open: bool,
    /// Inverted shapes keep the opposite winding.
    pub is_inverted: bool,
}

impl Placement {
    /// A closed, non-inverted placement at the origin.
    #[must_use]
    pub fn closed() -> Self {
        Self {
            pivot: Point2::origin(),
            rotation: 0.0,
            is_open: false,
            is_inverted: false,
        }
    }

    /// An open placement at the origin.
    #[must_use]
    pub fn open() -> Self {
        Self {
            is_open: true,
            ..Self::closed()
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::closed()
    }
}

/// Rotates `points` by the placement's rotation, then translates them by
/// its pivot.
pub fn make_absolute(points: &mut [Point2], placement: &Placement) {
    for pt in points.iter_mut() {
        *pt = rotate_point_deg(pt, placement.rotation) + placement.pivot.coords;
    }
}

/// Links an ordered outline into segments.
///
/// The outline is reversed when its winding equals the non-inverted
/// orientation, so plain shapes come out counter-clockwise (in screen
/// space) and inverted ones clockwise. Open placements drop the closing
/// segment.
#[must_use]
pub fn link_points(mut points: Vec<Point2>, placement: &Placement) -> Vec<Segment> {
    if polygon_is_clockwise(&points) != placement.is_inverted {
        points.reverse();
    }
    link_in_order(&points, placement.is_open)
}

/// Links points in their given order without touching the winding.
#[must_use]
pub fn link_in_order(points: &[Point2], is_open: bool) -> Vec<Segment> {
    let n = points.len();
    let count = if is_open { n.saturating_sub(1) } else { n };
    (0..count)
        .map(|i| Segment::new(points[i], points[(i + 1) % n]))
        .collect()
}

/// A generator of ordered outline points.
pub trait Shape {
    fn placement(&self) -> &Placement;

    fn style(&self) -> &Style;

    /// Ordered outline points. `local` skips the placement transform.
    fn to_points(&self, local: bool) -> Vec<Point2>;

    /// Outline segments with normalized winding, see [`link_points`].
    fn to_segments(&self, local: bool) -> Vec<Segment> {
        link_points(self.to_points(local), self.placement())
    }

    /// Bounds of the absolute outline.
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.to_points(false))
    }

    /// Radius of the smallest origin-centered circle containing the local
    /// outline.
    fn bounding_radius(&self) -> f64 {
        self.to_points(true)
            .iter()
            .map(|pt| pt.coords.norm())
            .fold(0.0, f64::max)
    }
}

/// Applies the placement unless `local`, then offsets by `center`.
///
/// Shared tail of every centered generator: the center is added after the
/// transform, so rotation turns the shape about the world origin before it
/// is moved to its center.
pub(crate) fn finish_points(
    mut points: Vec<Point2>,
    placement: &Placement,
    local: bool,
    center: &Point2,
) -> Vec<Point2> {
    if !local {
        make_absolute(&mut points, placement);
    }
    for pt in &mut points {
        *pt += center.coords;
    }
    points
}

/// Point on a circle of `radius` at `deg` degrees, measured from +y.
pub(crate) fn radial_point(radius: f64, deg: f64) -> Point2 {
    rotate_point_deg(&Point2::new(0.0, radius), deg)
}

/// Subdivides every edge of the closed loop `corners`, concatenating the
/// runs. Shared corners appear once at the end of one run and again at the
/// start of the next.
pub(crate) fn subdivide_outline(corners: &[Point2], delta: f64) -> Vec<Point2> {
    let n = corners.len();
    (0..n)
        .flat_map(|i| subdivide_by_distance(&corners[i], &corners[(i + 1) % n], delta))
        .collect()
}

pub(crate) fn require_count(parameter: &'static str, value: u32, min: u32) -> Result<()> {
    if value < min {
        return Err(GeometryError::ParameterOutOfRange {
            parameter,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(u32::MAX),
        }
        .into());
    }
    Ok(())
}

pub(crate) fn require_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter,
            value,
            min: f64::MIN,
            max: f64::MAX,
        }
        .into())
    }
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { parameter, value }.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn make_absolute_rotates_then_translates() {
        let placement = Placement {
            pivot: Point2::new(10.0, 0.0),
            rotation: 90.0,
            ..Placement::closed()
        };
        let mut pts = [Point2::new(0.0, 1.0)];
        make_absolute(&mut pts, &placement);
        assert_relative_eq!(pts[0].x, 11.0, epsilon = 1e-12);
        assert_relative_eq!(pts[0].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn link_open_drops_closing_segment() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        assert_eq!(link_in_order(&pts, true).len(), 2);
        assert_eq!(link_in_order(&pts, false).len(), 3);
        assert!(link_in_order(&[], true).is_empty());
    }
}
