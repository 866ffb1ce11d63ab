use crate::error::Result;
use crate::geometry::Style;
use crate::math::point_2d::{distance, lerp_points};
use crate::math::Point2;

use super::{finish_points, radial_point, require_count, require_positive, Placement, Shape};

/// Segments per winding at detail `1`.
const SEGMENTS_PER_DETAIL: u32 = 64;

/// Pushes `pt` unless it lies within `min_gap` of the previous point.
fn push_spaced(points: &mut Vec<Point2>, pt: Point2, min_gap: f64) {
    if !points.last().is_some_and(|last| distance(last, &pt) <= min_gap) {
        points.push(pt);
    }
}

/// An Archimedean spiral winding outward from the center.
#[derive(Debug, Clone)]
pub struct Spiral {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    windings: u32,
    segments: u32,
    remove_center: bool,
    dist_scale: f64,
}

impl Spiral {
    /// Each winding gets `64 * detail` segments.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive or `windings` or
    /// `detail` is zero.
    pub fn new(center: Point2, radius: f64, windings: u32, detail: u32) -> Result<Self> {
        require_positive("radius", radius)?;
        require_count("windings", windings, 1)?;
        require_count("detail", detail, 1)?;
        Ok(Self {
            placement: Placement::open(),
            style: Style::default(),
            center,
            radius,
            windings,
            segments: SEGMENTS_PER_DETAIL * detail,
            remove_center: false,
            dist_scale: 1.0,
        })
    }

    /// Skips points within half a winding of the center, where the curve
    /// would otherwise bunch up.
    #[must_use]
    pub fn with_remove_center(mut self, remove_center: bool) -> Self {
        self.remove_center = remove_center;
        self
    }

    /// Values below `1` pack the outer windings closer together.
    #[must_use]
    pub fn with_dist_scale(mut self, dist_scale: f64) -> Self {
        self.dist_scale = dist_scale;
        self
    }
}

impl Shape for Spiral {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let r = self.radius;
        let sep = r / f64::from(self.windings);
        let step = 360.0 / f64::from(self.segments);
        let mut points = Vec::new();
        for j in 0..self.windings {
            for i in 0..=self.segments {
                let deg = f64::from(i) * step;
                let reach = f64::from(j) * sep + sep * deg / 360.0;
                let dist = reach * (r - reach * (1.0 - self.dist_scale)) / r;
                let pt = radial_point(dist, deg);
                let gap_ok = !points
                    .last()
                    .is_some_and(|last| distance(last, &pt) <= r * 0.01);
                if gap_ok && (!self.remove_center || reach > sep * 0.5) {
                    points.push(pt);
                }
            }
        }
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// A spiral whose windings straighten toward the bounding square as they
/// grow, ending on a partial winding.
#[derive(Debug, Clone)]
pub struct MorphSpiral {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    windings: u32,
    segments: u32,
}

impl MorphSpiral {
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive, `windings` is below
    /// two or `detail` is zero.
    pub fn new(center: Point2, radius: f64, windings: u32, detail: u32) -> Result<Self> {
        require_positive("radius", radius)?;
        require_count("windings", windings, 2)?;
        require_count("detail", detail, 1)?;
        Ok(Self {
            placement: Placement::open(),
            style: Style::default(),
            center,
            radius,
            windings,
            segments: SEGMENTS_PER_DETAIL * detail,
        })
    }

    /// Where the ray from the center at `deg` leaves the square of half
    /// size `radius`.
    fn square_edge(&self, deg: f64) -> Point2 {
        let dir = radial_point(1.0, deg);
        let reach = self.radius / dir.x.abs().max(dir.y.abs());
        Point2::from(dir.coords * reach)
    }
}

impl Shape for MorphSpiral {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let r = self.radius;
        let sep = r / f64::from(self.windings);
        let step = 360.0 / f64::from(self.segments);
        let span = f64::from(self.windings - 1);
        let mut points = Vec::new();
        for j in 0..self.windings {
            let count = if j == self.windings - 1 {
                (self.segments * 3).div_ceil(8)
            } else {
                self.segments
            };
            for i in 0..=count {
                let deg = f64::from(i) * step;
                let perc = deg / 360.0;
                let amt = ((f64::from(j) + perc) / span).powi(4);
                let pt = radial_point(f64::from(j) * sep + sep * perc, deg);
                let pt = lerp_points(&pt, &self.square_edge(deg), amt);
                push_spaced(&mut points, pt, r * 0.01);
            }
        }
        finish_points(points, &self.placement, local, &self.center)
    }
}
