use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::geometry::Style;
use crate::math::Point2;

use super::{require_count, Placement, Shape};

type PointFn = dyn Fn(f64) -> Option<Point2>;

/// A shape sampled from a function of `t` in `[0, 1]`.
///
/// The function returns `None` to skip a sample. Points are used exactly
/// as produced: no placement or center is applied.
#[derive(Clone)]
pub struct ParametricShape {
    pub placement: Placement,
    pub style: Style,
    function: Rc<PointFn>,
    segments: u32,
}

impl ParametricShape {
    /// Samples `function` at `segments + 1` evenly spaced values of `t`,
    /// both ends included.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn new(function: impl Fn(f64) -> Option<Point2> + 'static, segments: u32) -> Result<Self> {
        require_count("segments", segments, 1)?;
        Ok(Self {
            placement: Placement::closed(),
            style: Style::default(),
            function: Rc::new(function),
            segments,
        })
    }
}

impl fmt::Debug for ParametricShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricShape")
            .field("placement", &self.placement)
            .field("style", &self.style)
            .field("segments", &self.segments)
            .finish_non_exhaustive()
    }
}

impl Shape for ParametricShape {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, _local: bool) -> Vec<Point2> {
        let segments = f64::from(self.segments);
        (0..=self.segments)
            .filter_map(|i| (self.function)(f64::from(i) / segments))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn samples_both_ends() {
        let line = ParametricShape::new(|t| Some(Point2::new(t * 10.0, 0.0)), 4).unwrap();
        let pts = line.to_points(false);
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[4].x, 10.0);
    }

    #[test]
    fn skipped_samples_are_dropped() {
        let half = ParametricShape::new(|t| (t <= 0.5).then(|| Point2::new(t, t)), 10).unwrap();
        assert_eq!(half.to_points(true).len(), 6);
        assert!(ParametricShape::new(|_| None, 0).is_err());
    }
}
