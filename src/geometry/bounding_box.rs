use crate::math::point_2d::points_equal;
use crate::math::Point2;

use super::Segment;

/// Axis-aligned bounds.
///
/// [`BoundingBox::empty`] is an inverted sentinel (min = +inf, max = -inf)
/// that any included point overwrites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The inverted sentinel box containing nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }

    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Self {
        let mut bb = Self::empty();
        for pt in points {
            bb.include_point(pt);
        }
        bb
    }

    #[must_use]
    pub fn from_segments(segments: &[Segment]) -> Self {
        Self::from_points(segments.iter().flat_map(|seg| [&seg.a, &seg.b]))
    }

    /// Union of several boxes; empty boxes are skipped.
    #[must_use]
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a BoundingBox>) -> Self {
        let mut bb = Self::empty();
        for other in boxes {
            bb.include_box(other);
        }
        bb
    }

    pub fn include_point(&mut self, pt: &Point2) {
        self.min_x = self.min_x.min(pt.x);
        self.min_y = self.min_y.min(pt.y);
        self.max_x = self.max_x.max(pt.x);
        self.max_y = self.max_y.max(pt.y);
    }

    pub fn include_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// `true` while no point has been included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).abs()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).abs()
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.min_x + (self.max_x - self.min_x) * 0.5,
            self.min_y + (self.max_y - self.min_y) * 0.5,
        )
    }

    #[must_use]
    pub fn min(&self) -> Point2 {
        Point2::new(self.min_x, self.min_y)
    }

    #[must_use]
    pub fn max(&self) -> Point2 {
        Point2::new(self.max_x, self.max_y)
    }

    /// Corner-wise equality at `scale` (10 is the usual loose comparison).
    #[must_use]
    pub fn equals(&self, other: &BoundingBox, scale: f64) -> bool {
        points_equal(&self.min(), &other.min(), scale)
            && points_equal(&self.max(), &other.max(), scale)
    }

    /// Inclusive overlap test.
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.max_x >= other.min_x
            && self.max_y >= other.min_y
            && self.min_x <= other.max_x
            && self.min_y <= other.max_y
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains_point(&self, pt: &Point2) -> bool {
        pt.x >= self.min_x && pt.y >= self.min_y && pt.x <= self.max_x && pt.y <= self.max_y
    }

    /// Returns the box with every bound rounded to the nearest integer.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::new(
            self.min_x.round(),
            self.min_y.round(),
            self.max_x.round(),
            self.max_y.round(),
        )
    }

    /// Border of the box as four segments running
    /// top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn border(&self) -> [Segment; 4] {
        let tl = Point2::new(self.min_x, self.min_y);
        let tr = Point2::new(self.max_x, self.min_y);
        let br = Point2::new(self.max_x, self.max_y);
        let bl = Point2::new(self.min_x, self.max_y);
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_box_is_inverted_until_filled() {
        let mut bb = BoundingBox::empty();
        assert!(bb.is_empty());
        bb.include_point(&Point2::new(2.0, -1.0));
        bb.include_point(&Point2::new(-4.0, 3.0));
        assert!(!bb.is_empty());
        assert!(bb.min_x <= bb.max_x && bb.min_y <= bb.max_y);
        assert_relative_eq!(bb.width(), 6.0);
        assert_relative_eq!(bb.height(), 4.0);
        assert_eq!(bb.center(), Point2::new(-1.0, 1.0));
    }

    #[test]
    fn union_skips_empty_boxes() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::empty();
        let u = BoundingBox::union_all([&a, &b]);
        assert_eq!(u, a);
    }

    #[test]
    fn overlap_is_inclusive() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(1.0, 1.0, 2.0, 2.0);
        let c = BoundingBox::new(1.5, 0.0, 2.0, 0.5);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains_point(&Point2::new(1.0, 0.5)));
    }

    #[test]
    fn loose_equality() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(0.000_4, 0.0, 10.000_4, 10.0);
        assert!(a.equals(&b, 10.0));
        assert!(!a.equals(&b, 1.0));
    }
}
