use crate::geometry::{Segment, Style};
use crate::math::point_2d::rotate_point_deg;
use crate::math::Point2;

use super::{Placement, Shape};

/// A free-form collection of segments that takes part in the shape API.
///
/// Merges, crops and offsets produce these. Segments are returned in their
/// stored order and direction; the placement only rotates and translates.
#[derive(Debug, Clone)]
pub struct Segments {
    pub placement: Placement,
    pub style: Style,
    segments: Vec<Segment>,
}

impl Segments {
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            placement: Placement::open(),
            style: Style::default(),
            segments,
        }
    }

    pub fn add(&mut self, segments: impl IntoIterator<Item = Segment>) {
        self.segments.extend(segments);
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<Segment> for Segments {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Shape for Segments {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    /// Both endpoints of every segment, in order.
    fn to_points(&self, local: bool) -> Vec<Point2> {
        self.to_segments(local)
            .into_iter()
            .flat_map(|seg| [seg.a, seg.b])
            .collect()
    }

    fn to_segments(&self, local: bool) -> Vec<Segment> {
        let mut segments = self.segments.clone();
        if !local {
            let Placement {
                pivot, rotation, ..
            } = self.placement;
            for seg in &mut segments {
                seg.a = rotate_point_deg(&seg.a, rotation) + pivot.coords;
                seg.b = rotate_point_deg(&seg.b, rotation) + pivot.coords;
            }
        }
        segments
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn collection_defaults_to_open() {
        let segs = Segments::new(vec![]);
        assert!(segs.placement.is_open);
        assert!(segs.is_empty());
    }

    #[test]
    fn placement_moves_segments_without_reordering() {
        let mut segs: Segments = [
            Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            Segment::new(Point2::new(5.0, 5.0), Point2::new(5.0, 6.0)),
        ]
        .into_iter()
        .collect();
        segs.placement.pivot = Point2::new(10.0, 0.0);

        let out = segs.to_segments(false);
        assert_relative_eq!(out[0].a.x, 10.0);
        assert_relative_eq!(out[1].b.y, 6.0);
        assert_eq!(segs.to_points(false).len(), 4);
        assert_relative_eq!(segs.to_segments(true)[0].a.x, 0.0);
    }
}
