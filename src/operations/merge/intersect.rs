use crate::geometry::Segment;
use crate::math::intersect_2d::segment_segments_intersections;
use crate::math::point_2d::points_equal;
use crate::math::Point2;

/// Cut points per segment, indexed `[set][segment]`.
pub type CutTable = Vec<Vec<Vec<Point2>>>;

/// Finds where every segment of every set crosses the other sets.
///
/// Touching contacts and hits on the segment's own endpoints are not cuts.
/// A point crossed by several sets is recorded once per set.
#[must_use]
pub fn collect_cuts(sets: &[Vec<Segment>]) -> CutTable {
    sets.iter()
        .enumerate()
        .map(|(idx_a, set_a)| {
            set_a
                .iter()
                .map(|seg| {
                    let mut cuts = Vec::new();
                    for (idx_b, set_b) in sets.iter().enumerate() {
                        if idx_a == idx_b {
                            continue;
                        }
                        cuts.extend(
                            segment_segments_intersections(seg, set_b, true, true)
                                .into_iter()
                                .map(|hit| hit.point)
                                .filter(|pt| {
                                    !points_equal(&seg.a, pt, 1.0) && !points_equal(&seg.b, pt, 1.0)
                                }),
                        );
                    }
                    cuts
                })
                .collect()
        })
        .collect()
}
