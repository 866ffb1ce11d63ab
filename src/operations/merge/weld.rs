use std::collections::VecDeque;

use crate::geometry::Segment;
use crate::math::point_2d::points_equal;

use super::MergeStats;

/// Joins closer than this (one unit) are treated as the same point.
const WELD_SCALE: f64 = 10_000.0;

/// Pieces shorter than this are folded into their neighbor.
const MIN_PIECE_LENGTH: f64 = 0.1;

/// Chains `segments` so each one starts where the previous one ends.
///
/// The next segment is the first remaining one whose start lies within one
/// unit of the current end; a slightly broken join is closed by moving both
/// ends to their midpoint. With no match the next remaining segment starts a
/// new run.
pub fn weld_in_order(segments: Vec<Segment>, stats: &mut MergeStats) -> Vec<Segment> {
    let mut remaining: VecDeque<Segment> = segments.into();
    let Some(first) = remaining.pop_front() else {
        return Vec::new();
    };
    let mut ordered = vec![first];

    while !remaining.is_empty() {
        let Some(last) = ordered.last_mut() else {
            break;
        };
        let found = remaining
            .iter()
            .position(|seg| points_equal(&last.b, &seg.a, WELD_SCALE));
        let next = match found.and_then(|i| remaining.remove(i)) {
            Some(mut seg) => {
                if !points_equal(&last.b, &seg.a, 1.0) {
                    let mid = nalgebra::center(&last.b, &seg.a);
                    last.b = mid;
                    seg.a = mid;
                    stats.welds_averaged += 1;
                }
                seg
            }
            None => {
                stats.unmatched_joins += 1;
                match remaining.pop_front() {
                    Some(seg) => seg,
                    None => break,
                }
            }
        };
        ordered.push(next);
    }
    ordered
}

/// Drops pieces shorter than [`MIN_PIECE_LENGTH`], stretching the following
/// piece back to cover the gap when the two were joined.
pub fn drop_short_pieces(segments: &mut Vec<Segment>, stats: &mut MergeStats) {
    let mut i = segments.len();
    while i > 0 {
        i -= 1;
        if segments[i].length() >= MIN_PIECE_LENGTH {
            continue;
        }
        let seg = segments.remove(i);
        if let Some(next) = segments.get_mut(i) {
            if points_equal(&next.a, &seg.b, 1.0) {
                next.a = seg.a;
            }
        }
        stats.short_removed += 1;
    }
}

/// Removes short pieces with no neighbor on either end.
///
/// The first and last pieces count as short below 5 units, interior
/// pieces below 1000.
pub fn remove_orphans(segments: &mut Vec<Segment>, stats: &mut MergeStats) {
    let mut i = segments.len();
    while i > 0 {
        i -= 1;
        let max_len = if i == 0 || i == segments.len() - 1 {
            5.0
        } else {
            1000.0
        };
        let seg = &segments[i];
        if seg.length() >= max_len {
            continue;
        }
        let connected = segments.iter().enumerate().any(|(j, other)| {
            j != i
                && (points_equal(&seg.a, &other.b, WELD_SCALE)
                    || points_equal(&seg.b, &other.a, WELD_SCALE))
        });
        if !connected {
            segments.remove(i);
            stats.orphans_removed += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn weld_reorders_and_closes_gaps() {
        let mut stats = MergeStats::default();
        let ordered = weld_in_order(
            vec![
                seg(0.0, 0.0, 10.0, 0.0),
                seg(10.0, 10.0, 0.0, 10.0),
                seg(10.02, 0.0, 10.0, 10.0),
            ],
            &mut stats,
        );
        assert_eq!(ordered.len(), 3);
        assert_relative_eq!(ordered[1].a.x, 10.01, epsilon = 1e-9);
        assert_relative_eq!(ordered[0].b.x, 10.01, epsilon = 1e-9);
        assert_eq!(stats.welds_averaged, 1);
        assert_eq!(stats.unmatched_joins, 0);
    }

    #[test]
    fn short_piece_is_absorbed() {
        let mut stats = MergeStats::default();
        let mut segs = vec![seg(0.0, 0.0, 5.0, 0.0), seg(5.0, 0.0, 5.05, 0.0), seg(5.05, 0.0, 9.0, 0.0)];
        drop_short_pieces(&mut segs, &mut stats);
        assert_eq!(segs.len(), 2);
        assert_relative_eq!(segs[1].a.x, 5.0);
        assert_eq!(stats.short_removed, 1);
    }

    #[test]
    fn lonely_end_piece_is_removed() {
        let mut stats = MergeStats::default();
        let mut segs = vec![
            seg(0.0, 0.0, 10.0, 0.0),
            seg(10.0, 0.0, 10.0, 10.0),
            seg(10.0, 10.0, 0.0, 0.0),
            seg(50.0, 50.0, 52.0, 50.0),
        ];
        remove_orphans(&mut segs, &mut stats);
        assert_eq!(segs.len(), 3);
        assert_eq!(stats.orphans_removed, 1);
    }
}
