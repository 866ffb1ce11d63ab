//! Union and subtraction of closed outlines, producing one welded segment
//! run suitable for plotting.

mod intersect;
mod select;
mod split;
mod weld;

pub use select::{KeepDecision, MergeMode, PieceRelation, SetRole};

use tracing::debug;

use crate::geometry::Segment;
use crate::math::polygon_2d::segment_within_polygon;
use crate::math::Vector2;
use crate::operations::order::center_segments;
use crate::shapes::{Segments, Shape};

use intersect::collect_cuts;
use select::{combine, should_keep_piece};
use split::split_set;
use weld::{drop_short_pieces, remove_orphans, weld_in_order};

/// Containment is tested on pieces trimmed by one percent at each end, so
/// pieces ending on another outline are judged by their interior.
const CONTAINMENT_SCALE: f64 = 1.01;

/// Nudges each input off the shared grid so coincident edges and vertices
/// from different outlines do not produce degenerate crossings.
fn jitter_offset(index: usize) -> Vector2 {
    #[allow(clippy::cast_precision_loss)]
    let d = 0.007_549 - index as f64 * 0.0017;
    Vector2::new(d, d)
}

/// Counters describing one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Cut points found across all segments.
    pub intersections: usize,
    /// Segments that were split at least once.
    pub split_segments: usize,
    /// Pieces discarded by the keep decision.
    pub deleted: usize,
    /// Joins closed by averaging two nearly equal ends.
    pub welds_averaged: usize,
    /// Places where no segment continued the run.
    pub unmatched_joins: usize,
    /// Pieces removed for being shorter than the weld tolerance.
    pub short_removed: usize,
    /// Short disconnected pieces removed by cleanup.
    pub orphans_removed: usize,
}

/// Result of [`MergeShapes::execute`].
#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub segments: Vec<Segment>,
    pub stats: MergeStats,
}

impl MergeOutput {
    /// Wraps the merged segments in a shape.
    #[must_use]
    pub fn into_shape(self) -> Segments {
        Segments::new(self.segments)
    }
}

/// Merges closed outlines into a single outline.
///
/// In union mode every piece lying inside another outline is removed. In
/// subtract mode the later outlines are cut out of the first: pieces of the
/// first inside a cutout are removed, and only cutout pieces inside the
/// first survive, reversed.
pub struct MergeShapes {
    sets: Vec<Vec<Segment>>,
    mode: MergeMode,
    center: bool,
    cleanup: bool,
    jitter: bool,
}

impl MergeShapes {
    /// Creates a union of the absolute outlines of `shapes`.
    #[must_use]
    pub fn new(shapes: &[&dyn Shape]) -> Self {
        Self::from_segment_sets(shapes.iter().map(|shape| shape.to_segments(false)).collect())
    }

    /// Creates a union of outlines given directly as segments.
    #[must_use]
    pub fn from_segment_sets(sets: Vec<Vec<Segment>>) -> Self {
        Self {
            sets,
            mode: MergeMode::Union,
            center: false,
            cleanup: false,
            jitter: true,
        }
    }

    /// Cuts the later outlines out of the first instead of joining them.
    #[must_use]
    pub fn subtract(mut self, subtract: bool) -> Self {
        self.mode = if subtract {
            MergeMode::Subtract
        } else {
            MergeMode::Union
        };
        self
    }

    /// Recenters the result on the average of its segment starts.
    #[must_use]
    pub fn center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Removes short pieces left disconnected by the merge.
    #[must_use]
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Offsets every input by a distinct sub-pixel amount before merging.
    /// On by default.
    #[must_use]
    pub fn jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Runs the merge.
    #[must_use]
    pub fn execute(&self) -> MergeOutput {
        let mut stats = MergeStats::default();

        let originals: Vec<Vec<Segment>> = if self.jitter {
            self.sets
                .iter()
                .enumerate()
                .map(|(idx, set)| {
                    let offset = jitter_offset(idx);
                    set.iter()
                        .map(|seg| Segment {
                            a: seg.a + offset,
                            b: seg.b + offset,
                            tags: seg.tags.clone(),
                        })
                        .collect()
                })
                .collect()
        } else {
            self.sets.clone()
        };

        // Step 1: crossings between every pair of outlines
        let cuts = collect_cuts(&originals);
        for set_cuts in &cuts {
            for seg_cuts in set_cuts {
                stats.intersections += seg_cuts.len();
                stats.split_segments += usize::from(!seg_cuts.is_empty());
            }
        }

        // Step 2: split at the crossings, then keep or drop each piece
        let mut kept = Vec::new();
        for (idx_a, (set, set_cuts)) in originals.iter().zip(&cuts).enumerate() {
            let source = SetRole::of(idx_a);
            for mut piece in split_set(set, set_cuts) {
                let decision = combine(
                    originals
                        .iter()
                        .enumerate()
                        .filter(|(idx_b, _)| *idx_b != idx_a)
                        .map(|(idx_b, other)| {
                            let relation = if segment_within_polygon(&piece, other, CONTAINMENT_SCALE) {
                                PieceRelation::Inside
                            } else {
                                PieceRelation::Outside
                            };
                            should_keep_piece(self.mode, source, SetRole::of(idx_b), relation)
                        }),
                );
                match decision {
                    KeepDecision::Keep => kept.push(piece),
                    KeepDecision::KeepReversed => {
                        piece.reverse();
                        kept.push(piece);
                    }
                    KeepDecision::Discard => stats.deleted += 1,
                }
            }
        }

        // Step 3: weld into runs and tidy up
        let mut segments = weld_in_order(kept, &mut stats);
        drop_short_pieces(&mut segments, &mut stats);
        if self.cleanup {
            remove_orphans(&mut segments, &mut stats);
        }
        if self.center {
            center_segments(&mut segments);
        }

        debug!(
            inputs = self.sets.len(),
            segments = segments.len(),
            intersections = stats.intersections,
            deleted = stats.deleted,
            unmatched_joins = stats.unmatched_joins,
            "merged outlines"
        );

        MergeOutput { segments, stats }
    }
}
