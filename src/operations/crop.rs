//! Clipping segment sets against boxes and polygons.

use crate::geometry::{BoundingBox, Segment};
use crate::math::intersect_2d::segment_segments_intersections;
use crate::math::polygon_2d::point_within_polygon;
use crate::math::Point2;

/// Boundary crossings of `seg`, nearest to `seg.a` first.
fn crossings(seg: &Segment, border: &[Segment]) -> Vec<Point2> {
    let mut hits = segment_segments_intersections(seg, border, false, false);
    hits.sort_by(|x, y| x.distance.total_cmp(&y.distance));
    hits.into_iter().map(|hit| hit.point).collect()
}

/// Keeps the parts of each segment for which `inside` holds.
///
/// A segment with both ends outside survives only as the stretch between
/// its first and last crossing. A segment with one end outside is shortened
/// to the crossing nearest its inside end; if no crossing is found it is
/// kept whole.
fn keep_inside(segments: &[Segment], border: &[Segment], inside: impl Fn(&Point2) -> bool) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for seg in segments {
        let a_in = inside(&seg.a);
        let b_in = inside(&seg.b);
        if a_in && b_in {
            out.push(seg.clone());
            continue;
        }

        let hits = crossings(seg, border);
        let mut seg = seg.clone();
        match (a_in, b_in, hits.first(), hits.last()) {
            (false, false, Some(first), Some(last)) if hits.len() > 1 => {
                seg.a = *first;
                seg.b = *last;
            }
            (false, false, _, _) => continue,
            (true, false, Some(first), _) => seg.b = *first,
            (false, true, _, Some(last)) => seg.a = *last,
            _ => {}
        }
        out.push(seg);
    }
    out
}

/// Crops `segments` to the inclusive box `bb`, optionally appending the
/// box border as four extra segments.
#[must_use]
pub fn crop_segments_to_bounding_box(segments: &[Segment], bb: &BoundingBox, add_border: bool) -> Vec<Segment> {
    let border = bb.border();
    let mut out = keep_inside(segments, &border, |pt| bb.contains_point(pt));
    if add_border {
        out.extend(border);
    }
    out
}

/// Crops `segments` to the closed polygon `shape`.
#[must_use]
pub fn crop_segments_to_shape(segments: &[Segment], shape: &[Segment]) -> Vec<Segment> {
    keep_inside(segments, shape, |pt| point_within_polygon(pt, shape, false))
}

/// Removes the parts of `segments` that fall inside the closed polygon
/// `shape`.
///
/// Segments entirely inside are dropped. A segment passing through the
/// shape is split into the pieces before its first and after its last
/// crossing. Segments that merely straddle the boundary are shortened to
/// their outside part.
#[must_use]
pub fn cut_shape_from_segments(segments: &[Segment], shape: &[Segment]) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for seg in segments {
        let a_in = point_within_polygon(&seg.a, shape, false);
        let b_in = point_within_polygon(&seg.b, shape, false);
        if a_in && b_in {
            continue;
        }

        let hits = crossings(seg, shape);
        let (Some(first), Some(last)) = (hits.first().copied(), hits.last().copied()) else {
            out.push(seg.clone());
            continue;
        };
        match (a_in, b_in) {
            (false, false) if hits.len() > 1 => {
                out.push(Segment { b: first, ..seg.clone() });
                out.push(Segment { a: last, ..seg.clone() });
            }
            (true, false) => out.push(Segment { a: last, ..seg.clone() }),
            (false, true) => out.push(Segment { b: first, ..seg.clone() }),
            _ => out.push(seg.clone()),
        }
    }
    out
}
