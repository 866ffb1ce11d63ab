use crate::geometry::Segment;
use crate::math::point_2d::distance_squared;
use crate::math::Point2;

/// Splits each segment of `set` at its cut points, ordered from `a`.
///
/// Uncut segments pass through unchanged. Pieces inherit the tags of the
/// segment they came from.
#[must_use]
pub fn split_set(set: &[Segment], cuts: &[Vec<Point2>]) -> Vec<Segment> {
    let mut pieces = Vec::with_capacity(set.len());
    for (seg, seg_cuts) in set.iter().zip(cuts) {
        if seg_cuts.is_empty() {
            pieces.push(seg.clone());
            continue;
        }
        let mut stops = seg_cuts.clone();
        stops.sort_by(|p, q| {
            distance_squared(&seg.a, p).total_cmp(&distance_squared(&seg.a, q))
        });
        stops.insert(0, seg.a);
        stops.push(seg.b);
        pieces.extend(stops.windows(2).map(|pair| Segment {
            a: pair[0],
            b: pair[1],
            tags: seg.tags.clone(),
        }));
    }
    pieces
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pieces_follow_the_segment() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).with_tag("layer", "a");
        let cuts = vec![vec![Point2::new(7.0, 0.0), Point2::new(3.0, 0.0)]];
        let pieces = split_set(&[seg], &cuts);
        assert_eq!(pieces.len(), 3);
        assert_relative_eq!(pieces[0].b.x, 3.0);
        assert_relative_eq!(pieces[1].b.x, 7.0);
        assert_relative_eq!(pieces[2].b.x, 10.0);
        assert_eq!(pieces[2].tags.get("layer").map(String::as_str), Some("a"));
    }
}
