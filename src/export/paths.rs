//! SVG path-data builders for the three kinds of drawable content.

use crate::geometry::{segments_connected, Curve, Segment};
use crate::math::point_2d::points_equal;
use crate::math::{Point2, Vector2};

/// Maps content coordinates to document pixels:
/// `(v - min) * scale + offset + margin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub min: Point2,
    pub scale: f64,
    pub offset: Vector2,
    pub margin: f64,
}

impl Frame {
    #[must_use]
    pub fn map(&self, pt: &Point2) -> Point2 {
        let margin = Vector2::new(self.margin, self.margin);
        Point2::from((pt - self.min) * self.scale + self.offset + margin)
    }

    /// `"x y"` of the mapped point, two decimals each.
    #[must_use]
    pub fn coord(&self, pt: &Point2) -> String {
        let p = self.map(pt);
        format!("{} {}", fmt_number(p.x), fmt_number(p.y))
    }
}

/// Rounds to two decimals and always prints both.
#[must_use]
pub fn fmt_number(v: f64) -> String {
    // adding zero turns -0.0 into 0.0
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    format!("{rounded:.2}")
}

/// Stroke and fill attributes of one `<path>`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub stroke: String,
    pub fill: String,
    pub width: f64,
}

impl PathStyle {
    #[must_use]
    pub fn stroked(stroke: impl Into<String>, width: f64) -> Self {
        Self {
            stroke: stroke.into(),
            fill: "none".to_string(),
            width,
        }
    }

    #[must_use]
    pub fn element(&self, data: &str) -> String {
        format!(
            "<g><path d=\"{data}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" /></g>\n",
            self.fill, self.stroke, self.width
        )
    }
}

/// Switches that change how runs are joined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenMode {
    pub back_and_forth: bool,
    pub no_pen_up: bool,
    pub equal_scale: f64,
}

/// One path for a whole segment soup.
///
/// A new `M` starts wherever a segment does not begin at the previous end
/// (at `equal_scale`), unless pen-up suppression is on. In back-and-forth
/// mode each finished run is first retraced in reverse.
#[must_use]
pub fn lines_path_data(segments: &[Segment], frame: &Frame, pen: PenMode) -> String {
    let mut data = String::new();
    let mut run: Vec<String> = Vec::new();

    for (i, seg) in segments.iter().enumerate() {
        let breaks = i == 0 || (!pen.no_pen_up && !points_equal(&segments[i - 1].b, &seg.a, pen.equal_scale));
        if breaks {
            if pen.back_and_forth && !run.is_empty() {
                for step in run.iter().rev() {
                    data.push_str(&format!("L {step} "));
                }
            }
            let start = frame.coord(&seg.a);
            data.push_str(&format!("M {start} "));
            run.clear();
            run.push(start);
        }
        let end = frame.coord(&seg.b);
        data.push_str(&format!("L {end} "));
        run.push(end);
    }

    if pen.back_and_forth && run.len() > 1 {
        for (k, step) in run.iter().rev().enumerate() {
            let command = if k == 0 { 'M' } else { 'L' };
            data.push_str(&format!("{command} {step} "));
        }
    }
    data
}

/// Path data for one shape outline.
///
/// Disconnected segments start a new subpath. Closed outlines end with
/// `z`; in back-and-forth mode the final run is retraced first.
#[must_use]
pub fn shape_path_data(segments: &[Segment], frame: &Frame, closed: bool, back_and_forth: bool) -> String {
    let mut data = String::new();
    let mut run: Vec<String> = Vec::new();

    for (i, seg) in segments.iter().enumerate() {
        if i == 0 || !segments_connected(&segments[i - 1], seg, 1.0) {
            let start = frame.coord(&seg.a);
            data.push_str(&format!("M {start} "));
            run.clear();
            run.push(start);
        }
        let end = frame.coord(&seg.b);
        data.push_str(&format!("L {end} "));
        run.push(end);
    }

    if back_and_forth && run.len() > 1 {
        for step in run.iter().rev() {
            data.push_str(&format!("L {step} "));
        }
    }
    if closed && !data.is_empty() {
        data.push('z');
    }
    data
}

/// Path data for a Bezier chain: one `M` then a `C` per span.
#[must_use]
pub fn curve_path_data(curve: &Curve, frame: &Frame) -> String {
    let mut data = String::new();
    for (i, span) in curve.points.iter().enumerate() {
        if i == 0 {
            data.push_str(&format!("M {} ", frame.coord(&span.start())));
        }
        data.push_str(&format!(
            "C {} {} {} ",
            frame.coord(&span.control1()),
            frame.coord(&span.control2()),
            frame.coord(&span.end())
        ));
    }
    data
}
