use crate::math::Point2;

use super::{BoundingBox, Style};

/// One cubic Bezier span: start `(x, y)`, controls `(cx, cy)` and
/// `(cx2, cy2)`, end `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    pub cx: f64,
    pub cy: f64,
    pub cx2: f64,
    pub cy2: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CurvePoint {
    #[must_use]
    #[allow(clippy::too_many_arguments, clippy::similar_names)]
    pub fn new(x: f64, y: f64, cx: f64, cy: f64, cx2: f64, cy2: f64, x2: f64, y2: f64) -> Self {
        Self {
            x,
            y,
            cx,
            cy,
            cx2,
            cy2,
            x2,
            y2,
        }
    }

    /// Builds a span from `[start, control1, control2, end]` coordinate pairs.
    #[must_use]
    pub fn from_array(pairs: [[f64; 2]; 4]) -> Self {
        let [start, c1, c2, end] = pairs;
        Self::new(start[0], start[1], c1[0], c1[1], c2[0], c2[1], end[0], end[1])
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    #[must_use]
    pub fn control1(&self) -> Point2 {
        Point2::new(self.cx, self.cy)
    }

    #[must_use]
    pub fn control2(&self) -> Point2 {
        Point2::new(self.cx2, self.cy2)
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        Point2::new(self.x2, self.y2)
    }
}

/// A chain of Bezier spans drawn as one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub points: Vec<CurvePoint>,
    pub style: Style,
}

impl Curve {
    #[must_use]
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self {
            points,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn from_array(spans: &[[[f64; 2]; 4]]) -> Self {
        Self::new(spans.iter().copied().map(CurvePoint::from_array).collect())
    }

    /// Bounds of the span anchors (start and end points). Control points
    /// are not included.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for pt in &self.points {
            bb.include_point(&pt.start());
            bb.include_point(&pt.end());
        }
        bb
    }

    /// Span start points, the anchors the exporter marks in debug mode.
    #[must_use]
    pub fn anchors(&self) -> Vec<Point2> {
        self.points.iter().map(CurvePoint::start).collect()
    }
}
