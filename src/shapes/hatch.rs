use crate::error::Result;
use crate::geometry::{Segment, Style};
use crate::math::point_2d::subdivide_by_distance;
use crate::math::polygon_2d::polygon_is_clockwise;
use crate::math::Point2;

use super::{finish_points, link_points, require_count, Placement, Shape};

/// A boustrophedon of `steps` rows, each crossing the full width through
/// the middle.
#[derive(Debug, Clone)]
pub struct SquareWave {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    width: f64,
    height: f64,
    steps: u32,
}

impl SquareWave {
    /// Zero `steps` draws only the left edge.
    #[must_use]
    pub fn new(center: Point2, width: f64, height: f64, steps: u32) -> Self {
        Self {
            placement: Placement::open(),
            style: Style::default(),
            center,
            width,
            height,
            steps,
        }
    }
}

impl Shape for SquareWave {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        let mut points = vec![Point2::new(-hw, -hh)];
        if self.steps > 0 {
            let delta = self.height / f64::from(self.steps);
            for i in 0..self.steps {
                let y = -hh + delta * f64::from(i);
                let mut row = [Point2::new(-hw, y), Point2::new(0.0, y), Point2::new(hw, y)];
                if i % 2 != 0 {
                    row.reverse();
                }
                points.extend(row);
            }
        }
        points.push(Point2::new(-hw, hh));
        finish_points(points, &self.placement, local, &self.center)
    }
}

/// Parallel hatch lines filling the square of half size `radius`.
///
/// Rows alternate direction. By default only the rows themselves become
/// segments; `connected` keeps the links between rows, and `dashed` keeps
/// every other subdivided piece in a staggered pattern.
#[derive(Debug, Clone)]
pub struct LineHatch {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    radius: f64,
    steps: u32,
    division_distance: f64,
    connected: bool,
    dashed: bool,
}

impl LineHatch {
    /// # Errors
    ///
    /// Returns an error if `steps` is zero.
    pub fn new(center: Point2, radius: f64, steps: u32) -> Result<Self> {
        require_count("steps", steps, 1)?;
        Ok(Self {
            placement: Placement::open(),
            style: Style::default(),
            center,
            radius,
            steps,
            division_distance: 0.0,
            connected: false,
            dashed: false,
        })
    }

    #[must_use]
    pub fn with_division_distance(mut self, distance: f64) -> Self {
        self.division_distance = distance;
        self
    }

    #[must_use]
    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Dashes are never longer than the row spacing.
    #[must_use]
    pub fn with_dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    fn division(&self) -> f64 {
        if self.dashed {
            self.division_distance
                .min(self.radius / f64::from(self.steps))
        } else {
            self.division_distance
        }
    }

    /// Local row points with the row index of each.
    fn rows(&self) -> (Vec<Point2>, Vec<u32>) {
        let r = self.radius;
        let delta = r * 2.0 / f64::from(self.steps);
        let division = self.division();
        let mut points = Vec::new();
        let mut rows = Vec::new();
        for i in 0..self.steps {
            let y = -r + delta * f64::from(i);
            let (a, b) = (Point2::new(-r, y), Point2::new(r, y));
            let mut row = if division > 0.0 {
                subdivide_by_distance(&a, &b, division)
            } else {
                vec![a, b]
            };
            if i % 2 == 0 {
                row.reverse();
            }
            rows.extend(std::iter::repeat(i).take(row.len()));
            points.extend(row);
        }
        (points, rows)
    }
}

impl Shape for LineHatch {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        finish_points(self.rows().0, &self.placement, local, &self.center)
    }

    fn to_segments(&self, local: bool) -> Vec<Segment> {
        let mut points = self.to_points(local);
        if self.connected {
            return link_points(points, &self.placement);
        }

        let mut rows = self.rows().1;
        if polygon_is_clockwise(&points) != self.placement.is_inverted {
            points.reverse();
            rows.reverse();
        }
        let segments: Vec<Segment> = (1..points.len())
            .filter(|&k| rows[k - 1] == rows[k])
            .map(|k| Segment::new(points[k - 1], points[k]))
            .collect();
        if !self.dashed {
            return segments;
        }

        let per_row = (1..points.len())
            .filter(|&k| rows[k - 1] == 0 && rows[k] == 0)
            .count();
        if per_row == 0 {
            return segments;
        }
        segments
            .chunks(per_row)
            .enumerate()
            .flat_map(|(row, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .filter(move |(idx, _)| (row + idx + per_row % 2) % 2 == 0)
                    .map(|(_, seg)| seg.clone())
            })
            .collect()
    }
}

/// A paperclip-like coil: half circles alternating between two centers,
/// each one half a step wider than the last.
#[derive(Debug, Clone)]
pub struct Paperclip {
    pub placement: Placement,
    pub style: Style,
    center: Point2,
    width: f64,
    height: f64,
    steps: u32,
    enclose: bool,
}

impl Paperclip {
    /// The coil runs along the longer of `width` and `height`.
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is zero.
    pub fn new(center: Point2, width: f64, height: f64, steps: u32) -> Result<Self> {
        require_count("steps", steps, 1)?;
        Ok(Self {
            placement: Placement::open(),
            style: Style::default(),
            center,
            width,
            height,
            steps,
            enclose: false,
        })
    }

    /// Finishes with a last half circle instead of a straight tail.
    #[must_use]
    pub fn with_enclose(mut self, enclose: bool) -> Self {
        self.enclose = enclose;
        self
    }
}

/// Half circle of `radius` around `center` from `from` to `to` degrees
/// (standard orientation), sampled every two degrees, end excluded.
fn half_turn(points: &mut Vec<Point2>, center: &Point2, radius: f64, from: i32, to: i32) {
    for deg in (from..to).step_by(2) {
        let rad = f64::from(deg).to_radians();
        points.push(Point2::new(center.x + rad.cos() * radius, center.y + rad.sin() * radius));
    }
}

impl Shape for Paperclip {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn to_points(&self, local: bool) -> Vec<Point2> {
        let r = self.width.min(self.height) * 0.5;
        let len = (self.width - self.height).abs() * 0.5;
        let half_step = r * 2.0 / f64::from(self.steps) * 0.5;
        let (left, right) = (-len, len);

        let mut radius = 0.0;
        let mut turn = Point2::origin();
        let mut points = vec![Point2::new(left, 0.0)];
        for _ in 0..self.steps {
            radius += half_step;
            turn.x = right;
            turn.y += half_step;
            half_turn(&mut points, &turn, radius, -90, 90);

            radius += half_step;
            turn.x = left;
            turn.y -= half_step;
            half_turn(&mut points, &turn, radius, 90, 270);
        }

        if self.enclose {
            turn.x = right;
            half_turn(&mut points, &turn, radius, -90, 90);
        } else {
            points.push(Point2::new(right, -radius));
        }

        if self.width < self.height {
            for pt in &mut points {
                *pt = Point2::new(pt.y, pt.x);
            }
        }
        finish_points(points, &self.placement, local, &self.center)
    }
}
