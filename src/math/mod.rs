pub mod circle_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod point_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance for angle comparisons and degenerate segment lengths.
pub const EPSILON: f64 = 0.001;

/// Fixed-point precision used when comparing coordinates (four decimals).
pub const POINT_PRECISION: f64 = 10_000.0;
