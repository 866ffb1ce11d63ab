pub mod bounding_box;
pub mod curve;
pub mod segment;
pub mod style;

pub use bounding_box::BoundingBox;
pub use curve::{Curve, CurvePoint};
pub use segment::{
    points_to_closed_segments, reverse_segments, same_angle, same_angle_rev, segments_connected,
    segments_to_points, Segment,
};
pub use style::Style;
