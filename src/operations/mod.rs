pub mod crop;
pub mod merge;
pub mod offset;
pub mod order;
pub mod smooth;

pub use crop::{crop_segments_to_bounding_box, crop_segments_to_shape, cut_shape_from_segments};
pub use merge::{MergeMode, MergeOutput, MergeShapes, MergeStats};
pub use offset::{offset_points, offset_segments};
pub use order::{center_segments, order_segments};
pub use smooth::{smooth_line, smooth_segments, Smoothing};
