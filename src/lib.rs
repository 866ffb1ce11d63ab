pub mod error;
pub mod export;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod operations;
pub mod shapes;

pub use error::{LineworkError, Result};
