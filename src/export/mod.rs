//! SVG document export.
//!
//! [`SvgExporter`] maps drawables into page space with a single [`Frame`]
//! and routes each one to a layer by its [`Style`](crate::geometry::Style)
//! and openness. Numbers are emitted with two decimals.

pub mod color;
pub mod diagnostics;
pub mod document;
pub mod options;
pub mod paths;

pub use color::{ColorSampler, Rgba};
pub use document::{Drawable, SvgExporter, LAYERS};
pub use options::{DocumentSize, RenderOptions, PX_PER_INCH};
pub use paths::Frame;
