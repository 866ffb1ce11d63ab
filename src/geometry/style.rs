use serde::{Deserialize, Serialize};

/// Presentation metadata carried by shapes and curves into the exporter.
///
/// None of these fields affect geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    /// Stroke color, any SVG color string.
    pub color: Option<String>,
    /// Fill color. Setting it forces the shape to be drawn closed and filled.
    pub fill_color: Option<String>,
    /// Stroke width override.
    pub width: Option<f64>,
    /// Draw as an outline even when the shape is open.
    pub outline: bool,
    /// Draw as its own path instead of joining the shared line path.
    pub discrete: bool,
    /// Draw in the groups layer.
    pub group: bool,
}

impl Style {
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}
