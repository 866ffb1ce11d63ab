use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Document units are inches; SVG user units are CSS pixels.
pub const PX_PER_INCH: f64 = 96.0;

/// Target page size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentSize {
    pub w: f64,
    pub h: f64,
}

/// Everything the SVG exporter needs to know besides the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub background_color: String,
    pub foreground_color: String,
    pub stroke_width: f64,
    /// Fit the drawing onto a page of this size. Without it the document
    /// is exactly as large as the content plus margins.
    pub document_size: Option<DocumentSize>,
    /// Inches, on every side.
    pub margin: f64,
    /// Extra translation in inches.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Retrace each finished run backwards instead of lifting the pen.
    pub draw_back_and_forth: bool,
    /// Join disconnected runs of the shared line path with straight lines.
    pub no_pen_up: bool,
    /// Scale handed to point equality when deciding whether runs connect.
    pub equal_scale: f64,
    /// Draw everything as outlines.
    pub force_to_shapes: bool,
    /// Draw every non-outline input as its own group.
    pub force_grouped: bool,
    /// Stroke for grouped inputs, the foreground color when unset.
    pub group_color: Option<String>,
    /// Mark every point and the origin with a dot.
    pub debug_points: bool,
    /// Grid cell size in pixels for a debug grid overlay; `0` turns it off.
    pub debug_grid: f64,
    /// Draw the registration skirt in the page corner.
    pub draw_skirt: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background_color: "#ccc".to_string(),
            foreground_color: "#000".to_string(),
            stroke_width: 1.0,
            document_size: None,
            margin: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            draw_back_and_forth: false,
            no_pen_up: false,
            equal_scale: 1.0,
            force_to_shapes: false,
            force_grouped: false,
            group_color: None,
            debug_points: false,
            debug_grid: 0.0,
            draw_skirt: false,
        }
    }
}

impl RenderOptions {
    /// Reads options from a JSON object. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LineworkError::Config`](crate::LineworkError::Config) for
    /// malformed JSON and [`ExportError::InvalidOptions`] for values that
    /// fail [`RenderOptions::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that sizes are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidOptions`] naming the first bad field.
    pub fn validate(&self) -> std::result::Result<(), ExportError> {
        let bad = |what: &str| Err(ExportError::InvalidOptions(what.to_string()));
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return bad("strokeWidth must be positive");
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return bad("margin must not be negative");
        }
        if !(self.offset_x.is_finite() && self.offset_y.is_finite()) {
            return bad("offset must be finite");
        }
        if !(self.equal_scale.is_finite() && self.equal_scale > 0.0) {
            return bad("equalScale must be positive");
        }
        if !(self.debug_grid.is_finite() && self.debug_grid >= 0.0) {
            return bad("debugGrid must not be negative");
        }
        if let Some(size) = self.document_size {
            if !(size.w.is_finite() && size.h.is_finite() && size.w > 0.0 && size.h > 0.0) {
                return bad("documentSize must be positive");
            }
            if size.w * PX_PER_INCH <= self.margin_px() * 2.0 || size.h * PX_PER_INCH <= self.margin_px() * 2.0 {
                return bad("margins leave no room on the page");
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn margin_px(&self) -> f64 {
        self.margin * PX_PER_INCH
    }

    /// Page size in pixels, when one is configured.
    #[must_use]
    pub fn document_px(&self) -> Option<(f64, f64)> {
        self.document_size
            .map(|size| (size.w * PX_PER_INCH, size.h * PX_PER_INCH))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::LineworkError;

    #[test]
    fn json_fills_in_defaults() {
        let options = RenderOptions::from_json(r#"{"strokeWidth": 2, "documentSize": {"w": 8.5, "h": 11}}"#).unwrap();
        assert!((options.stroke_width - 2.0).abs() < f64::EPSILON);
        assert_eq!(options.background_color, "#ccc");
        assert_eq!(options.document_px(), Some((816.0, 1056.0)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = RenderOptions::from_json("{ strokeWidth: }").unwrap_err();
        assert!(matches!(err, LineworkError::Config(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = RenderOptions::from_json(r#"{"strokeWidth": 0}"#).unwrap_err();
        assert!(matches!(err, LineworkError::Export(ExportError::InvalidOptions(_))));

        let cramped = RenderOptions {
            margin: 1.0,
            document_size: Some(DocumentSize { w: 2.0, h: 4.0 }),
            ..RenderOptions::default()
        };
        assert!(cramped.validate().is_err());
        assert!(RenderOptions::default().validate().is_ok());
    }
}
