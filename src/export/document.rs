use crate::error::Result;
use crate::geometry::{BoundingBox, Curve, Segment, Style};
use crate::math::{Point2, Vector2};
use crate::shapes::Shape;

use super::color::ColorSampler;
use super::options::{RenderOptions, PX_PER_INCH};
use super::paths::{curve_path_data, fmt_number, lines_path_data, shape_path_data, Frame, PathStyle, PenMode};

/// Layer group ids, in document order.
pub const LAYERS: [&str; 6] = [
    "grid_layer",
    "skirt_layer",
    "title_layer",
    "paths_layer",
    "groups_layer",
    "outline_layer",
];

const TEMPLATE: &str = r#"<svg
  xmlns:svg="http://www.w3.org/2000/svg"
  xmlns="http://www.w3.org/2000/svg"
  xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
  style="background-color: {{bgcolor}}"
  width="{{w}}"
  height="{{h}}"
  viewBox="0 0 {{w}} {{h}}"
  version="1.1">
  <g id="grid_layer" inkscape:label="grid" inkscape:groupmode="layer"><!--grid--></g>
  <g id="skirt_layer" inkscape:label="skirt" inkscape:groupmode="layer"><!--skirt--></g>
  <g id="title_layer" inkscape:label="title" inkscape:groupmode="layer"><!--title--></g>
  <g id="paths_layer" inkscape:label="paths" inkscape:groupmode="layer"><!--paths--></g>
  <g id="groups_layer" inkscape:label="groups" inkscape:groupmode="layer"><!--groups--></g>
  <g id="outline_layer" inkscape:label="outlines" inkscape:groupmode="layer"><!--shapes--></g>
  <g id="debug_layer"><!--debug--></g>
</svg>
"#;

/// Something the exporter can draw.
#[derive(Clone, Copy)]
pub enum Drawable<'a> {
    Shape(&'a dyn Shape),
    Curve(&'a Curve),
}

impl<'a> From<&'a dyn Shape> for Drawable<'a> {
    fn from(shape: &'a dyn Shape) -> Self {
        Self::Shape(shape)
    }
}

impl<'a> From<&'a Curve> for Drawable<'a> {
    fn from(curve: &'a Curve) -> Self {
        Self::Curve(curve)
    }
}

impl Drawable<'_> {
    fn bounding_box(&self) -> BoundingBox {
        match self {
            Self::Shape(shape) => shape.bounding_box(),
            Self::Curve(curve) => curve.bounding_box(),
        }
    }

    fn points(&self) -> Vec<Point2> {
        match self {
            Self::Shape(shape) => shape.to_points(false),
            Self::Curve(curve) => curve.anchors(),
        }
    }

    fn style(&self) -> &Style {
        match self {
            Self::Shape(shape) => shape.style(),
            Self::Curve(curve) => &curve.style,
        }
    }
}

/// A drawable together with the stroke color picked by the sampler.
struct Item<'a> {
    drawable: Drawable<'a>,
    sampled: Option<String>,
}

impl Item<'_> {
    fn stroke(&self, fallback: &str) -> String {
        self.sampled
            .clone()
            .or_else(|| self.drawable.style().color.clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Renders shapes and curves into a layered SVG document.
pub struct SvgExporter {
    options: RenderOptions,
    sampler: Option<(Box<dyn ColorSampler>, f64)>,
}

impl SvgExporter {
    /// # Errors
    ///
    /// Returns an error if `options` fail validation.
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            sampler: None,
        })
    }

    /// Drops drawables whose sampled color is missing or not more opaque
    /// than `alpha_threshold`, and strokes the rest in their sampled color.
    #[must_use]
    pub fn with_sampler(mut self, sampler: impl ColorSampler + 'static, alpha_threshold: f64) -> Self {
        self.sampler = Some((Box::new(sampler), alpha_threshold));
        self
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn sample<'a>(&self, drawables: &[Drawable<'a>]) -> Vec<Item<'a>> {
        let Some((sampler, threshold)) = &self.sampler else {
            return drawables
                .iter()
                .map(|&drawable| Item { drawable, sampled: None })
                .collect();
        };
        drawables
            .iter()
            .filter_map(|&drawable| {
                let color = sampler.sample(&drawable.points())?;
                color.is_visible(*threshold).then(|| Item {
                    drawable,
                    sampled: Some(color.to_hex()),
                })
            })
            .collect()
    }

    /// Content scale and centering offset for the configured page.
    fn fit(&self, bb: &BoundingBox) -> (f64, Vector2) {
        let Some((doc_w, doc_h)) = self.options.document_px() else {
            return (1.0, Vector2::zeros());
        };
        if bb.width() <= 0.0 && bb.height() <= 0.0 {
            return (1.0, Vector2::zeros());
        }
        let room_w = doc_w - self.options.margin_px() * 2.0;
        let room_h = doc_h - self.options.margin_px() * 2.0;
        // A flat box fits by its width.
        if bb.height() <= 0.0 || bb.width() / bb.height() > room_w / room_h {
            let scale = room_w / bb.width();
            (scale, Vector2::new(0.0, (room_h - bb.height() * scale) * 0.5))
        } else {
            let scale = room_h / bb.height();
            (scale, Vector2::new((room_w - bb.width() * scale) * 0.5, 0.0))
        }
    }

    fn frame(&self, bb: &BoundingBox) -> Frame {
        let (scale, offset) = self.fit(bb);
        let nudge = Vector2::new(self.options.offset_x, self.options.offset_y) * PX_PER_INCH;
        Frame {
            min: bb.min(),
            scale,
            offset: offset + nudge,
            margin: self.options.margin_px(),
        }
    }

    /// Renders `drawables` into a complete SVG document.
    ///
    /// Closed shapes and outlines go to the outline layer at 1.5 times the
    /// stroke width. Grouped inputs each get a path in the groups layer.
    /// Everything else lands in the paths layer: plain open shapes share a
    /// single path, discrete ones and curves get their own.
    #[must_use]
    pub fn export(&self, drawables: &[Drawable<'_>]) -> String {
        let opts = &self.options;
        let items = self.sample(drawables);

        let boxes: Vec<BoundingBox> = items.iter().map(|item| item.drawable.bounding_box()).collect();
        let bb = if boxes.iter().all(BoundingBox::is_empty) {
            BoundingBox::new(0.0, 0.0, 0.0, 0.0)
        } else {
            BoundingBox::union_all(boxes.iter().filter(|b| !b.is_empty()))
        };
        let frame = self.frame(&bb);
        let pen = PenMode {
            back_and_forth: opts.draw_back_and_forth,
            no_pen_up: opts.no_pen_up,
            equal_scale: opts.equal_scale,
        };

        let mut outlines: Vec<&Item<'_>> = Vec::new();
        let mut groups: Vec<&Item<'_>> = Vec::new();
        let mut discrete: Vec<&Item<'_>> = Vec::new();
        let mut lines: Vec<&Item<'_>> = Vec::new();
        let mut curves: Vec<(&Item<'_>, &Curve)> = Vec::new();
        for item in &items {
            match item.drawable {
                Drawable::Curve(curve) => curves.push((item, curve)),
                Drawable::Shape(shape) => {
                    let style = shape.style();
                    if opts.force_to_shapes || !shape.placement().is_open || style.outline {
                        outlines.push(item);
                    } else if opts.force_grouped || style.group {
                        groups.push(item);
                    } else if style.discrete {
                        discrete.push(item);
                    } else {
                        lines.push(item);
                    }
                }
            }
        }

        let mut line_paths = String::new();
        if let Some(first) = lines.first() {
            let segments: Vec<Segment> = lines.iter().flat_map(|item| shape_segments(item)).collect();
            let width = first.drawable.style().width.unwrap_or(opts.stroke_width);
            let style = PathStyle::stroked(first.stroke(&opts.foreground_color), width);
            line_paths.push_str(&style.element(&lines_path_data(&segments, &frame, pen)));
        }
        for (item, curve) in &curves {
            let width = curve.style.width.unwrap_or(opts.stroke_width);
            let style = PathStyle::stroked(item.stroke(&opts.foreground_color), width);
            line_paths.push_str(&style.element(&curve_path_data(curve, &frame)));
        }
        line_paths.push_str(&self.outline_paths(&discrete, &frame, opts.stroke_width));
        let shape_paths = self.outline_paths(&outlines, &frame, opts.stroke_width * 1.5);

        let mut group_paths = String::new();
        for item in &groups {
            let color = opts.group_color.as_deref().unwrap_or(&opts.foreground_color);
            let style = PathStyle::stroked(item.stroke(color), item.drawable.style().width.unwrap_or(1.5));
            group_paths.push_str(&style.element(&lines_path_data(&shape_segments(item), &frame, pen)));
        }

        let (w, h) = opts.document_px().unwrap_or_else(|| {
            let margin = opts.margin_px() * 2.0;
            (bb.width() + margin, bb.height() + margin)
        });

        let debug = if opts.debug_points {
            debug_markers(&items, &frame)
        } else {
            String::new()
        };
        let grid = if opts.debug_grid > 0.0 {
            debug_grid(opts.debug_grid, opts.margin_px())
        } else {
            String::new()
        };
        let skirt = match opts.document_px() {
            Some((w, _)) if opts.draw_skirt => skirt_mark(w - 10.0),
            _ => String::new(),
        };

        tracing::debug!(
            inputs = drawables.len(),
            drawn = items.len(),
            outlines = outlines.len(),
            groups = groups.len(),
            lines = lines.len() + discrete.len(),
            curves = curves.len(),
            scale = frame.scale,
            "svg export"
        );

        TEMPLATE
            .replace("{{bgcolor}}", &opts.background_color)
            .replace("{{w}}", &w.to_string())
            .replace("{{h}}", &h.to_string())
            .replace("<!--grid-->", &grid)
            .replace("<!--skirt-->", &skirt)
            .replace("<!--title-->", "")
            .replace("<!--paths-->", &line_paths)
            .replace("<!--groups-->", &group_paths)
            .replace("<!--shapes-->", &shape_paths)
            .replace("<!--debug-->", &debug)
    }

    /// One path per outline. A fill color closes the outline and fills it.
    fn outline_paths(&self, items: &[&Item<'_>], frame: &Frame, width: f64) -> String {
        let mut out = String::new();
        for item in items {
            let segments = shape_segments(item);
            if segments.is_empty() {
                continue;
            }
            let style = item.drawable.style();
            let mut closed = match item.drawable {
                Drawable::Shape(shape) => !shape.placement().is_open,
                Drawable::Curve(_) => false,
            };
            let path_style = if let Some(fill) = &style.fill_color {
                closed = true;
                PathStyle {
                    stroke: fill.clone(),
                    fill: fill.clone(),
                    width: 1.0,
                }
            } else {
                PathStyle::stroked(item.stroke(&self.options.foreground_color), style.width.unwrap_or(width))
            };
            let data = shape_path_data(&segments, frame, closed, self.options.draw_back_and_forth);
            out.push_str(&path_style.element(&data));
        }
        out
    }
}

fn shape_segments(item: &Item<'_>) -> Vec<Segment> {
    match item.drawable {
        Drawable::Shape(shape) => shape.to_segments(false),
        Drawable::Curve(_) => Vec::new(),
    }
}

fn debug_markers(items: &[Item<'_>], frame: &Frame) -> String {
    let mut out = String::new();
    for item in items {
        for pt in item.drawable.points() {
            let p = frame.map(&pt);
            out.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"2\" fill=\"#336699\" />\n",
                fmt_number(p.x),
                fmt_number(p.y)
            ));
        }
    }
    let origin = frame.map(&Point2::origin());
    out.push_str(&format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"#cc3300\" />\n",
        fmt_number(origin.x),
        fmt_number(origin.y)
    ));
    out
}

/// Two-level grid pattern: major cells of `size` pixels split into minor
/// cells of `sqrt(size)`.
fn debug_grid(size: f64, margin: f64) -> String {
    let s = size.sqrt();
    let g = size;
    let m = margin;
    let m2 = m % s;
    format!(
        r#"<defs>
  <pattern id="smallGrid" width="{s}" height="{s}" patternUnits="userSpaceOnUse">
    <path d="M {a} {m2} L 0 {m2} M {m2} {a} L {m2} 0" fill="none" stroke="gray" stroke-width="2" />
  </pattern>
  <pattern id="grid" width="{g}" height="{g}" patternUnits="userSpaceOnUse">
    <rect width="{g}" height="{g}" fill="url(#smallGrid)"/>
    <path d="M {b} {m} L 0 {m} M {m} {b} L {m} 0" fill="none" stroke="gray" stroke-width="2"/>
  </pattern>
</defs>
<rect width="100%" height="100%" fill="url(#grid)" />
"#,
        a = g + m2,
        b = g + m,
    )
}

/// Corner mark used to register the pen against the page.
fn skirt_mark(w: f64) -> String {
    format!(
        r#"<path d="M {x0} 8 L {x0} 10 L {w} 10 L {w} 90 L {x1} 90" fill="none" stroke="red" stroke-width="2" />"#,
        x0 = w - 80.0,
        x1 = w + 2.0,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::export::color::Rgba;
    use crate::export::options::DocumentSize;
    use crate::shapes::{Rectangle, Segments};

    /// Inner markup of the layer group `id`.
    fn layer<'a>(svg: &'a str, id: &str) -> &'a str {
        let open = svg.find(&format!("<g id=\"{id}\"")).unwrap();
        let body = open + svg[open..].find('>').unwrap() + 1;
        let end = body + svg[body..].find("\n  <g id=").unwrap();
        svg[body..end].strip_suffix("</g>").unwrap()
    }

    /// Every number inside the `d` attributes of `markup`.
    fn path_numbers(markup: &str) -> Vec<f64> {
        markup
            .split("d=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .flat_map(str::split_whitespace)
            .filter_map(|token| token.parse().ok())
            .collect()
    }

    fn line(ax: f64, ay: f64, bx: f64, by: f64) -> Segments {
        Segments::new(vec![Segment::new(Point2::new(ax, ay), Point2::new(bx, by))])
    }

    #[test]
    fn empty_export_keeps_every_layer() {
        let svg = SvgExporter::new(RenderOptions::default()).unwrap().export(&[]);
        for id in LAYERS {
            assert!(svg.contains(&format!("<g id=\"{id}\"")), "missing {id}");
            assert_eq!(layer(&svg, id), "");
        }
        assert!(svg.contains("width=\"0\""));
        assert!(svg.contains("background-color: #ccc"));
        assert!(!svg.contains("<!--"));
        assert!(!svg.contains("{{"));
    }

    #[test]
    fn content_minimum_maps_to_the_margin() {
        let options = RenderOptions {
            margin: 0.5,
            ..RenderOptions::default()
        };
        let stroke = line(5.0, 5.0, 15.0, 5.0);
        let svg = SvgExporter::new(options).unwrap().export(&[Drawable::Shape(&stroke)]);
        assert!(layer(&svg, "paths_layer").contains("d=\"M 48.00 48.00 L 58.00 48.00 \""));
        assert!(svg.contains("width=\"106\""));
        assert!(svg.contains("height=\"96\""));
    }

    #[test]
    fn inputs_are_sorted_into_layers() {
        let square = Rectangle::new(Point2::new(5.0, 5.0), 10.0, 10.0);
        let mut grouped = line(0.0, 0.0, 10.0, 10.0);
        grouped.style.group = true;
        let curve = Curve::from_array(&[[[0.0, 10.0], [3.0, 10.0], [7.0, 0.0], [10.0, 0.0]]]);

        let exporter = SvgExporter::new(RenderOptions::default()).unwrap();
        let svg = exporter.export(&[Drawable::Shape(&square), Drawable::Shape(&grouped), Drawable::Curve(&curve)]);

        let outlines = layer(&svg, "outline_layer");
        assert!(outlines.contains("stroke-width=\"1.5\""));
        assert!(outlines.contains(" z\""));
        assert!(layer(&svg, "groups_layer").contains("M 0.00 0.00 L 10.00 10.00 "));
        assert!(layer(&svg, "paths_layer").contains("C 3.00 10.00 7.00 0.00 10.00 0.00 "));
    }

    #[test]
    fn page_fit_scales_and_centers() {
        let options = RenderOptions {
            document_size: Some(DocumentSize { w: 1.0, h: 2.0 }),
            ..RenderOptions::default()
        };
        let square = Rectangle::new(Point2::new(5.0, 5.0), 10.0, 10.0);
        let svg = SvgExporter::new(options).unwrap().export(&[Drawable::Shape(&square)]);
        assert!(svg.contains("width=\"96\""));
        assert!(svg.contains("height=\"192\""));
        let outlines = layer(&svg, "outline_layer");
        assert!(outlines.contains("0.00 48.00"));
        assert!(outlines.contains("96.00 144.00"));
    }

    #[test]
    fn placed_shapes_stay_on_the_page() {
        let mut moved = Rectangle::new(Point2::origin(), 10.0, 10.0);
        moved.placement.pivot = Point2::new(100.0, 100.0);
        let exporter = SvgExporter::new(RenderOptions::default()).unwrap();
        let svg = exporter.export(&[Drawable::Shape(&moved)]);
        assert!(svg.contains("width=\"10\""));
        let coords = path_numbers(layer(&svg, "outline_layer"));
        // five corners, the first repeated by the closing edge
        assert_eq!(coords.len(), 10);
        assert!(coords.iter().all(|&v| (0.0..=10.0).contains(&v)), "{coords:?}");

        let mut turned = Rectangle::new(Point2::origin(), 10.0, 10.0);
        turned.placement.rotation = 45.0;
        let svg = exporter.export(&[Drawable::Shape(&turned)]);
        let coords = path_numbers(layer(&svg, "outline_layer"));
        assert!(coords.iter().all(|&v| v >= 0.0), "{coords:?}");
        assert!(coords.iter().any(|v| v.abs() < 1e-9));
        let span = 10.0 * std::f64::consts::SQRT_2;
        assert!(coords.iter().all(|&v| v <= span + 0.01), "{coords:?}");
    }

    #[test]
    fn flat_content_fits_the_page_width() {
        let options = RenderOptions {
            document_size: Some(DocumentSize { w: 4.0, h: 4.0 }),
            ..RenderOptions::default()
        };
        let stroke = line(0.0, 0.0, 10.0, 0.0);
        let svg = SvgExporter::new(options.clone()).unwrap().export(&[Drawable::Shape(&stroke)]);
        assert!(layer(&svg, "paths_layer").contains("d=\"M 0.00 192.00 L 384.00 192.00 \""));

        let upright = line(0.0, 0.0, 0.0, 10.0);
        let svg = SvgExporter::new(options).unwrap().export(&[Drawable::Shape(&upright)]);
        assert!(layer(&svg, "paths_layer").contains("d=\"M 192.00 0.00 L 192.00 384.00 \""));
    }

    #[test]
    fn fill_color_closes_and_fills() {
        let mut strip = line(0.0, 0.0, 10.0, 0.0);
        strip.style.outline = true;
        strip.style.fill_color = Some("#f00".to_string());
        let svg = SvgExporter::new(RenderOptions::default()).unwrap().export(&[Drawable::Shape(&strip)]);
        let outlines = layer(&svg, "outline_layer");
        assert!(outlines.contains("fill=\"#f00\" stroke=\"#f00\" stroke-width=\"1\""));
        assert!(outlines.contains(" z\""));
    }

    #[test]
    fn sampler_filters_and_colors() {
        let near = line(0.0, 0.0, 10.0, 0.0);
        let far = line(200.0, 0.0, 210.0, 0.0);
        let sampler = |pts: &[Point2]| {
            pts.first().map(|p| {
                if p.x > 100.0 {
                    Rgba::new(0, 0, 0, 0.0)
                } else {
                    Rgba::opaque(0, 128, 255)
                }
            })
        };
        let exporter = SvgExporter::new(RenderOptions::default())
            .unwrap()
            .with_sampler(sampler, 0.5);
        let svg = exporter.export(&[Drawable::Shape(&near), Drawable::Shape(&far)]);
        let paths = layer(&svg, "paths_layer");
        assert!(paths.contains("stroke=\"#0080ff\""));
        assert!(!paths.contains("200"));
        assert!(svg.contains("width=\"10\""));
    }

    #[test]
    fn debug_overlays_are_opt_in() {
        let options = RenderOptions {
            debug_points: true,
            debug_grid: 100.0,
            draw_skirt: true,
            document_size: Some(DocumentSize { w: 4.0, h: 4.0 }),
            ..RenderOptions::default()
        };
        let stroke = line(0.0, 0.0, 10.0, 0.0);
        let svg = SvgExporter::new(options).unwrap().export(&[Drawable::Shape(&stroke)]);
        assert!(layer(&svg, "grid_layer").contains("pattern id=\"smallGrid\" width=\"10\""));
        assert!(layer(&svg, "skirt_layer").contains("stroke=\"red\""));
        assert_eq!(svg.matches("fill=\"#336699\"").count(), 2);
        assert!(svg.contains("fill=\"#cc3300\""));
    }
}
