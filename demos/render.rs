//! Renders a small sample drawing to stdout as SVG.
//!
//! ```text
//! cargo run --example render > out.svg
//! RUST_LOG=linework=debug cargo run --example render > out.svg
//! ```
//!
//! The drawing combines a merged outline, a spiral cut by a star, and flow
//! lines traced through a triangulated point grid.

use linework::export::{Drawable, RenderOptions, SvgExporter};
use linework::geometry::Segment;
use linework::math::Point2;
use linework::mesh::{triangulate, FindPaths, MeshGraph, PathOptions};
use linework::operations::{cut_shape_from_segments, smooth_segments, MergeShapes, Smoothing};
use linework::shapes::{Circle, Rectangle, Segments, Shape, Spiral, Star};

fn grid_points(cols: u32, rows: u32, spacing: f64) -> Vec<Point2> {
    let mut points = Vec::new();
    for j in 0..rows {
        for i in 0..cols {
            // stagger odd rows so the triangulation is not degenerate
            let shift = if j % 2 == 1 { spacing * 0.5 } else { 0.0 };
            points.push(Point2::new(
                f64::from(i) * spacing + shift,
                f64::from(j) * spacing * 0.866,
            ));
        }
    }
    points
}

fn main() -> linework::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("render=info".parse().unwrap_or_default())
        .add_directive("linework=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let frame = Rectangle::new(Point2::new(150.0, 150.0), 260.0, 200.0);
    let badge = Circle::new(Point2::new(280.0, 60.0), 40.0, 48)?;
    let inputs: [&dyn Shape; 2] = [&frame, &badge];
    let merged = MergeShapes::new(&inputs).cleanup(true).execute();
    tracing::info!(stats = ?merged.stats, "outline merged");
    let mut outline = merged.into_shape();
    outline.style.outline = true;

    let spiral = Spiral::new(Point2::new(150.0, 150.0), 80.0, 8, 1)?;
    let star = Star::new(Point2::new(150.0, 150.0), 15.0, 35.0, 5)?;
    let cut = cut_shape_from_segments(&spiral.to_segments(false), &star.to_segments(false));
    let swirl = Segments::new(cut);

    let graph = MeshGraph::from_triangles(&triangulate(&grid_points(24, 20, 12.0))?)?;
    let found = FindPaths::new(PathOptions::default()).execute(&graph);
    tracing::info!(
        paths = found.paths.len(),
        iterations = found.iterations,
        exhausted = found.exhausted,
        "flow lines traced"
    );
    let flow_segments: Vec<Segment> = found
        .points(&graph)
        .iter()
        .flat_map(|path| path.windows(2).map(|w| Segment::new(w[0], w[1])).collect::<Vec<_>>())
        .collect();
    let mut flow = Segments::new(smooth_segments(&flow_segments, &Smoothing::new(2).with_min_dist(1.0)));
    flow.placement.pivot = Point2::new(0.0, 320.0);
    flow.style.group = true;

    let options = RenderOptions::from_json(r#"{"margin": 0.25, "documentSize": {"w": 8.5, "h": 11}}"#)?;
    let exporter = SvgExporter::new(options)?;
    let svg = exporter.export(&[
        Drawable::Shape(&outline),
        Drawable::Shape(&swirl),
        Drawable::Shape(&flow),
    ]);
    println!("{svg}");
    Ok(())
}
