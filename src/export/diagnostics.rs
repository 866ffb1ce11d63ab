//! JSON dumps of intermediate geometry for offline inspection.
//!
//! Coordinates are rounded to one decimal to keep the dumps small and
//! stable across runs.

use serde::Serialize;

use crate::error::{ExportError, Result};
use crate::math::Point2;
use crate::mesh::Triangle;

#[derive(Debug, Serialize)]
struct Xy {
    x: f64,
    y: f64,
}

impl Xy {
    fn new(x: f64, y: f64) -> Self {
        let round = |v: f64| (v * 10.0).round() / 10.0 + 0.0;
        Self { x: round(x), y: round(y) }
    }
}

impl From<&Point2> for Xy {
    fn from(pt: &Point2) -> Self {
        Self::new(pt.x, pt.y)
    }
}

#[derive(Debug, Serialize)]
struct Tri {
    a: Xy,
    b: Xy,
    c: Xy,
}

fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string(value).map_err(ExportError::Diagnostics)?)
}

/// `[{"x":..,"y":..}, ...]`
///
/// # Errors
///
/// Returns [`ExportError::Diagnostics`] if serialization fails.
pub fn points_json(points: &[Point2]) -> Result<String> {
    let out: Vec<Xy> = points.iter().map(Xy::from).collect();
    to_json(&out)
}

/// One point array per path.
///
/// # Errors
///
/// Returns [`ExportError::Diagnostics`] if serialization fails.
pub fn paths_json(paths: &[Vec<Point2>]) -> Result<String> {
    let out: Vec<Vec<Xy>> = paths
        .iter()
        .map(|path| path.iter().map(Xy::from).collect())
        .collect();
    to_json(&out)
}

/// `[{"a":{..},"b":{..},"c":{..}}, ...]`
///
/// # Errors
///
/// Returns [`ExportError::Diagnostics`] if serialization fails.
pub fn triangles_json(triangles: &[Triangle]) -> Result<String> {
    let out: Vec<Tri> = triangles
        .iter()
        .map(|[a, b, c]| Tri {
            a: Xy::new(a[0], a[1]),
            b: Xy::new(b[0], b[1]),
            c: Xy::new(c[0], c[1]),
        })
        .collect();
    to_json(&out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn points_are_rounded_to_one_decimal() {
        let json = points_json(&[Point2::new(1.26, -0.04), Point2::new(3.0, 4.56)]).unwrap();
        assert_eq!(json, r#"[{"x":1.3,"y":0.0},{"x":3.0,"y":4.6}]"#);
    }

    #[test]
    fn paths_nest_one_level() {
        let json = paths_json(&[vec![Point2::new(0.0, 0.0)], vec![]]).unwrap();
        assert_eq!(json, r#"[[{"x":0.0,"y":0.0}],[]]"#);
    }

    #[test]
    fn triangles_name_their_corners() {
        let json = triangles_json(&[[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["b"]["x"], 1.0);
        assert_eq!(value[0]["c"]["y"], 1.0);
    }

    #[test]
    fn non_finite_values_serialize_as_null() {
        let json = points_json(&[Point2::new(f64::NAN, 0.0)]).unwrap();
        assert_eq!(json, r#"[{"x":null,"y":0.0}]"#);
    }
}
