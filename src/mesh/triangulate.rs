//! Delaunay triangulation of point clouds into mesh input.

use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::MeshError;
use crate::math::Point2;

use super::graph::Triangle;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

fn to_spade(pt: &Point2) -> SpadePoint2<f64> {
    SpadePoint2::new(pt.x, pt.y)
}

fn insert_points(cdt: &mut Cdt, points: &[Point2]) -> Result<(), MeshError> {
    for pt in points {
        cdt.insert(to_spade(pt))
            .map_err(|e: InsertionError| MeshError::Triangulation(format!("insert ({}, {}): {e}", pt.x, pt.y)))?;
    }
    Ok(())
}

/// Inserts a closed polygon as constraint edges.
fn insert_boundary(cdt: &mut Cdt, boundary: &[Point2]) -> Result<(), MeshError> {
    if boundary.len() < 3 {
        return Err(MeshError::Triangulation(format!(
            "boundary needs at least 3 points, got {}",
            boundary.len()
        )));
    }

    let mut handles = Vec::with_capacity(boundary.len());
    for pt in boundary {
        let h = cdt
            .insert(to_spade(pt))
            .map_err(|e: InsertionError| MeshError::Triangulation(format!("boundary insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }
    Ok(())
}

/// Faces enclosed by an odd number of constraint edges, found by flooding
/// inward from the convex hull.
fn interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        let Some(inner) = edge.rev().face().as_inner() else {
            continue;
        };
        let idx = inner.fix().index();
        if depth.contains_key(&idx) {
            continue;
        }
        let d = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
        depth.insert(idx, d);
        if d % 2 == 1 {
            interior.insert(idx);
        }
        queue.push_back((inner.fix(), d));
    }

    while let Some((face_fix, d)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth.contains_key(&idx) {
                continue;
            }
            let nd = d + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth.insert(idx, nd);
            if nd % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), nd));
        }
    }

    interior
}

fn collect_triangles(cdt: &Cdt, keep: Option<&HashSet<usize>>) -> Vec<Triangle> {
    cdt.inner_faces()
        .filter(|face| match keep {
            Some(set) => set.contains(&face.fix().index()),
            None => true,
        })
        .map(|face| {
            face.vertices().map(|vh| {
                let pos = vh.position();
                [pos.x, pos.y]
            })
        })
        .collect()
}

/// Delaunay triangles covering the convex hull of `points`.
///
/// Duplicate points are merged. Fewer than three distinct, non-collinear
/// points yield an empty list.
///
/// # Errors
///
/// Returns [`MeshError::Triangulation`] if a point is rejected, e.g. for a
/// NaN coordinate.
pub fn triangulate(points: &[Point2]) -> Result<Vec<Triangle>, MeshError> {
    let mut cdt = Cdt::new();
    insert_points(&mut cdt, points)?;
    Ok(collect_triangles(&cdt, None))
}

/// Delaunay triangles of `points` restricted to the closed polygon
/// `boundary`. The boundary vertices join the point set and its edges are
/// kept as triangle edges.
///
/// # Errors
///
/// Returns [`MeshError::Triangulation`] for a boundary of fewer than three
/// points or for a rejected point.
pub fn triangulate_within(points: &[Point2], boundary: &[Point2]) -> Result<Vec<Triangle>, MeshError> {
    let mut cdt = Cdt::new();
    insert_boundary(&mut cdt, boundary)?;
    insert_points(&mut cdt, points)?;
    let interior = interior_faces(&cdt);
    let triangles = collect_triangles(&cdt, Some(&interior));
    tracing::debug!(
        points = points.len(),
        kept = triangles.len(),
        total = cdt.num_inner_faces(),
        "constrained triangulation"
    );
    Ok(triangles)
}
