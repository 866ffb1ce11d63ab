use std::collections::HashMap;

use slotmap::SlotMap;

use crate::error::MeshError;
use crate::math::Point2;

/// A triangle as three `[x, y]` vertices.
pub type Triangle = [[f64; 2]; 3];

slotmap::new_key_type! {
    /// Unique identifier for a node in a [`MeshGraph`].
    pub struct NodeId;
}

/// A mesh vertex and the vertices it shares a triangle with.
#[derive(Debug, Clone)]
pub struct MeshNode {
    /// Position of the first vertex that landed in this node's cell.
    pub point: Point2,
    /// Neighbors in the order their triangles were added.
    pub adjacent: Vec<NodeId>,
}

/// Integer grid cell of a vertex. Rounds half up on both axes.
#[allow(clippy::cast_possible_truncation)]
fn cell_key(x: f64, y: f64) -> (i64, i64) {
    ((x + 0.5).floor() as i64, (y + 0.5).floor() as i64)
}

/// Vertex adjacency of a triangle mesh.
///
/// Vertices are canonicalized to the nearest integer grid cell, so two
/// vertices closer than about one unit may collapse into a single node.
/// Such collapses are counted in [`MeshGraph::merged_vertices`].
#[derive(Debug, Default)]
pub struct MeshGraph {
    nodes: SlotMap<NodeId, MeshNode>,
    cells: HashMap<(i64, i64), NodeId>,
    order: Vec<NodeId>,
    triangles: Vec<[NodeId; 3]>,
    merged_vertices: usize,
}

impl MeshGraph {
    /// Builds the graph from a triangle list.
    ///
    /// Triangles are processed in order of their first vertex's y
    /// coordinate, which fixes the node and neighbor order the path walker
    /// sees.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NonFiniteVertex`] if any coordinate is NaN or
    /// infinite.
    pub fn from_triangles(triangles: &[Triangle]) -> Result<Self, MeshError> {
        let mut sorted: Vec<&Triangle> = triangles.iter().collect();
        sorted.sort_by(|a, b| a[0][1].total_cmp(&b[0][1]));

        let mut graph = Self::default();
        for tri in sorted {
            let mut ids = [NodeId::default(); 3];
            for (slot, &[x, y]) in ids.iter_mut().zip(tri) {
                *slot = graph.node_at(x, y)?;
            }
            graph.link_triangle(ids);
            graph.triangles.push(ids);
        }
        tracing::debug!(
            nodes = graph.nodes.len(),
            triangles = graph.triangles.len(),
            merged = graph.merged_vertices,
            "mesh graph built"
        );
        Ok(graph)
    }

    fn node_at(&mut self, x: f64, y: f64) -> Result<NodeId, MeshError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(MeshError::NonFiniteVertex { x, y });
        }
        let key = cell_key(x, y);
        if let Some(&id) = self.cells.get(&key) {
            if self.nodes.get(id).is_some_and(|node| node.point != Point2::new(x, y)) {
                self.merged_vertices += 1;
            }
            return Ok(id);
        }
        let id = self.nodes.insert(MeshNode {
            point: Point2::new(x, y),
            adjacent: Vec::new(),
        });
        self.cells.insert(key, id);
        self.order.push(id);
        Ok(id)
    }

    fn link_triangle(&mut self, ids: [NodeId; 3]) {
        for &a in &ids {
            for &b in &ids {
                if a == b {
                    continue;
                }
                if let Some(node) = self.nodes.get_mut(a) {
                    if !node.adjacent.contains(&b) {
                        node.adjacent.push(b);
                    }
                }
            }
        }
    }

    /// Returns the node, or an error if the id does not belong to this graph.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::UnknownNode`] for a foreign or stale id.
    pub fn node(&self, id: NodeId) -> Result<&MeshNode, MeshError> {
        self.nodes.get(id).ok_or(MeshError::UnknownNode)
    }

    /// Neighbors of `id`, empty for an unknown id.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.adjacent.as_slice())
    }

    /// `true` when `a` and `b` share a triangle.
    #[must_use]
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Position of `id`, `None` for an unknown id.
    #[must_use]
    pub fn point(&self, id: NodeId) -> Option<Point2> {
        self.nodes.get(id).map(|node| node.point)
    }

    /// Positions of a node path, skipping unknown ids.
    #[must_use]
    pub fn path_points(&self, path: &[NodeId]) -> Vec<Point2> {
        path.iter().filter_map(|&id| self.point(id)).collect()
    }

    /// Looks up the node whose cell contains `(x, y)`.
    #[must_use]
    pub fn find(&self, x: f64, y: f64) -> Option<NodeId> {
        self.cells.get(&cell_key(x, y)).copied()
    }

    /// Node ids in creation order.
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Triangles as node triples, in build order.
    #[must_use]
    pub fn triangles(&self) -> &[[NodeId; 3]] {
        &self.triangles
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of vertex lookups that landed on an existing node holding a
    /// different exact position.
    #[must_use]
    pub fn merged_vertices(&self) -> usize {
        self.merged_vertices
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_shares_only_the_diagonal() {
        let graph = MeshGraph::from_triangles(&[
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
            [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        ])
        .unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.triangles().len(), 2);
        let degrees: Vec<usize> = graph
            .node_ids()
            .iter()
            .map(|&id| graph.neighbors(id).len())
            .collect();
        assert_eq!(degrees.iter().filter(|&&d| d == 3).count(), 2);
        assert_eq!(degrees.iter().filter(|&&d| d == 2).count(), 2);
        let a = graph.find(0.0, 0.0).unwrap();
        let c = graph.find(1.0, 1.0).unwrap();
        assert!(graph.are_adjacent(a, c));
    }

    #[test]
    fn close_vertices_collapse() {
        let graph = MeshGraph::from_triangles(&[
            [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]],
            [[0.2, 0.1], [10.0, 10.0], [0.0, 10.0]],
        ])
        .unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.merged_vertices(), 1);
        let origin = graph.find(0.0, 0.0).unwrap();
        assert_eq!(graph.point(origin), Some(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn rejects_nan_vertices() {
        let err = MeshGraph::from_triangles(&[[[f64::NAN, 0.0], [1.0, 0.0], [0.0, 1.0]]]);
        assert!(matches!(err, Err(MeshError::NonFiniteVertex { .. })));
    }

    #[test]
    fn triangles_are_ordered_by_first_vertex_y() {
        let graph = MeshGraph::from_triangles(&[
            [[0.0, 5.0], [1.0, 5.0], [0.0, 6.0]],
            [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        ])
        .unwrap();
        let first = graph.node_ids()[0];
        assert_eq!(graph.point(first), Some(Point2::new(0.0, 0.0)));
    }
}
