//! Flow-line extraction from triangle meshes.
//!
//! A [`MeshGraph`] links every vertex to the vertices it shares a triangle
//! with. [`FindPaths`] then walks that graph greedily, always taking the
//! straightest (or, in swirl mode, the most consistently curving) step, to
//! produce long node-disjoint polylines.

pub mod graph;
pub mod triangulate;
pub mod walker;

pub use graph::{MeshGraph, MeshNode, NodeId, Triangle};
pub use triangulate::{triangulate, triangulate_within};
pub use walker::{FindPaths, PathOptions, PathSet, WalkPhase};
