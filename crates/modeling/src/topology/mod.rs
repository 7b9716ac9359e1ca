//! Connectivity rebuilt from a flat triangle soup
//!
//! A [`PolyTopology`] is an immutable snapshot: corners are welded into
//! shared vertices, and faces, edges and adjacency indexes are derived from
//! the welded ids. It is rebuilt wholesale after every edit, never patched.

mod construction;
mod queries;
mod types;
mod validation;

use std::collections::HashMap;

use glam::Vec3;

pub use types::{
    EdgeId, EdgeKey, FaceId, TopologyEdge, TopologyError, TopologyFace, VertexId,
};

/// Welded topology of a triangle soup.
#[derive(Debug, Clone)]
pub struct PolyTopology {
    /// Weld tolerance the snapshot was built with
    pub(crate) epsilon: f32,
    /// Welded positions, indexed by vertex id
    pub(crate) vertices: Vec<Vec3>,
    /// Raw corner index -> welded vertex id
    pub(crate) corner_to_vertex: Vec<VertexId>,
    /// One face per source triangle; face id == triangle index
    pub(crate) faces: Vec<TopologyFace>,
    pub(crate) edges: Vec<TopologyEdge>,
    pub(crate) edge_by_key: HashMap<EdgeKey, EdgeId>,
    pub(crate) face_to_edges: Vec<Vec<EdgeId>>,
    pub(crate) vertex_to_corners: Vec<Vec<u32>>,
    pub(crate) vertex_to_faces: Vec<Vec<FaceId>>,
}
