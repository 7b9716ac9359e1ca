//! Topology query methods for PolyTopology.

use std::collections::HashMap;

use glam::Vec3;

use super::PolyTopology;
use super::types::{EdgeId, EdgeKey, FaceId, TopologyEdge, TopologyFace, VertexId};

impl PolyTopology {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Weld tolerance this snapshot was built with
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Welded positions, indexed by vertex id
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Raw corner index -> welded vertex id
    pub fn corner_to_vertex(&self) -> &[VertexId] {
        &self.corner_to_vertex
    }

    /// Get all faces
    pub fn faces(&self) -> &[TopologyFace] {
        &self.faces
    }

    /// Get all edges
    pub fn edges(&self) -> &[TopologyEdge] {
        &self.edges
    }

    /// Get vertex position by ID
    pub fn vertex_position(&self, id: VertexId) -> Option<Vec3> {
        self.vertices.get(id.0 as usize).copied()
    }

    /// Get face by ID
    pub fn face(&self, id: FaceId) -> Option<&TopologyFace> {
        self.faces.get(id.0 as usize)
    }

    /// Get edge by ID
    pub fn edge(&self, id: EdgeId) -> Option<&TopologyEdge> {
        self.edges.get(id.0 as usize)
    }

    /// Number of welded vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (always the number of whole triangles in the source)
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ========================================================================
    // Adjacency
    // ========================================================================

    /// Find the edge joining two vertices, in either order
    pub fn edge_id(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_by_key.get(&EdgeKey::new(a, b)).copied()
    }

    /// Find the edge with a canonical key
    pub fn edge_by_key(&self, key: EdgeKey) -> Option<EdgeId> {
        self.edge_by_key.get(&key).copied()
    }

    /// Edges of a face, ascending
    pub fn face_edges(&self, face_id: FaceId) -> &[EdgeId] {
        self.face_to_edges
            .get(face_id.0 as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Faces using a vertex, ascending
    pub fn vertex_faces(&self, vertex_id: VertexId) -> &[FaceId] {
        self.vertex_to_faces
            .get(vertex_id.0 as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Raw corners welded into a vertex, ascending
    pub fn vertex_corners(&self, vertex_id: VertexId) -> &[u32] {
        self.vertex_to_corners
            .get(vertex_id.0 as usize)
            .map_or(&[], Vec::as_slice)
    }

    // ========================================================================
    // Boundaries
    // ========================================================================

    /// Check if an edge is on the mesh boundary (exactly one incident face)
    pub fn is_boundary_edge(&self, edge_id: EdgeId) -> bool {
        self.edge(edge_id).is_some_and(TopologyEdge::is_boundary)
    }

    /// Iterate over mesh boundary edges
    pub fn boundary_edges(&self) -> impl Iterator<Item = &TopologyEdge> + '_ {
        self.edges.iter().filter(|edge| edge.is_boundary())
    }

    /// Iterate over edges shared by more than two faces
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = &TopologyEdge> + '_ {
        self.edges.iter().filter(|edge| edge.is_non_manifold())
    }

    /// Whether every edge is shared by at least two faces
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|edge| edge.faces.len() >= 2)
    }

    /// Open boundary of a face region.
    ///
    /// Returns each edge used by exactly one face of `faces`, directed the way
    /// that face traverses it, in face order and then winding order. Faces
    /// that are out of range are skipped.
    pub fn region_boundary_edges(&self, faces: &[FaceId]) -> Vec<(VertexId, VertexId)> {
        let region: Vec<&TopologyFace> = faces.iter().filter_map(|&id| self.face(id)).collect();

        let mut uses: HashMap<EdgeKey, usize> = HashMap::new();
        for face in &region {
            for (a, b) in face.directed_edges() {
                let key = EdgeKey::new(a, b);
                if !key.is_collapsed() {
                    *uses.entry(key).or_default() += 1;
                }
            }
        }

        let mut boundary = Vec::new();
        for face in &region {
            for (a, b) in face.directed_edges() {
                if uses.get(&EdgeKey::new(a, b)) == Some(&1) {
                    boundary.push((a, b));
                }
            }
        }
        boundary
    }
}
