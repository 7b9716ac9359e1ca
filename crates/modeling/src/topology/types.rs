//! Type definitions for the triangle-soup topology.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Type-safe welded vertex identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Type-safe undirected edge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Type-safe face identifier (equal to the triangle index in the source buffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u32);

/// Canonical undirected edge: the smaller vertex id always comes first.
///
/// Ordering is lexicographic on `(low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(VertexId, VertexId);

impl EdgeKey {
    /// Create a key from two vertex ids in any order.
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// Smaller vertex id
    pub fn low(&self) -> VertexId {
        self.0
    }

    /// Larger vertex id
    pub fn high(&self) -> VertexId {
        self.1
    }

    /// Both vertex ids as `(low, high)`
    pub fn vertices(&self) -> (VertexId, VertexId) {
        (self.0, self.1)
    }

    /// Whether both ends are the same vertex
    pub fn is_collapsed(&self) -> bool {
        self.0 == self.1
    }
}

/// A triangle of the source buffer.
#[derive(Debug, Clone)]
pub struct TopologyFace {
    pub id: FaceId,
    /// Corner indices into the flat buffer (`3 * id .. 3 * id + 3`)
    pub corners: [u32; 3],
    /// Welded vertex ids, in winding order
    pub vertices: [VertexId; 3],
    /// Unit normal from the raw corner positions (`+Y` for degenerate faces)
    pub normal: Vec3,
    pub area: f32,
    /// Mean of the raw corner positions
    pub centroid: Vec3,
}

impl TopologyFace {
    /// Whether welding merged two of the corners
    pub fn is_collapsed(&self) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c || a == c
    }

    /// Directed edges `(v0,v1), (v1,v2), (v2,v0)` in winding order
    pub fn directed_edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

/// An undirected edge and the faces that use it.
#[derive(Debug, Clone)]
pub struct TopologyEdge {
    pub id: EdgeId,
    pub key: EdgeKey,
    /// Incident faces, in face order, without repeats
    pub faces: Vec<FaceId>,
}

impl TopologyEdge {
    /// Boundary of the whole mesh (exactly one incident face)
    pub fn is_boundary(&self) -> bool {
        self.faces.len() == 1
    }

    /// Shared by more than two faces
    pub fn is_non_manifold(&self) -> bool {
        self.faces.len() > 2
    }
}

/// Invariant violations reported by [`super::PolyTopology::validate`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("Face count {faces} does not match corner count {corners}")]
    FaceCountMismatch { faces: usize, corners: usize },
    #[error("Face {0:?} is not stored at its own index")]
    FaceIdMismatch(FaceId),
    #[error("Face {face:?} references missing vertex {vertex:?}")]
    VertexOutOfRange { face: FaceId, vertex: VertexId },
    #[error("Edge {0:?} has no incident faces")]
    OrphanEdge(EdgeId),
    #[error("Edge {0:?} is missing from the key lookup")]
    EdgeLookupMismatch(EdgeId),
    #[error("Adjacency list for {0} is not strictly ascending")]
    UnsortedAdjacency(String),
}
