//! Validation methods for PolyTopology.
//!
//! Checks the invariants the operators rely on:
//! - One face per whole triangle, stored at its own index
//! - Vertex references in range
//! - Every edge is used by a face and reachable through its key
//! - Adjacency lists strictly ascending

use super::PolyTopology;
use super::types::TopologyError;

impl PolyTopology {
    /// Validate the snapshot.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.faces.len() != self.corner_to_vertex.len() / 3 {
            return Err(TopologyError::FaceCountMismatch {
                faces: self.faces.len(),
                corners: self.corner_to_vertex.len(),
            });
        }

        for (index, face) in self.faces.iter().enumerate() {
            if face.id.0 as usize != index {
                return Err(TopologyError::FaceIdMismatch(face.id));
            }
            for vertex in face.vertices {
                if vertex.0 as usize >= self.vertices.len() {
                    return Err(TopologyError::VertexOutOfRange {
                        face: face.id,
                        vertex,
                    });
                }
            }
        }

        for edge in &self.edges {
            if edge.faces.is_empty() {
                return Err(TopologyError::OrphanEdge(edge.id));
            }
            if edge.key.is_collapsed() || self.edge_by_key(edge.key) != Some(edge.id) {
                return Err(TopologyError::EdgeLookupMismatch(edge.id));
            }
        }

        for (index, faces) in self.vertex_to_faces.iter().enumerate() {
            if !faces.windows(2).all(|w| w[0] < w[1]) {
                return Err(TopologyError::UnsortedAdjacency(format!(
                    "vertex {} faces",
                    index
                )));
            }
        }
        for (index, corners) in self.vertex_to_corners.iter().enumerate() {
            if !corners.windows(2).all(|w| w[0] < w[1]) {
                return Err(TopologyError::UnsortedAdjacency(format!(
                    "vertex {} corners",
                    index
                )));
            }
        }
        for (index, edges) in self.face_to_edges.iter().enumerate() {
            if !edges.windows(2).all(|w| w[0] < w[1]) {
                return Err(TopologyError::UnsortedAdjacency(format!(
                    "face {} edges",
                    index
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::super::types::{EdgeId, FaceId};
    use super::*;

    #[test]
    fn test_valid_fixtures() {
        for positions in [
            fixtures::triangle(),
            fixtures::unit_square(),
            fixtures::strip(),
            fixtures::tetrahedron(),
            fixtures::cube(),
        ] {
            assert!(PolyTopology::from_positions(&positions).validate().is_ok());
        }
    }

    #[test]
    fn test_detects_orphan_edge() {
        let mut topology = PolyTopology::from_positions(&fixtures::triangle());
        topology.edges[1].faces.clear();
        assert_eq!(topology.validate(), Err(TopologyError::OrphanEdge(EdgeId(1))));
    }

    #[test]
    fn test_detects_unsorted_adjacency() {
        let mut topology = PolyTopology::from_positions(&fixtures::unit_square());
        topology.vertex_to_faces[0] = vec![FaceId(1), FaceId(0)];
        assert!(matches!(
            topology.validate(),
            Err(TopologyError::UnsortedAdjacency(_))
        ));
    }

    #[test]
    fn test_detects_face_count_mismatch() {
        let mut topology = PolyTopology::from_positions(&fixtures::unit_square());
        topology.faces.pop();
        assert!(matches!(
            topology.validate(),
            Err(TopologyError::FaceCountMismatch { .. })
        ));
    }
}
