//! Construction of a PolyTopology from a flat coordinate buffer.

use std::collections::HashMap;

use glam::Vec3;

use super::PolyTopology;
use super::types::{EdgeId, EdgeKey, FaceId, TopologyEdge, TopologyFace, VertexId};
use crate::constants::DEFAULT_WELD_EPSILON;
use crate::math::{
    corner_position, triangle_centroid, triangle_count, triangle_normal_area, weld_key,
};

impl PolyTopology {
    /// Build topology from a triangle soup with the default weld tolerance.
    pub fn from_positions(positions: &[f32]) -> Self {
        Self::build(positions, DEFAULT_WELD_EPSILON)
    }

    /// Build topology from a triangle soup.
    ///
    /// Corners whose coordinates quantize to the same `round(value / epsilon)`
    /// triple share a vertex; the first occurrence allocates the id, so the
    /// vertex order only depends on the input. Floats past the last whole
    /// triangle are ignored.
    pub fn build(positions: &[f32], epsilon: f32) -> Self {
        let epsilon = if epsilon.is_finite() && epsilon > 0.0 {
            epsilon
        } else {
            tracing::warn!(
                "PolyTopology::build: weld epsilon {} is unusable, using {}",
                epsilon,
                DEFAULT_WELD_EPSILON
            );
            DEFAULT_WELD_EPSILON
        };

        let num_triangles = triangle_count(positions);
        let corner_count = num_triangles * 3;

        // === Vertex Welding ===
        let mut key_to_vertex: HashMap<[i64; 3], VertexId> = HashMap::new();
        let mut vertices: Vec<Vec3> = Vec::new();
        let mut corner_to_vertex: Vec<VertexId> = Vec::with_capacity(corner_count);
        let mut vertex_to_corners: Vec<Vec<u32>> = Vec::new();

        for corner in 0..corner_count {
            let position = corner_position(positions, corner);
            let vertex = *key_to_vertex
                .entry(weld_key(position, epsilon))
                .or_insert_with(|| {
                    vertices.push(position);
                    vertex_to_corners.push(Vec::new());
                    VertexId(vertices.len() as u32 - 1)
                });
            corner_to_vertex.push(vertex);
            vertex_to_corners[vertex.0 as usize].push(corner as u32);
        }

        let welded_count = corner_count - vertices.len();
        if welded_count > 0 {
            tracing::debug!(
                "PolyTopology::build: welded {} corners ({} unique of {} total)",
                welded_count,
                vertices.len(),
                corner_count
            );
        }

        // === Faces and Edges ===
        let mut faces: Vec<TopologyFace> = Vec::with_capacity(num_triangles);
        let mut edges: Vec<TopologyEdge> = Vec::new();
        let mut edge_by_key: HashMap<EdgeKey, EdgeId> = HashMap::new();
        let mut face_to_edges: Vec<Vec<EdgeId>> = Vec::with_capacity(num_triangles);
        let mut vertex_to_faces: Vec<Vec<FaceId>> = vec![Vec::new(); vertices.len()];
        let mut collapsed_count = 0usize;

        for tri_idx in 0..num_triangles {
            let face_id = FaceId(tri_idx as u32);
            let base = tri_idx * 3;
            let corners = [base as u32, base as u32 + 1, base as u32 + 2];
            let face_vertices = [
                corner_to_vertex[base],
                corner_to_vertex[base + 1],
                corner_to_vertex[base + 2],
            ];

            let p0 = corner_position(positions, base);
            let p1 = corner_position(positions, base + 1);
            let p2 = corner_position(positions, base + 2);
            let (normal, area) = triangle_normal_area(p0, p1, p2);

            let face = TopologyFace {
                id: face_id,
                corners,
                vertices: face_vertices,
                normal,
                area,
                centroid: triangle_centroid(p0, p1, p2),
            };
            if face.is_collapsed() {
                collapsed_count += 1;
            }

            let mut face_edges = Vec::with_capacity(3);
            for (a, b) in face.directed_edges() {
                let key = EdgeKey::new(a, b);
                if key.is_collapsed() {
                    continue;
                }
                let edge_id = *edge_by_key.entry(key).or_insert_with(|| {
                    edges.push(TopologyEdge {
                        id: EdgeId(edges.len() as u32),
                        key,
                        faces: Vec::new(),
                    });
                    EdgeId(edges.len() as u32 - 1)
                });

                // A collapsed face can reach the same edge twice
                let incident = &mut edges[edge_id.0 as usize].faces;
                if incident.last() != Some(&face_id) {
                    incident.push(face_id);
                }
                face_edges.push(edge_id);
            }
            face_edges.sort_unstable();
            face_edges.dedup();
            face_to_edges.push(face_edges);

            for vertex in face_vertices {
                vertex_to_faces[vertex.0 as usize].push(face_id);
            }

            faces.push(face);
        }

        // Deterministic downstream iteration
        for adjacent in &mut vertex_to_faces {
            adjacent.sort_unstable();
            adjacent.dedup();
        }

        if collapsed_count > 0 {
            tracing::debug!(
                "PolyTopology::build: {} of {} faces collapsed by welding",
                collapsed_count,
                num_triangles
            );
        }

        Self {
            epsilon,
            vertices,
            corner_to_vertex,
            faces,
            edges,
            edge_by_key,
            face_to_edges,
            vertex_to_corners,
            vertex_to_faces,
        }
    }
}
