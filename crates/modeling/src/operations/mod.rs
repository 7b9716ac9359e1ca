//! Region operators over a triangle soup.
//!
//! Operators never touch their input buffer. They either return a complete
//! replacement buffer ([`PolyOperationResult`]) or `None`, meaning the
//! operation declined and the caller keeps its current buffer.

mod bevel;
mod extrude;

pub use bevel::bevel;
pub use extrude::extrude;

use glam::Vec3;

use crate::constants::{MIN_FACE_WEIGHT, NORMALIZE_EPSILON};
use crate::topology::{FaceId, PolyTopology};

/// Output of a successful region operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyOperationResult {
    /// Replacement flat coordinate buffer
    pub next_positions: Vec<f32>,
    /// Triangle indices (in `next_positions`) of the new outward-facing faces
    pub top_face_ids: Vec<FaceId>,
}

impl PolyOperationResult {
    /// Number of whole triangles in the new buffer
    pub fn triangle_count(&self) -> usize {
        crate::math::triangle_count(&self.next_positions)
    }
}

/// Deduplicate, bounds-check and sort a face selection.
pub fn sanitize_face_ids(topology: &PolyTopology, face_ids: &[FaceId]) -> Vec<FaceId> {
    let mut faces: Vec<FaceId> = face_ids
        .iter()
        .copied()
        .filter(|face| (face.0 as usize) < topology.face_count())
        .collect();
    faces.sort_unstable();
    faces.dedup();

    if faces.len() < face_ids.len() {
        tracing::trace!(
            "sanitize_face_ids: kept {} of {} requested faces",
            faces.len(),
            face_ids.len()
        );
    }
    faces
}

/// Area-weighted centroid and mean normal of a face region.
///
/// Each face weighs `max(area, MIN_FACE_WEIGHT)`, so degenerate faces still
/// count without blowing up the division. Returns `None` when the region has
/// no weight or its normals cancel out.
pub fn compute_face_selection_centroid_normal(
    topology: &PolyTopology,
    faces: &[FaceId],
) -> Option<(Vec3, Vec3)> {
    let mut total_weight = 0.0f32;
    let mut centroid = Vec3::ZERO;
    let mut normal = Vec3::ZERO;

    for face in faces.iter().filter_map(|&id| topology.face(id)) {
        let weight = face.area.max(MIN_FACE_WEIGHT);
        total_weight += weight;
        centroid += face.centroid * weight;
        normal += face.normal * weight;
    }

    if total_weight < NORMALIZE_EPSILON {
        return None;
    }

    let normal = normal / total_weight;
    if normal.length() < NORMALIZE_EPSILON {
        return None;
    }

    Some((centroid / total_weight, normal.normalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::fixtures;

    #[test]
    fn test_sanitize_face_ids() {
        let topology = PolyTopology::from_positions(&fixtures::strip());
        let faces = sanitize_face_ids(
            &topology,
            &[FaceId(3), FaceId(1), FaceId(3), FaceId(12), FaceId(0)],
        );
        assert_eq!(faces, vec![FaceId(0), FaceId(1), FaceId(3)]);
        assert!(sanitize_face_ids(&topology, &[FaceId(4)]).is_empty());
    }

    #[test]
    fn test_centroid_normal_of_square() {
        let topology = PolyTopology::from_positions(&fixtures::unit_square());
        let (centroid, normal) =
            compute_face_selection_centroid_normal(&topology, &[FaceId(0), FaceId(1)]).unwrap();
        assert!((normal - Vec3::Y).length() < 1e-6);
        assert!((centroid - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_centroid_normal_empty_or_cancelling() {
        let topology = PolyTopology::from_positions(&fixtures::unit_square());
        assert!(compute_face_selection_centroid_normal(&topology, &[]).is_none());

        // Same triangle twice, once with reversed winding
        let mut positions = fixtures::triangle();
        positions.extend([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        let topology = PolyTopology::from_positions(&positions);
        assert!(
            compute_face_selection_centroid_normal(&topology, &[FaceId(0), FaceId(1)]).is_none()
        );
    }
}
