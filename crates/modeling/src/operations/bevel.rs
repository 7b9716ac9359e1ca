//! Region bevel.
//!
//! Each selected face gets its own raised, inset detail built from its local
//! frame. The source triangle stays in the buffer underneath.
//!
//! Per face, 13 triangles in a fixed order:
//! - 6 outer ring: original corners to inset corners, flush with the face
//! - 6 upper ring: inset corners up to the top corners
//! - 1 cap over the top corners

use glam::Vec3;

use super::{PolyOperationResult, sanitize_face_ids};
use crate::constants::{
    BEVEL_HEIGHT_SCALE, BEVEL_INSET_SCALE, BEVEL_TRIANGLES_PER_FACE, FLOATS_PER_TRIANGLE,
    MAX_BEVEL_AMOUNT, MAX_BEVEL_HEIGHT, MAX_BEVEL_INSET, MIN_BEVEL_AMOUNT, MIN_BEVEL_HEIGHT,
    MIN_BEVEL_INSET, MIN_OPERATION_AMOUNT,
};
use crate::math::{flatten_corners, push_triangle, triangle_corners, triangle_count};
use crate::topology::{FaceId, PolyTopology, TopologyFace};

/// Bevel every selected face by `amount`.
///
/// Returns `None` for an empty selection or a non-finite amount at or below
/// tolerance. The new triangles are appended after the unmodified input;
/// `top_face_ids` holds each face's cap.
pub fn bevel(
    positions: &[f32],
    topology: &PolyTopology,
    face_ids: &[FaceId],
    amount: f32,
) -> Option<PolyOperationResult> {
    let faces = sanitize_face_ids(topology, face_ids);
    if faces.is_empty() || !amount.is_finite() || amount <= MIN_OPERATION_AMOUNT {
        return None;
    }

    let amount = amount.clamp(MIN_BEVEL_AMOUNT, MAX_BEVEL_AMOUNT);
    let inset = (amount * BEVEL_INSET_SCALE).clamp(MIN_BEVEL_INSET, MAX_BEVEL_INSET);
    let height = (amount * BEVEL_HEIGHT_SCALE).clamp(MIN_BEVEL_HEIGHT, MAX_BEVEL_HEIGHT);

    let original_count = triangle_count(positions);
    let mut appended: Vec<[f32; 3]> =
        Vec::with_capacity(faces.len() * BEVEL_TRIANGLES_PER_FACE * 3);
    let mut top_face_ids = Vec::with_capacity(faces.len());

    for (block, &face_id) in faces.iter().enumerate() {
        let face = &topology.faces()[face_id.0 as usize];
        let corners = triangle_corners(positions, face_id.0 as usize);
        push_face_bevel(&mut appended, face, corners, inset, height);

        let cap = original_count + block * BEVEL_TRIANGLES_PER_FACE + BEVEL_TRIANGLES_PER_FACE - 1;
        top_face_ids.push(FaceId(cap as u32));
    }

    // Whole triangles only; a ragged tail would shift every appended index
    let mut next_positions = positions[..original_count * FLOATS_PER_TRIANGLE].to_vec();
    next_positions.extend(flatten_corners(&appended));

    tracing::debug!(
        "bevel: {} faces, inset {:.3}, height {:.3}",
        faces.len(),
        inset,
        height
    );

    Some(PolyOperationResult {
        next_positions,
        top_face_ids,
    })
}

fn push_face_bevel(
    out: &mut Vec<[f32; 3]>,
    face: &TopologyFace,
    corners: [Vec3; 3],
    inset: f32,
    height: f32,
) {
    let lifted = face.normal * height;
    let inner = corners.map(|p| p.lerp(face.centroid, inset));
    let top = inner.map(|p| p + lifted);

    for i in 0..3 {
        let j = (i + 1) % 3;
        push_triangle(out, [corners[i], corners[j], inner[j]]);
        push_triangle(out, [corners[i], inner[j], inner[i]]);
    }
    for i in 0..3 {
        let j = (i + 1) % 3;
        push_triangle(out, [inner[i], inner[j], top[j]]);
        push_triangle(out, [inner[i], top[j], top[i]]);
    }
    push_triangle(out, top);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_WELD_EPSILON;
    use crate::math::triangle_normal_area;
    use crate::orientation::count_inconsistent_edges;
    use crate::topology::fixtures;

    #[test]
    fn test_bevel_single_face() {
        let positions = fixtures::triangle();
        let topology = PolyTopology::from_positions(&positions);
        let result = bevel(&positions, &topology, &[FaceId(0)], 0.1).unwrap();

        assert_eq!(result.triangle_count(), 1 + 13);
        assert_eq!(&result.next_positions[..9], &positions[..]);
        assert_eq!(result.top_face_ids, vec![FaceId(13)]);

        // inset clamps to 0.035, height to 0.05
        let [a, b, c] = triangle_corners(&result.next_positions, 13);
        assert!([a, b, c].iter().all(|p| (p.z - 0.05).abs() < 1e-6));
        let (normal, _) = triangle_normal_area(a, b, c);
        assert!((normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_bevel_block_is_consistently_wound() {
        let positions = fixtures::triangle();
        let topology = PolyTopology::from_positions(&positions);
        let result = bevel(&positions, &topology, &[FaceId(0)], 0.5).unwrap();
        let block = &result.next_positions[9..];
        assert_eq!(count_inconsistent_edges(block, DEFAULT_WELD_EPSILON), 0);

        // Outer ring lies flush with the source face and faces the same way
        for ring in 0..6 {
            let [a, b, c] = triangle_corners(block, ring);
            assert!([a, b, c].iter().all(|p| p.z.abs() < 1e-6));
            let (normal, _) = triangle_normal_area(a, b, c);
            assert!(normal.dot(Vec3::Z) > 0.99);
        }

        // Upper ring faces away from the face centroid
        let centroid = Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0);
        for ring in 6..12 {
            let [a, b, c] = triangle_corners(block, ring);
            let (normal, _) = triangle_normal_area(a, b, c);
            let mid = (a + b + c) / 3.0;
            assert!(normal.dot(mid - centroid) > 0.0);
        }
    }

    #[test]
    fn test_bevel_uses_per_face_normals() {
        let positions = fixtures::tetrahedron();
        let topology = PolyTopology::from_positions(&positions);
        let faces = [FaceId(2), FaceId(0)];
        let result = bevel(&positions, &topology, &faces, 1.0).unwrap();

        assert_eq!(result.triangle_count(), 4 + 2 * 13);
        assert_eq!(&result.next_positions[..positions.len()], &positions[..]);
        // Sorted selection order: face 0 first, then face 2
        assert_eq!(result.top_face_ids, vec![FaceId(16), FaceId(29)]);

        for (cap, source) in result.top_face_ids.iter().zip([FaceId(0), FaceId(2)]) {
            let [a, b, c] = triangle_corners(&result.next_positions, cap.0 as usize);
            let (normal, _) = triangle_normal_area(a, b, c);
            let expected = topology.face(source).unwrap().normal;
            assert!((normal - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_amount_is_clamped() {
        let positions = fixtures::triangle();
        let topology = PolyTopology::from_positions(&positions);
        let result = bevel(&positions, &topology, &[FaceId(0)], 50.0).unwrap();
        let [a, _, _] = triangle_corners(&result.next_positions, 13);
        // amount 2.0 -> height 1.0
        assert!((a.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bevel_declines() {
        let positions = fixtures::unit_square();
        let topology = PolyTopology::from_positions(&positions);
        assert!(bevel(&positions, &topology, &[FaceId(5)], 0.0).is_none());
        assert!(bevel(&positions, &topology, &[FaceId(0)], 0.0).is_none());
        assert!(bevel(&positions, &topology, &[FaceId(0)], -1.0).is_none());
        assert!(bevel(&positions, &topology, &[FaceId(0)], f32::INFINITY).is_none());
        assert!(bevel(&positions, &topology, &[], 1.0).is_none());
        assert_eq!(positions, fixtures::unit_square());
    }
}
