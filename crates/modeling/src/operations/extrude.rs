//! Region extrude.
//!
//! All selected faces move together as one rigid cap along the region's
//! area-weighted normal. Side walls are built along the region's open
//! boundary, and the new block is run through the orientation fixup against
//! the untouched faces before being appended.
//!
//! ```text
//!      a'------b'        cap (selected faces, displaced)
//!      |     / |
//!      |   /   |         wall: [a, b, b'] + [a, b', a']
//!      | /     |
//!      a-------b         original region boundary edge a -> b
//! ```

use glam::Vec3;

use super::{PolyOperationResult, compute_face_selection_centroid_normal, sanitize_face_ids};
use crate::constants::{MAX_EXTRUDE_DISTANCE, MIN_OPERATION_AMOUNT};
use crate::math::{flatten_corners, push_triangle, triangle_corners};
use crate::orientation::fix_appended_orientation;
use crate::topology::{FaceId, PolyTopology, VertexId};

/// Extrude a face region by a signed distance.
///
/// Returns `None` when the sanitized selection is empty, the clamped distance
/// is below tolerance (or not finite), or the region has no usable normal.
/// `top_face_ids` lists the cap triangles in selection order.
pub fn extrude(
    positions: &[f32],
    topology: &PolyTopology,
    face_ids: &[FaceId],
    distance: f32,
) -> Option<PolyOperationResult> {
    let faces = sanitize_face_ids(topology, face_ids);
    if faces.is_empty() {
        return None;
    }

    if !distance.is_finite() {
        return None;
    }
    let distance = distance.clamp(-MAX_EXTRUDE_DISTANCE, MAX_EXTRUDE_DISTANCE);
    if distance.abs() < MIN_OPERATION_AMOUNT {
        return None;
    }

    let (_, normal) = compute_face_selection_centroid_normal(topology, &faces)?;
    let offset = normal * distance;

    let mut selected = vec![false; topology.face_count()];
    for face in &faces {
        selected[face.0 as usize] = true;
    }

    // Untouched faces keep their raw corners
    let mut base: Vec<[f32; 3]> = Vec::with_capacity(positions.len() / 3);
    for face in topology.faces().iter().filter(|f| !selected[f.id.0 as usize]) {
        push_triangle(&mut base, triangle_corners(positions, face.id.0 as usize));
    }
    let base = flatten_corners(&base);

    let position = |vertex: VertexId| topology.vertices()[vertex.0 as usize];
    let mut appended: Vec<[f32; 3]> = Vec::new();

    // Cap: displaced copies, wound to agree with the source face
    for &face_id in &faces {
        let face = &topology.faces()[face_id.0 as usize];
        let [a, b, c] = face.vertices.map(|v| position(v) + offset);
        let raw = (b - a).cross(c - a);
        if raw.dot(face.normal) < 0.0 {
            push_triangle(&mut appended, [a, c, b]);
        } else {
            push_triangle(&mut appended, [a, b, c]);
        }
    }

    // Walls along the region boundary, facing edge x extrusion
    let boundary = topology.region_boundary_edges(&faces);
    for &(from, to) in &boundary {
        let a = position(from);
        let b = position(to);
        let a_top = a + offset;
        let b_top = b + offset;
        let expected = (b - a).cross(offset);

        for wall in [[a, b, b_top], [a, b_top, a_top]] {
            push_triangle(&mut appended, orient_toward(wall, expected));
        }
    }

    let appended = flatten_corners(&appended);
    let fixup = fix_appended_orientation(&base, &appended, topology.epsilon());

    let base_count = crate::math::triangle_count(&base);
    let top_face_ids = (0..faces.len())
        .map(|cap| FaceId((base_count + cap) as u32))
        .collect();

    let mut next_positions = base;
    next_positions.extend_from_slice(&fixup.positions);

    tracing::debug!(
        "extrude: {} faces by {:.4} ({} boundary edges, {} triangles out)",
        faces.len(),
        distance,
        boundary.len(),
        next_positions.len() / 9
    );

    Some(PolyOperationResult {
        next_positions,
        top_face_ids,
    })
}

/// Swap the last two corners if the triangle faces away from `expected`.
fn orient_toward(triangle: [Vec3; 3], expected: Vec3) -> [Vec3; 3] {
    let [a, b, c] = triangle;
    if (b - a).cross(c - a).dot(expected) < 0.0 {
        [a, c, b]
    } else {
        triangle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_WELD_EPSILON;
    use crate::math::{triangle_count, triangle_normal_area};
    use crate::orientation::count_inconsistent_edges;
    use crate::topology::fixtures;

    #[test]
    fn test_extrude_unit_square() {
        let positions = fixtures::unit_square();
        let topology = PolyTopology::from_positions(&positions);
        let result = extrude(&positions, &topology, &[FaceId(0), FaceId(1)], 1.0).unwrap();

        // 0 leftovers + 2 caps + 4 boundary edges x 2 walls
        assert_eq!(result.triangle_count(), 10);
        assert_eq!(result.top_face_ids, vec![FaceId(0), FaceId(1)]);

        for &cap in &result.top_face_ids {
            let [a, b, c] = triangle_corners(&result.next_positions, cap.0 as usize);
            assert!([a, b, c].iter().all(|p| (p.y - 1.0).abs() < 1e-6));
            let (normal, _) = triangle_normal_area(a, b, c);
            assert!((normal - Vec3::Y).length() < 1e-5);
        }
        assert_eq!(
            count_inconsistent_edges(&result.next_positions, DEFAULT_WELD_EPSILON),
            0
        );

        let rebuilt = PolyTopology::from_positions(&result.next_positions);
        assert!(rebuilt.validate().is_ok());
        // Open box: the bottom rim is the only boundary
        assert_eq!(rebuilt.boundary_edges().count(), 4);
    }

    #[test]
    fn test_walls_face_outward() {
        let positions = fixtures::unit_square();
        let topology = PolyTopology::from_positions(&positions);
        let result = extrude(&positions, &topology, &[FaceId(0), FaceId(1)], 0.5).unwrap();
        let center = Vec3::new(0.5, 0.25, 0.5);

        for wall in 2..triangle_count(&result.next_positions) {
            let [a, b, c] = triangle_corners(&result.next_positions, wall);
            let (normal, _) = triangle_normal_area(a, b, c);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid - center) > 0.0, "wall {} faces inward", wall);
        }
    }

    #[test]
    fn test_partial_region_keeps_rest() {
        let positions = fixtures::strip();
        let topology = PolyTopology::from_positions(&positions);
        let result = extrude(&positions, &topology, &[FaceId(2), FaceId(3)], 0.25).unwrap();

        // 2 untouched + 2 caps + 4 walls x 2
        assert_eq!(result.triangle_count(), 12);
        assert_eq!(&result.next_positions[..18], &positions[..18]);
        assert_eq!(result.top_face_ids, vec![FaceId(2), FaceId(3)]);
        assert_eq!(
            count_inconsistent_edges(&result.next_positions, DEFAULT_WELD_EPSILON),
            0
        );
    }

    #[test]
    fn test_region_moves_rigidly_along_shared_normal() {
        let positions = fixtures::tetrahedron();
        let topology = PolyTopology::from_positions(&positions);
        let faces = [FaceId(1), FaceId(3)];
        let (_, normal) = compute_face_selection_centroid_normal(&topology, &faces).unwrap();
        let result = extrude(&positions, &topology, &faces, 0.5).unwrap();

        // Both caps keep the shape of their source faces, offset by one vector
        for (cap, source) in result.top_face_ids.iter().zip(faces) {
            let cap_corners = triangle_corners(&result.next_positions, cap.0 as usize);
            let source_corners = triangle_corners(&positions, source.0 as usize);
            for p in cap_corners {
                assert!(
                    source_corners
                        .iter()
                        .any(|s| (*s + normal * 0.5 - p).length() < 1e-5)
                );
            }
        }
        assert_eq!(
            count_inconsistent_edges(&result.next_positions, DEFAULT_WELD_EPSILON),
            0
        );
    }

    #[test]
    fn test_closed_cube_stays_closed() {
        let positions = fixtures::cube();
        let topology = PolyTopology::from_positions(&positions);
        assert!(topology.is_closed());

        // Top quad, outward and inward
        for distance in [0.5, -0.5] {
            let result = extrude(&positions, &topology, &[FaceId(2), FaceId(3)], distance).unwrap();
            assert_eq!(result.triangle_count(), 10 + 2 + 8);

            let rebuilt = PolyTopology::from_positions(&result.next_positions);
            assert!(rebuilt.validate().is_ok());
            assert!(rebuilt.is_closed());
            assert_eq!(rebuilt.non_manifold_edges().count(), 0);
            assert_eq!(
                count_inconsistent_edges(&result.next_positions, DEFAULT_WELD_EPSILON),
                0
            );
        }

        // L-shaped region over the top and +X quads
        let faces = [FaceId(2), FaceId(3), FaceId(6), FaceId(7)];
        let result = extrude(&positions, &topology, &faces, 0.5).unwrap();
        assert_eq!(result.triangle_count(), 8 + 4 + 12);
        let rebuilt = PolyTopology::from_positions(&result.next_positions);
        assert!(rebuilt.is_closed());
        assert_eq!(
            count_inconsistent_edges(&result.next_positions, DEFAULT_WELD_EPSILON),
            0
        );
    }

    #[test]
    fn test_distance_is_clamped() {
        let positions = fixtures::triangle();
        let topology = PolyTopology::from_positions(&positions);
        let result = extrude(&positions, &topology, &[FaceId(0)], 100.0).unwrap();
        let [a, _, _] = triangle_corners(&result.next_positions, result.top_face_ids[0].0 as usize);
        assert!((a.z - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_extrude_declines() {
        let positions = fixtures::unit_square();
        let topology = PolyTopology::from_positions(&positions);
        assert!(extrude(&positions, &topology, &[], 1.0).is_none());
        assert!(extrude(&positions, &topology, &[FaceId(7)], 1.0).is_none());
        assert!(extrude(&positions, &topology, &[FaceId(0)], 0.0).is_none());
        assert!(extrude(&positions, &topology, &[FaceId(0)], 1e-7).is_none());
        assert!(extrude(&positions, &topology, &[FaceId(0)], f32::NAN).is_none());
        assert_eq!(positions, fixtures::unit_square());
    }

    #[test]
    fn test_inward_extrude() {
        let positions = fixtures::unit_square();
        let topology = PolyTopology::from_positions(&positions);
        let result = extrude(&positions, &topology, &[FaceId(0), FaceId(1)], -1.0).unwrap();
        assert_eq!(result.triangle_count(), 10);
        let [a, _, _] = triangle_corners(&result.next_positions, 0);
        assert!((a.y + 1.0).abs() < 1e-6);
        assert_eq!(
            count_inconsistent_edges(&result.next_positions, DEFAULT_WELD_EPSILON),
            0
        );
    }
}
