//! Winding repair for triangles appended to an already consistent mesh.
//!
//! Neighboring triangles of a consistently wound mesh traverse their shared
//! edge in opposite directions. Starting from the base triangles (which are
//! authoritative and never flipped), a breadth-first walk over the face dual
//! graph assigns every appended triangle a parity: 0 keeps its winding, 1
//! flips it. A neighbor that uses a shared edge in the *same* direction must
//! take the opposite parity; one that uses it in the opposite direction takes
//! the same parity.

use std::collections::{HashMap, VecDeque};

use crate::math::{corner_position, flatten_corners, triangle_count, weld_key};
use crate::topology::{EdgeKey, VertexId};

/// Corrected appended block.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationFixup {
    /// Appended triangles with consistent winding (same length as the input block)
    pub positions: Vec<f32>,
    /// Indices (within the appended block) of triangles that were flipped
    pub flipped: Vec<usize>,
}

/// One directed use of an undirected edge.
#[derive(Debug, Clone, Copy)]
struct EdgeUse {
    triangle: usize,
    from: VertexId,
}

/// Welded vertex ids per triangle for a combined buffer, and directed edge uses.
struct DualGraph {
    triangles: Vec<[VertexId; 3]>,
    edge_uses: HashMap<EdgeKey, Vec<EdgeUse>>,
}

impl DualGraph {
    /// Weld ids locally; base and appended blocks repeat positions, so the
    /// outer topology's ids can't be reused.
    fn build(blocks: [&[f32]; 2], epsilon: f32) -> Self {
        let mut key_to_vertex: HashMap<[i64; 3], VertexId> = HashMap::new();
        let mut triangles = Vec::new();

        for block in blocks {
            for tri_idx in 0..triangle_count(block) {
                let mut ids = [VertexId(0); 3];
                for (slot, id) in ids.iter_mut().enumerate() {
                    let key = weld_key(corner_position(block, tri_idx * 3 + slot), epsilon);
                    let next = VertexId(key_to_vertex.len() as u32);
                    *id = *key_to_vertex.entry(key).or_insert(next);
                }
                triangles.push(ids);
            }
        }

        let mut edge_uses: HashMap<EdgeKey, Vec<EdgeUse>> = HashMap::new();
        for (triangle, &[a, b, c]) in triangles.iter().enumerate() {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                if from == to {
                    continue;
                }
                edge_uses
                    .entry(EdgeKey::new(from, to))
                    .or_default()
                    .push(EdgeUse { triangle, from });
            }
        }

        Self {
            triangles,
            edge_uses,
        }
    }

    /// Directed edges of a triangle, skipping collapsed ones
    fn directed_edges(&self, triangle: usize) -> impl Iterator<Item = (VertexId, VertexId)> {
        let [a, b, c] = self.triangles[triangle];
        [(a, b), (b, c), (c, a)]
            .into_iter()
            .filter(|(from, to)| from != to)
    }

    /// Drain the worklist, assigning parities to unvisited neighbors
    fn propagate(&self, parity: &mut [Option<bool>], queue: &mut VecDeque<usize>) {
        while let Some(current) = queue.pop_front() {
            let Some(current_parity) = parity[current] else {
                continue;
            };
            for (from, to) in self.directed_edges(current) {
                let Some(uses) = self.edge_uses.get(&EdgeKey::new(from, to)) else {
                    continue;
                };
                for edge_use in uses {
                    if edge_use.triangle == current || parity[edge_use.triangle].is_some() {
                        continue;
                    }
                    let same_direction = edge_use.from == from;
                    parity[edge_use.triangle] = Some(current_parity ^ same_direction);
                    queue.push_back(edge_use.triangle);
                }
            }
        }
    }
}

/// Compute a consistent winding for `appended` against `base`.
///
/// Base triangles are seeded with parity 0 and never change. Appended
/// triangles that are not reachable from the base are seeded at parity 0 in
/// block order. A flipped triangle has its second and third corners swapped.
pub fn fix_appended_orientation(base: &[f32], appended: &[f32], epsilon: f32) -> OrientationFixup {
    let graph = DualGraph::build([base, appended], epsilon);
    let base_count = triangle_count(base);
    let appended_count = triangle_count(appended);

    let mut parity: Vec<Option<bool>> = vec![None; graph.triangles.len()];
    let mut queue = VecDeque::new();

    for triangle in 0..base_count {
        parity[triangle] = Some(false);
        queue.push_back(triangle);
    }
    graph.propagate(&mut parity, &mut queue);

    // Disconnected new geometry
    for triangle in base_count..base_count + appended_count {
        if parity[triangle].is_none() {
            parity[triangle] = Some(false);
            queue.push_back(triangle);
            graph.propagate(&mut parity, &mut queue);
        }
    }

    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(appended_count * 3);
    let mut flipped = Vec::new();
    for local in 0..appended_count {
        let base_corner = local * 3;
        let p0 = corner_position(appended, base_corner).to_array();
        let p1 = corner_position(appended, base_corner + 1).to_array();
        let p2 = corner_position(appended, base_corner + 2).to_array();

        if parity[base_count + local] == Some(true) {
            corners.extend([p0, p2, p1]);
            flipped.push(local);
        } else {
            corners.extend([p0, p1, p2]);
        }
    }

    if !flipped.is_empty() {
        tracing::debug!(
            "fix_appended_orientation: flipped {} of {} appended triangles",
            flipped.len(),
            appended_count
        );
    }

    OrientationFixup {
        positions: flatten_corners(&corners),
        flipped,
    }
}

/// Count edges shared by exactly two triangles whose uses run the same way.
///
/// Zero for a consistently wound buffer.
pub fn count_inconsistent_edges(positions: &[f32], epsilon: f32) -> usize {
    let graph = DualGraph::build([positions, &[]], epsilon);
    graph
        .edge_uses
        .values()
        .filter(|uses| uses.len() == 2 && uses[0].from == uses[1].from)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_WELD_EPSILON;
    use crate::topology::fixtures;

    fn flip_triangle(positions: &mut [f32], triangle: usize) {
        let start = triangle * 9;
        for axis in 0..3 {
            positions.swap(start + 3 + axis, start + 6 + axis);
        }
    }

    #[test]
    fn test_consistent_append_is_untouched() {
        let strip = fixtures::strip();
        let (base, appended) = strip.split_at(18);
        let fixup = fix_appended_orientation(base, appended, DEFAULT_WELD_EPSILON);
        assert!(fixup.flipped.is_empty());
        assert_eq!(fixup.positions, appended.to_vec());
    }

    #[test]
    fn test_flipped_neighbor_is_repaired() {
        let strip = fixtures::strip();
        let (base, appended) = strip.split_at(18);
        let mut appended = appended.to_vec();
        flip_triangle(&mut appended, 0);

        let fixup = fix_appended_orientation(base, &appended, DEFAULT_WELD_EPSILON);
        assert_eq!(fixup.flipped, vec![0]);

        let mut combined = base.to_vec();
        combined.extend(&fixup.positions);
        assert_eq!(count_inconsistent_edges(&combined, DEFAULT_WELD_EPSILON), 0);
    }

    #[test]
    fn test_base_is_authoritative() {
        // Appended triangle agrees with itself but the base was given flipped
        let strip = fixtures::strip();
        let mut base = strip[..18].to_vec();
        flip_triangle(&mut base, 0);
        flip_triangle(&mut base, 1);
        let fixup = fix_appended_orientation(&base, &strip[18..], DEFAULT_WELD_EPSILON);
        assert_eq!(fixup.flipped, vec![0, 1]);

        let mut combined = base.clone();
        combined.extend(&fixup.positions);
        assert_eq!(count_inconsistent_edges(&combined, DEFAULT_WELD_EPSILON), 0);
    }

    #[test]
    fn test_disconnected_block_is_seeded_locally() {
        let mut tetrahedron = fixtures::tetrahedron();
        for value in tetrahedron.iter_mut() {
            *value += 10.0;
        }
        flip_triangle(&mut tetrahedron, 2);

        let fixup =
            fix_appended_orientation(&fixtures::triangle(), &tetrahedron, DEFAULT_WELD_EPSILON);
        // First appended triangle keeps its winding; the odd one out flips
        assert_eq!(fixup.flipped, vec![2]);
        assert_eq!(count_inconsistent_edges(&fixup.positions, DEFAULT_WELD_EPSILON), 0);
    }

    #[test]
    fn test_fixup_is_idempotent() {
        let mut tetrahedron = fixtures::tetrahedron();
        flip_triangle(&mut tetrahedron, 1);
        flip_triangle(&mut tetrahedron, 3);

        let first = fix_appended_orientation(&[], &tetrahedron, DEFAULT_WELD_EPSILON);
        assert!(!first.flipped.is_empty());
        let second = fix_appended_orientation(&[], &first.positions, DEFAULT_WELD_EPSILON);
        assert!(second.flipped.is_empty());
        assert_eq!(second.positions, first.positions);
    }

    #[test]
    fn test_empty_blocks() {
        let fixup = fix_appended_orientation(&[], &[], DEFAULT_WELD_EPSILON);
        assert!(fixup.positions.is_empty());
        assert!(fixup.flipped.is_empty());
    }
}
