//! Vector helpers shared by the topology builder and the operators.
//!
//! `glam::Vec3` covers the arithmetic (add, sub, cross, dot, scale, lerp,
//! length). This module adds the pieces that are specific to working on flat
//! triangle-soup buffers.

use glam::Vec3;

use crate::constants::{FLOATS_PER_CORNER, FLOATS_PER_TRIANGLE, NORMALIZE_EPSILON};

/// Normalize `v`, falling back to `+Y` when it is (nearly) zero or not finite.
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let length = v.length();
    if !length.is_finite() || length < NORMALIZE_EPSILON {
        return Vec3::Y;
    }
    v / length
}

/// Unit normal and area of a triangle.
///
/// Degenerate triangles get area 0 and the `+Y` fallback normal.
pub fn triangle_normal_area(p0: Vec3, p1: Vec3, p2: Vec3) -> (Vec3, f32) {
    let cross = (p1 - p0).cross(p2 - p0);
    (safe_normalize(cross), cross.length() * 0.5)
}

/// Arithmetic mean of the three corners.
pub fn triangle_centroid(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p0 + p1 + p2) / 3.0
}

/// Number of whole triangles in a flat buffer (trailing floats are ignored).
pub fn triangle_count(positions: &[f32]) -> usize {
    positions.len() / FLOATS_PER_TRIANGLE
}

/// Read corner `corner` (0-based, 3 per triangle) from a flat buffer.
#[inline]
pub fn corner_position(positions: &[f32], corner: usize) -> Vec3 {
    Vec3::from_slice(&positions[corner * FLOATS_PER_CORNER..corner * FLOATS_PER_CORNER + 3])
}

/// Read the three corners of triangle `triangle` from a flat buffer.
#[inline]
pub fn triangle_corners(positions: &[f32], triangle: usize) -> [Vec3; 3] {
    let base = triangle * 3;
    [
        corner_position(positions, base),
        corner_position(positions, base + 1),
        corner_position(positions, base + 2),
    ]
}

/// Quantize a position onto the weld grid.
///
/// Two positions with the same key are the same vertex. Quantization runs in
/// f64 so large coordinates divided by a small epsilon don't lose the grid.
pub fn weld_key(position: Vec3, epsilon: f32) -> [i64; 3] {
    let epsilon = epsilon as f64;
    [
        (position.x as f64 / epsilon).round() as i64,
        (position.y as f64 / epsilon).round() as i64,
        (position.z as f64 / epsilon).round() as i64,
    ]
}

/// Append a triangle to a corner list.
#[inline]
pub fn push_triangle(corners: &mut Vec<[f32; 3]>, triangle: [Vec3; 3]) {
    corners.extend(triangle.map(|p| p.to_array()));
}

/// Flatten a corner list into the flat coordinate layout.
pub fn flatten_corners(corners: &[[f32; 3]]) -> Vec<f32> {
    bytemuck::cast_slice::<[f32; 3], f32>(corners).to_vec()
}
