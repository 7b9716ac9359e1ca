//! Conversion between Bevy meshes and flat triangle-soup buffers.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::error::MeshEditError;
use crate::math::{flatten_corners, triangle_corners, triangle_count, triangle_normal_area};

/// Flatten a Bevy triangle-list mesh into a soup buffer.
///
/// Indexed meshes are expanded corner by corner; non-indexed meshes are read
/// in order. A trailing partial triangle is dropped.
pub fn positions_from_bevy_mesh(mesh: &Mesh) -> Result<Vec<f32>, MeshEditError> {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return Err(MeshEditError::UnsupportedMesh(format!(
            "{:?}",
            mesh.primitive_topology()
        )));
    }

    let positions = mesh
        .attribute(Mesh::ATTRIBUTE_POSITION)
        .and_then(|attr| attr.as_float3())
        .ok_or(MeshEditError::MissingPositions)?;

    let indices: Vec<usize> = match mesh.indices() {
        Some(Indices::U16(idx)) => idx.iter().map(|&i| i as usize).collect(),
        Some(Indices::U32(idx)) => idx.iter().map(|&i| i as usize).collect(),
        None => (0..positions.len()).collect(),
    };

    let whole = indices.len() - indices.len() % 3;
    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(whole);
    for &index in &indices[..whole] {
        let corner = positions.get(index).ok_or_else(|| {
            MeshEditError::UnsupportedMesh(format!(
                "index {} out of range for {} positions",
                index,
                positions.len()
            ))
        })?;
        corners.push(*corner);
    }

    if whole < indices.len() {
        tracing::warn!(
            "positions_from_bevy_mesh: dropped {} trailing corners",
            indices.len() - whole
        );
    }

    Ok(flatten_corners(&corners))
}

/// Build a flat-shaded, non-indexed Bevy mesh from a soup buffer
pub fn positions_to_bevy_mesh(positions: &[f32]) -> Mesh {
    let count = triangle_count(positions);
    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(count * 3);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(count * 3);

    for triangle in 0..count {
        let [a, b, c] = triangle_corners(positions, triangle);
        let (normal, _) = triangle_normal_area(a, b, c);
        corners.extend([a.to_array(), b.to_array(), c.to_array()]);
        normals.extend([normal.to_array(); 3]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, corners);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::fixtures;

    fn indexed_square() -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
            ],
        );
        mesh.insert_indices(Indices::U16(vec![0, 1, 2, 0, 2, 3]));
        mesh
    }

    #[test]
    fn test_indexed_mesh_is_expanded() {
        let positions = positions_from_bevy_mesh(&indexed_square()).unwrap();
        assert_eq!(positions, fixtures::unit_square());
    }

    #[test]
    fn test_soup_roundtrip_through_mesh() {
        let soup = fixtures::tetrahedron();
        let mesh = positions_to_bevy_mesh(&soup);
        assert_eq!(mesh.count_vertices(), 12);
        assert_eq!(positions_from_bevy_mesh(&mesh).unwrap(), soup);
    }

    #[test]
    fn test_rejects_bad_meshes() {
        let mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        assert!(matches!(
            positions_from_bevy_mesh(&mesh),
            Err(MeshEditError::MissingPositions)
        ));

        let mut mesh = indexed_square();
        mesh.insert_indices(Indices::U32(vec![0, 1, 7]));
        assert!(matches!(
            positions_from_bevy_mesh(&mesh),
            Err(MeshEditError::UnsupportedMesh(_))
        ));

        let lines = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
        assert!(matches!(
            positions_from_bevy_mesh(&lines),
            Err(MeshEditError::UnsupportedMesh(_))
        ));
    }
}
