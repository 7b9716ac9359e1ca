//! Error types for mesh edit sessions.

/// Errors that can occur when constructing or driving a [`crate::MeshEditSession`].
///
/// Degenerate operations (empty selection, zero distance) are not errors;
/// operators return `None` for those.
#[derive(Debug, thiserror::Error)]
pub enum MeshEditError {
    #[error("Position buffer length {0} is not a multiple of 9")]
    InvalidBufferLength(usize),

    #[error("Position buffer has a non-finite value at index {0}")]
    NonFiniteCoordinate(usize),

    #[error("Invalid edit configuration: {0}")]
    InvalidConfig(String),

    #[error("Mesh has no position attribute")]
    MissingPositions,

    #[error("Mesh is not a triangle list: {0}")]
    UnsupportedMesh(String),
}
