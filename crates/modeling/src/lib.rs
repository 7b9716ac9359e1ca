//! Facet mesh modeling core - topology, selection and region operators
//!
//! This crate works directly on flat triangle-soup buffers (9 floats per
//! triangle, no index buffer):
//! - [`math`] - Vector helpers on top of `glam`
//! - [`topology`] - Welded vertices, edges and adjacency rebuilt from a soup
//! - [`selection`] - Vertex/edge/face selection sets and their algebra
//! - [`orientation`] - Winding repair for triangles appended to a mesh
//! - [`operations`] - Region extrude and region bevel
//! - [`history`] - Undo/redo of committed buffers
//! - [`session`] - The edit cycle driven by IPC commands
//! - `bevy_mesh` - Bevy `Mesh` conversion (feature `bevy`)
//!
//! Every operator is a pure function: it reads the current buffer and an
//! immutable [`PolyTopology`] snapshot and returns a replacement buffer, or
//! `None` when there is nothing to do.

pub mod constants;
pub mod error;
pub mod history;
pub mod math;
pub mod operations;
pub mod orientation;
pub mod selection;
pub mod session;
pub mod topology;

#[cfg(feature = "bevy")]
pub mod bevy_mesh;

#[cfg(feature = "bevy")]
pub use bevy_mesh::{positions_from_bevy_mesh, positions_to_bevy_mesh};
pub use constants::*;
pub use error::MeshEditError;
pub use history::{EditHistory, EditKind, EditRecord};
pub use operations::{
    PolyOperationResult, bevel, compute_face_selection_centroid_normal, extrude,
    sanitize_face_ids,
};
pub use orientation::{OrientationFixup, count_inconsistent_edges, fix_appended_orientation};
pub use selection::{ActiveElement, MeshEditSelectionSet, MeshSelections, SelectionPatch};
pub use session::MeshEditSession;
pub use topology::{
    EdgeId, EdgeKey, FaceId, PolyTopology, TopologyEdge, TopologyError, TopologyFace, VertexId,
};
