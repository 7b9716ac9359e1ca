//! Outbound messages from the editing core to the UI.

use serde::{Deserialize, Serialize};

use crate::commands::{MeshEditTool, MeshSelectionMode};

/// Updates emitted after a mesh edit command has been handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum MeshEditUpdate {
    /// Selection counts for the current mode changed
    SelectionChanged {
        mode: MeshSelectionMode,
        vertex_count: usize,
        edge_count: usize,
        face_count: usize,
    },

    /// A new buffer replaced the document geometry
    GeometryChanged {
        triangle_count: usize,
        /// Newly created outward-facing faces (empty after undo/redo)
        top_faces: Vec<u32>,
    },

    /// The operator declined (empty selection or degenerate amount); nothing changed
    OperationDeclined { tool: MeshEditTool },

    /// Undo/redo availability changed
    HistoryChanged { can_undo: bool, can_redo: bool },
}
