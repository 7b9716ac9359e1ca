//! Mesh editing command types.

use serde::{Deserialize, Serialize};

/// Sub-object selection mode for mesh editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeshSelectionMode {
    /// Select individual vertices
    #[default]
    Vertex,
    /// Select edges
    Edge,
    /// Select faces
    Face,
}

/// Region operator that can be committed from mesh edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshEditTool {
    /// Extrude the selected faces as one rigid region
    Extrude,
    /// Raise an inset ring on every selected face
    Bevel,
}

/// How a selection patch combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionOp {
    /// Discard the current selection and use the patch
    #[default]
    Replace,
    /// Union (shift+click)
    Merge,
    /// Difference (ctrl+click)
    Subtract,
    /// Symmetric difference
    Toggle,
}

/// Element that should become active, as raw ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveRef {
    Face(u32),
    /// Vertex id pair, in any order
    Edge([u32; 2]),
    Vertex(u32),
}

/// Commands for controlling mesh edit mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeshEditCommand {
    /// Replace the document geometry (flat triangle soup, 9 floats per triangle)
    SetGeometry { positions: Vec<f32> },
    /// Set the selection mode (vertex/edge/face)
    SetSelectionMode(MeshSelectionMode),
    /// Combine a patch with the selection of the current mode
    Select {
        op: SelectionOp,
        #[serde(default)]
        faces: Vec<u32>,
        #[serde(default)]
        edges: Vec<[u32; 2]>,
        #[serde(default)]
        vertices: Vec<u32>,
        #[serde(default)]
        active: Option<ActiveRef>,
    },
    /// Select all elements
    SelectAll,
    /// Deselect all elements
    DeselectAll,
    /// Invert selection
    InvertSelection,
    /// Extrude the selected faces by a signed distance
    Extrude { distance: f32 },
    /// Bevel the selected faces
    Bevel { amount: f32 },
    /// Revert the last committed operation
    Undo,
    /// Re-apply the last reverted operation
    Redo,
}
