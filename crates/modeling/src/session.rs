//! Mesh edit session
//!
//! Owns the document buffer and drives the edit cycle:
//! rebuild topology, update the selection, run an operator, commit the new
//! buffer, rebuild again. Every commit replaces the buffer wholesale and the
//! topology is never patched in place.

use facet_config::EditConfig;
use facet_ipc::{MeshEditCommand, MeshEditUpdate, MeshSelectionMode, SelectionOp};
use tracing::{debug, info};

use crate::constants::FLOATS_PER_TRIANGLE;
use crate::error::MeshEditError;
use crate::history::{EditHistory, EditKind, EditRecord};
use crate::operations::{PolyOperationResult, bevel, extrude};
use crate::selection::{ActiveElement, MeshEditSelectionSet, MeshSelections, SelectionPatch};
use crate::topology::{EdgeKey, FaceId, PolyTopology, VertexId};

/// Editable mesh with selection and undo state
#[derive(Debug, Clone)]
pub struct MeshEditSession {
    positions: Vec<f32>,
    topology: PolyTopology,
    selections: MeshSelections,
    config: EditConfig,
    history: EditHistory,
}

impl MeshEditSession {
    /// Start a session on a triangle soup.
    pub fn new(positions: Vec<f32>, config: EditConfig) -> Result<Self, MeshEditError> {
        if !config.is_valid() {
            return Err(MeshEditError::InvalidConfig(format!(
                "weld_epsilon {} / history_depth {}",
                config.weld_epsilon, config.history_depth
            )));
        }
        validate_positions(&positions)?;

        let topology = PolyTopology::build(&positions, config.weld_epsilon);
        info!(
            "Mesh edit session: {} triangles, {} vertices, {} edges",
            topology.face_count(),
            topology.vertex_count(),
            topology.edge_count()
        );

        Ok(Self {
            positions,
            topology,
            selections: MeshSelections::default(),
            history: EditHistory::new(config.history_depth),
            config,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current flat coordinate buffer
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Topology of the current buffer
    pub fn topology(&self) -> &PolyTopology {
        &self.topology
    }

    pub fn selections(&self) -> &MeshSelections {
        &self.selections
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn mode(&self) -> MeshSelectionMode {
        self.selections.mode
    }

    /// Faces the region operators act on
    pub fn selected_faces(&self) -> &[FaceId] {
        self.selections.face.faces()
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Replace the document buffer. Clears history and selections.
    pub fn set_geometry(&mut self, positions: Vec<f32>) -> Result<(), MeshEditError> {
        validate_positions(&positions)?;
        self.positions = positions;
        self.rebuild_topology();
        self.history.clear();
        self.selections.clear();
        Ok(())
    }

    fn rebuild_topology(&mut self) {
        self.topology = PolyTopology::build(&self.positions, self.config.weld_epsilon);
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Switch the selection mode. Other modes keep their selections.
    pub fn set_mode(&mut self, mode: MeshSelectionMode) {
        self.selections.mode = mode;
        debug!("Set selection mode to {:?}", mode);
    }

    /// Combine a patch with the current mode's selection.
    ///
    /// Ids that don't exist in the current topology are dropped first.
    pub fn apply_selection(&mut self, op: SelectionOp, patch: &SelectionPatch) {
        let patch = self.filter_patch(patch);
        let mode = self.selections.mode;
        let current = self.selections.get(mode).apply(op, &patch);
        *self.selections.get_mut(mode) = current;
    }

    /// Select every element of the current mode's kind
    pub fn select_all(&mut self) {
        let mode = self.selections.mode;
        *self.selections.get_mut(mode) = MeshEditSelectionSet::select_all(&self.topology, mode);
    }

    /// Clear the current mode's selection
    pub fn deselect_all(&mut self) {
        *self.selections.get_mut(self.selections.mode) = MeshEditSelectionSet::new();
    }

    /// Invert the current mode's selection
    pub fn invert_selection(&mut self) {
        let mode = self.selections.mode;
        let inverted = self.selections.get(mode).invert(&self.topology, mode);
        *self.selections.get_mut(mode) = inverted;
    }

    fn filter_patch(&self, patch: &SelectionPatch) -> SelectionPatch {
        let topology = &self.topology;
        let face_ok = |face: &FaceId| (face.0 as usize) < topology.face_count();
        let edge_ok = |edge: &EdgeKey| topology.edge_by_key(*edge).is_some();
        let vertex_ok = |vertex: &VertexId| (vertex.0 as usize) < topology.vertex_count();

        let filtered = SelectionPatch {
            faces: patch.faces.iter().copied().filter(face_ok).collect(),
            edges: patch.edges.iter().copied().filter(edge_ok).collect(),
            vertices: patch.vertices.iter().copied().filter(vertex_ok).collect(),
            active: patch.active.filter(|active| match active {
                ActiveElement::None => true,
                ActiveElement::Face(face) => face_ok(face),
                ActiveElement::Edge(edge) => edge_ok(edge),
                ActiveElement::Vertex(vertex) => vertex_ok(vertex),
            }),
        };

        let dropped = patch.faces.len() + patch.edges.len() + patch.vertices.len()
            - filtered.faces.len()
            - filtered.edges.len()
            - filtered.vertices.len();
        if dropped > 0 {
            tracing::trace!("Dropped {} unknown ids from selection patch", dropped);
        }
        filtered
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Extrude result for the current face selection, without committing
    pub fn preview_extrude(&self, distance: f32) -> Option<PolyOperationResult> {
        extrude(&self.positions, &self.topology, self.selected_faces(), distance)
    }

    /// Bevel result for the current face selection, without committing
    pub fn preview_bevel(&self, amount: f32) -> Option<PolyOperationResult> {
        bevel(&self.positions, &self.topology, self.selected_faces(), amount)
    }

    /// Extrude the selected faces and commit.
    ///
    /// Returns the new top faces, or `None` if the operation declined.
    pub fn extrude(&mut self, distance: f32) -> Option<Vec<FaceId>> {
        let result = self.preview_extrude(distance)?;
        Some(self.commit(EditKind::Extrude, result))
    }

    /// Bevel the selected faces and commit.
    ///
    /// Returns the new cap faces, or `None` if the operation declined.
    pub fn bevel(&mut self, amount: f32) -> Option<Vec<FaceId>> {
        let result = self.preview_bevel(amount)?;
        Some(self.commit(EditKind::Bevel, result))
    }

    fn commit(&mut self, kind: EditKind, result: PolyOperationResult) -> Vec<FaceId> {
        let PolyOperationResult {
            next_positions,
            top_face_ids,
        } = result;

        let before = std::mem::replace(&mut self.positions, next_positions);
        self.history.push(EditRecord {
            kind,
            before,
            after: self.positions.clone(),
        });
        self.rebuild_topology();

        // Old vertex and edge ids don't survive a rebuild
        let mut patch = SelectionPatch::faces(top_face_ids.iter().copied());
        if let Some(&last) = top_face_ids.last() {
            patch = patch.with_active(ActiveElement::Face(last));
        }
        self.selections.vertex = MeshEditSelectionSet::new();
        self.selections.edge = MeshEditSelectionSet::new();
        self.selections.face = MeshEditSelectionSet::replace(&patch);

        info!(
            "Committed {:?}: {} triangles, {} new top faces",
            kind,
            self.topology.face_count(),
            top_face_ids.len()
        );
        top_face_ids
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Revert the last committed operation. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        let Some(before) = self.history.undo() else {
            return false;
        };
        self.positions = before.to_vec();
        self.after_history_step();
        true
    }

    /// Re-apply the last reverted operation. Returns false if there was none.
    pub fn redo(&mut self) -> bool {
        let Some(after) = self.history.redo() else {
            return false;
        };
        self.positions = after.to_vec();
        self.after_history_step();
        true
    }

    fn after_history_step(&mut self) {
        self.rebuild_topology();
        self.selections.clear();
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Handle a command from the interactive layer.
    ///
    /// Returns the updates to send back. A declined operation is reported as
    /// [`MeshEditUpdate::OperationDeclined`], not as an error.
    pub fn handle_command(
        &mut self,
        command: MeshEditCommand,
    ) -> Result<Vec<MeshEditUpdate>, MeshEditError> {
        let updates = match command {
            MeshEditCommand::SetGeometry { positions } => {
                self.set_geometry(positions)?;
                vec![
                    self.geometry_changed(Vec::new()),
                    self.selection_changed(),
                    self.history_changed(),
                ]
            }
            MeshEditCommand::SetSelectionMode(mode) => {
                self.set_mode(mode);
                vec![self.selection_changed()]
            }
            MeshEditCommand::Select {
                op,
                faces,
                edges,
                vertices,
                active,
            } => {
                let patch = SelectionPatch {
                    faces: faces.into_iter().map(FaceId).collect(),
                    edges: edges
                        .into_iter()
                        .map(|[a, b]| EdgeKey::new(VertexId(a), VertexId(b)))
                        .collect(),
                    vertices: vertices.into_iter().map(VertexId).collect(),
                    active: active.map(ActiveElement::from),
                };
                self.apply_selection(op, &patch);
                vec![self.selection_changed()]
            }
            MeshEditCommand::SelectAll => {
                self.select_all();
                vec![self.selection_changed()]
            }
            MeshEditCommand::DeselectAll => {
                self.deselect_all();
                vec![self.selection_changed()]
            }
            MeshEditCommand::InvertSelection => {
                self.invert_selection();
                vec![self.selection_changed()]
            }
            MeshEditCommand::Extrude { distance } => match self.extrude(distance) {
                Some(top_faces) => self.operation_committed(top_faces),
                None => declined(EditKind::Extrude),
            },
            MeshEditCommand::Bevel { amount } => match self.bevel(amount) {
                Some(top_faces) => self.operation_committed(top_faces),
                None => declined(EditKind::Bevel),
            },
            MeshEditCommand::Undo => {
                if self.undo() {
                    self.history_stepped()
                } else {
                    Vec::new()
                }
            }
            MeshEditCommand::Redo => {
                if self.redo() {
                    self.history_stepped()
                } else {
                    Vec::new()
                }
            }
        };
        Ok(updates)
    }

    fn operation_committed(&self, top_faces: Vec<FaceId>) -> Vec<MeshEditUpdate> {
        vec![
            self.geometry_changed(top_faces),
            self.selection_changed(),
            self.history_changed(),
        ]
    }

    fn history_stepped(&self) -> Vec<MeshEditUpdate> {
        vec![
            self.geometry_changed(Vec::new()),
            self.selection_changed(),
            self.history_changed(),
        ]
    }

    fn geometry_changed(&self, top_faces: Vec<FaceId>) -> MeshEditUpdate {
        MeshEditUpdate::GeometryChanged {
            triangle_count: self.positions.len() / FLOATS_PER_TRIANGLE,
            top_faces: top_faces.into_iter().map(|face| face.0).collect(),
        }
    }

    fn selection_changed(&self) -> MeshEditUpdate {
        MeshEditUpdate::SelectionChanged {
            mode: self.selections.mode,
            vertex_count: self.selections.vertex.vertices().len(),
            edge_count: self.selections.edge.edges().len(),
            face_count: self.selections.face.faces().len(),
        }
    }

    fn history_changed(&self) -> MeshEditUpdate {
        MeshEditUpdate::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}

fn declined(kind: EditKind) -> Vec<MeshEditUpdate> {
    debug!("{:?} declined", kind);
    vec![MeshEditUpdate::OperationDeclined { tool: kind.into() }]
}

/// Check a buffer is whole triangles of finite coordinates
fn validate_positions(positions: &[f32]) -> Result<(), MeshEditError> {
    if positions.len() % FLOATS_PER_TRIANGLE != 0 {
        return Err(MeshEditError::InvalidBufferLength(positions.len()));
    }
    if let Some(index) = positions.iter().position(|value| !value.is_finite()) {
        return Err(MeshEditError::NonFiniteCoordinate(index));
    }
    Ok(())
}
