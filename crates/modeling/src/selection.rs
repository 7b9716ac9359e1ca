//! Sub-object selection state for mesh edit mode
//!
//! A [`MeshEditSelectionSet`] holds selected faces, edges and vertices plus a
//! single active element. Collections are always deduplicated and ascending,
//! so two selections with the same content compare equal. The algebra
//! ([`MeshEditSelectionSet::merge`], [`subtract`](MeshEditSelectionSet::subtract),
//! [`toggle`](MeshEditSelectionSet::toggle)) is pure: ids are not checked
//! against a topology, that is the caller's job.

use std::collections::BTreeSet;

use facet_ipc::{ActiveRef, MeshSelectionMode, SelectionOp};
use serde::{Deserialize, Serialize};

use crate::topology::{EdgeKey, FaceId, PolyTopology, VertexId};

/// The active (most recently picked) element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveElement {
    #[default]
    None,
    Face(FaceId),
    Edge(EdgeKey),
    Vertex(VertexId),
}

impl From<ActiveRef> for ActiveElement {
    fn from(active: ActiveRef) -> Self {
        match active {
            ActiveRef::Face(id) => Self::Face(FaceId(id)),
            ActiveRef::Edge([a, b]) => Self::Edge(EdgeKey::new(VertexId(a), VertexId(b))),
            ActiveRef::Vertex(id) => Self::Vertex(VertexId(id)),
        }
    }
}

/// Elements to combine with a selection.
///
/// Input order and duplicates don't matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionPatch {
    pub faces: Vec<FaceId>,
    pub edges: Vec<EdgeKey>,
    pub vertices: Vec<VertexId>,
    /// Element to make active, if any
    pub active: Option<ActiveElement>,
}

impl SelectionPatch {
    pub fn faces(faces: impl IntoIterator<Item = FaceId>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn edges(edges: impl IntoIterator<Item = EdgeKey>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn vertices(vertices: impl IntoIterator<Item = VertexId>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Set the element to make active
    pub fn with_active(mut self, active: ActiveElement) -> Self {
        self.active = Some(active);
        self
    }
}

/// Selected faces, edges and vertices with one active element.
///
/// The active element, when set, is always a member of its collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshEditSelectionSet {
    faces: Vec<FaceId>,
    edges: Vec<EdgeKey>,
    vertices: Vec<VertexId>,
    active: ActiveElement,
}

impl MeshEditSelectionSet {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh selection directly from a patch.
    ///
    /// A patch's active element is selected along with it.
    pub fn replace(patch: &SelectionPatch) -> Self {
        let mut selection = Self {
            faces: sorted_unique(patch.faces.iter().copied()),
            edges: sorted_unique(patch.edges.iter().copied()),
            vertices: sorted_unique(patch.vertices.iter().copied()),
            active: ActiveElement::None,
        };
        if let Some(active) = patch.active {
            selection.activate(active);
        }
        selection
    }

    /// Component-wise union. The patch's active element, if given, wins.
    pub fn merge(&self, patch: &SelectionPatch) -> Self {
        let mut selection = Self {
            faces: sorted_unique(self.faces.iter().chain(&patch.faces).copied()),
            edges: sorted_unique(self.edges.iter().chain(&patch.edges).copied()),
            vertices: sorted_unique(self.vertices.iter().chain(&patch.vertices).copied()),
            active: self.active,
        };
        if let Some(active) = patch.active {
            selection.activate(active);
        }
        selection
    }

    /// Component-wise difference. Clears the active element if it was removed.
    pub fn subtract(&self, patch: &SelectionPatch) -> Self {
        let faces: BTreeSet<FaceId> = patch.faces.iter().copied().collect();
        let edges: BTreeSet<EdgeKey> = patch.edges.iter().copied().collect();
        let vertices: BTreeSet<VertexId> = patch.vertices.iter().copied().collect();

        let mut selection = Self {
            faces: self.faces.iter().filter(|f| !faces.contains(f)).copied().collect(),
            edges: self.edges.iter().filter(|e| !edges.contains(e)).copied().collect(),
            vertices: self
                .vertices
                .iter()
                .filter(|v| !vertices.contains(v))
                .copied()
                .collect(),
            active: self.active,
        };
        selection.drop_stale_active();
        selection
    }

    /// Component-wise symmetric difference.
    ///
    /// The active element is cleared if it was toggled off. A patch's active
    /// element is ignored, so toggling the same patch twice is the identity.
    pub fn toggle(&self, patch: &SelectionPatch) -> Self {
        let mut selection = Self {
            faces: symmetric_difference(&self.faces, &patch.faces),
            edges: symmetric_difference(&self.edges, &patch.edges),
            vertices: symmetric_difference(&self.vertices, &patch.vertices),
            active: self.active,
        };
        selection.drop_stale_active();
        selection
    }

    /// Apply a patch with the given combination rule
    pub fn apply(&self, op: SelectionOp, patch: &SelectionPatch) -> Self {
        match op {
            SelectionOp::Replace => Self::replace(patch),
            SelectionOp::Merge => self.merge(patch),
            SelectionOp::Subtract => self.subtract(patch),
            SelectionOp::Toggle => self.toggle(patch),
        }
    }

    /// Select every element of `mode`'s kind in `topology`.
    ///
    /// The other two collections are left empty.
    pub fn select_all(topology: &PolyTopology, mode: MeshSelectionMode) -> Self {
        let mut selection = Self::new();
        match mode {
            MeshSelectionMode::Face => {
                selection.faces = topology.faces().iter().map(|f| f.id).collect();
            }
            MeshSelectionMode::Edge => {
                selection.edges = sorted_unique(topology.edges().iter().map(|e| e.key));
            }
            MeshSelectionMode::Vertex => {
                selection.vertices = (0..topology.vertex_count() as u32).map(VertexId).collect();
            }
        }
        selection
    }

    /// Complement of `mode`'s collection within `topology`.
    pub fn invert(&self, topology: &PolyTopology, mode: MeshSelectionMode) -> Self {
        let all = Self::select_all(topology, mode);
        let mut selection = self.clone();
        match mode {
            MeshSelectionMode::Face => {
                selection.faces = symmetric_difference(&all.faces, &self.faces)
                    .into_iter()
                    .filter(|f| (f.0 as usize) < topology.face_count())
                    .collect();
            }
            MeshSelectionMode::Edge => {
                selection.edges = symmetric_difference(&all.edges, &self.edges)
                    .into_iter()
                    .filter(|e| topology.edge_by_key(*e).is_some())
                    .collect();
            }
            MeshSelectionMode::Vertex => {
                selection.vertices = symmetric_difference(&all.vertices, &self.vertices)
                    .into_iter()
                    .filter(|v| (v.0 as usize) < topology.vertex_count())
                    .collect();
            }
        }
        selection.drop_stale_active();
        selection
    }

    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn active(&self) -> ActiveElement {
        self.active
    }

    pub fn contains_face(&self, face: FaceId) -> bool {
        self.faces.binary_search(&face).is_ok()
    }

    pub fn contains_edge(&self, edge: EdgeKey) -> bool {
        self.edges.binary_search(&edge).is_ok()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.edges.is_empty() && self.vertices.is_empty()
    }

    /// Get the total count of selected elements
    pub fn len(&self) -> usize {
        self.faces.len() + self.edges.len() + self.vertices.len()
    }

    fn contains_active(&self, active: ActiveElement) -> bool {
        match active {
            ActiveElement::None => true,
            ActiveElement::Face(face) => self.contains_face(face),
            ActiveElement::Edge(edge) => self.contains_edge(edge),
            ActiveElement::Vertex(vertex) => self.contains_vertex(vertex),
        }
    }

    /// Make `active` the active element, selecting it if needed
    fn activate(&mut self, active: ActiveElement) {
        match active {
            ActiveElement::None => {}
            ActiveElement::Face(face) => insert_sorted(&mut self.faces, face),
            ActiveElement::Edge(edge) => insert_sorted(&mut self.edges, edge),
            ActiveElement::Vertex(vertex) => insert_sorted(&mut self.vertices, vertex),
        }
        self.active = active;
    }

    fn drop_stale_active(&mut self) {
        if !self.contains_active(self.active) {
            self.active = ActiveElement::None;
        }
    }
}

/// One independent selection per component kind, plus the current mode.
///
/// Switching modes never clears the other modes' selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSelections {
    pub mode: MeshSelectionMode,
    pub vertex: MeshEditSelectionSet,
    pub edge: MeshEditSelectionSet,
    pub face: MeshEditSelectionSet,
}

impl MeshSelections {
    /// Selection for a mode
    pub fn get(&self, mode: MeshSelectionMode) -> &MeshEditSelectionSet {
        match mode {
            MeshSelectionMode::Vertex => &self.vertex,
            MeshSelectionMode::Edge => &self.edge,
            MeshSelectionMode::Face => &self.face,
        }
    }

    /// Mutable selection for a mode
    pub fn get_mut(&mut self, mode: MeshSelectionMode) -> &mut MeshEditSelectionSet {
        match mode {
            MeshSelectionMode::Vertex => &mut self.vertex,
            MeshSelectionMode::Edge => &mut self.edge,
            MeshSelectionMode::Face => &mut self.face,
        }
    }

    /// Selection for the current mode
    pub fn current(&self) -> &MeshEditSelectionSet {
        self.get(self.mode)
    }

    /// Clear all selections
    pub fn clear(&mut self) {
        self.vertex = MeshEditSelectionSet::new();
        self.edge = MeshEditSelectionSet::new();
        self.face = MeshEditSelectionSet::new();
    }
}

fn sorted_unique<T: Ord + Copy>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    items.into_iter().collect::<BTreeSet<T>>().into_iter().collect()
}

fn symmetric_difference<T: Ord + Copy>(base: &[T], patch: &[T]) -> Vec<T> {
    let base: BTreeSet<T> = base.iter().copied().collect();
    let patch: BTreeSet<T> = patch.iter().copied().collect();
    base.symmetric_difference(&patch).copied().collect()
}

fn insert_sorted<T: Ord>(items: &mut Vec<T>, item: T) {
    if let Err(position) = items.binary_search(&item) {
        items.insert(position, item);
    }
}
