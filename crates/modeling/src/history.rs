//! Undo/redo for committed region operations
//!
//! Each record holds the whole buffer before and after an operation.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use facet_ipc::MeshEditTool;

/// Operation that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    Extrude,
    Bevel,
}

impl From<EditKind> for MeshEditTool {
    fn from(kind: EditKind) -> Self {
        match kind {
            EditKind::Extrude => MeshEditTool::Extrude,
            EditKind::Bevel => MeshEditTool::Bevel,
        }
    }
}

/// One committed operation
#[derive(Debug, Clone, PartialEq)]
pub struct EditRecord {
    pub kind: EditKind,
    /// Buffer before the operation
    pub before: Vec<f32>,
    /// Buffer the operation produced
    pub after: Vec<f32>,
}

/// Bounded undo and redo stacks
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<EditRecord>,
    redo_stack: Vec<EditRecord>,
    max_depth: usize,
}

impl EditHistory {
    /// Create a history keeping at most `max_depth` undo records
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a committed operation. Clears the redo stack.
    pub fn push(&mut self, record: EditRecord) {
        self.redo_stack.clear();
        self.undo_stack.push_back(record);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Undo the last operation
    ///
    /// Returns the buffer to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&[f32]> {
        let Some(record) = self.undo_stack.pop_back() else {
            debug!("Undo: no entries available");
            return None;
        };
        debug!("Undoing {:?} ({} floats)", record.kind, record.before.len());
        self.redo_stack.push(record);
        self.redo_stack.last().map(|record| record.before.as_slice())
    }

    /// Redo the last undone operation
    ///
    /// Returns the buffer to restore, or `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&[f32]> {
        let Some(record) = self.redo_stack.pop() else {
            debug!("Redo: no entries available");
            return None;
        };
        debug!("Redoing {:?} ({} floats)", record.kind, record.after.len());
        self.undo_stack.push_back(record);
        self.undo_stack.back().map(|record| record.after.as_slice())
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(facet_config::DEFAULT_HISTORY_DEPTH)
    }
}
