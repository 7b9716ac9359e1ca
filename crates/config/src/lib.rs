//! Shared configuration for Facet
//!
//! This crate provides the single source of truth for the tunable values of
//! the mesh editing core: the weld tolerance used when rebuilding topology
//! from a triangle soup, and how many committed edits the history keeps.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default weld tolerance for coincident triangle corners
pub const DEFAULT_WELD_EPSILON: f32 = 1e-5;

/// Default number of committed edits kept for undo
pub const DEFAULT_HISTORY_DEPTH: usize = 64;

/// Editing configuration for a mesh edit session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct EditConfig {
    /// Quantization tolerance used to weld coincident positions
    pub weld_epsilon: f32,
    /// Maximum number of undo records (oldest are dropped first)
    pub history_depth: usize,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            weld_epsilon: DEFAULT_WELD_EPSILON,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl EditConfig {
    /// Create a config with the given weld tolerance
    pub fn new(weld_epsilon: f32) -> Self {
        Self {
            weld_epsilon,
            ..Default::default()
        }
    }

    /// Set the weld tolerance
    pub fn with_weld_epsilon(mut self, weld_epsilon: f32) -> Self {
        self.weld_epsilon = weld_epsilon;
        self
    }

    /// Set the undo depth
    pub fn with_history_depth(mut self, history_depth: usize) -> Self {
        self.history_depth = history_depth;
        self
    }

    /// Whether every value is usable as-is
    pub fn is_valid(&self) -> bool {
        self.weld_epsilon.is_finite() && self.weld_epsilon > 0.0 && self.history_depth > 0
    }

    /// Replace unusable values with their defaults
    pub fn validated(mut self) -> Self {
        if !(self.weld_epsilon.is_finite() && self.weld_epsilon > 0.0) {
            tracing::warn!(
                "EditConfig: weld_epsilon {} is unusable, falling back to {}",
                self.weld_epsilon,
                DEFAULT_WELD_EPSILON
            );
            self.weld_epsilon = DEFAULT_WELD_EPSILON;
        }
        if self.history_depth == 0 {
            tracing::warn!(
                "EditConfig: history_depth 0 is unusable, falling back to {}",
                DEFAULT_HISTORY_DEPTH
            );
            self.history_depth = DEFAULT_HISTORY_DEPTH;
        }
        self
    }
}
