//! Extraction configuration

use serde::{Deserialize, Serialize};

/// Which edges a traversal may follow from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalDirection {
    /// Subject to object only.
    Outgoing,
    /// Object to subject only.
    Incoming,
    #[default]
    Both,
}

impl TraversalDirection {
    pub fn follows_outgoing(&self) -> bool {
        matches!(self, TraversalDirection::Outgoing | TraversalDirection::Both)
    }

    pub fn follows_incoming(&self) -> bool {
        matches!(self, TraversalDirection::Incoming | TraversalDirection::Both)
    }
}

/// Extraction settings. Every field has a default, so a partial JSON
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Depth used by requests that give a seed but no explicit depth.
    pub default_depth: usize,
    pub direction: TraversalDirection,
    /// Add a Declaration for entities of the projection that had none in
    /// the source.
    pub synthesize_declarations: bool,
    /// Upper bound on `random_sample` sizes. `None` means unbounded.
    pub max_sample_size: Option<usize>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_depth: 2,
            direction: TraversalDirection::Both,
            synthesize_declarations: true,
            max_sample_size: None,
        }
    }
}

impl ExtractionConfig {
    pub fn with_direction(mut self, direction: TraversalDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth;
        self
    }

    /// Clamp a requested sample size to the configured ceiling.
    pub fn sample_size(&self, requested: usize) -> usize {
        match self.max_sample_size {
            Some(max) => requested.min(max),
            None => requested,
        }
    }
}
