use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status of an edge.
///
/// The resolver only ever assigns `Active` and `Redundant`. `Unverified` is
/// the default for fresh observations; `Rejected` is a manual verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    #[default]
    Unverified,
    Active,
    Redundant,
    Rejected,
}

/// A single observed traversal between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Generated unique id, stable for the edge's lifetime. Referenced by
    /// UI and deletion commands; never persisted.
    pub key: String,
    /// Scene the traversal started in.
    pub source_scene: String,
    /// Source node key.
    pub source_node: String,
    /// Target node key.
    pub target_node: String,
    /// Actions performed during the traversal.
    pub actions: BTreeSet<String>,
    /// State flags that held during the traversal, e.g. `"SceneX/DoorOpen"`.
    pub states: BTreeSet<String>,
    /// Whether source and target scenes differ.
    pub scene_change: bool,
    /// Real-time clock at the observation, in seconds.
    pub real_time: f64,
    /// In-game clock at the observation, in seconds.
    pub game_time: f64,
    /// When the traversal was recorded.
    pub timestamp: f64,
    /// Review status; recomputed by the resolver unless manually pinned.
    pub status: EdgeStatus,
    /// True iff the edge's connection is in the ignored overlay.
    pub ignored: bool,
}

impl Edge {
    /// Creates an edge between two node keys with a fresh key and empty
    /// requirement sets.
    pub fn new(
        source_scene: impl Into<String>,
        source_node: impl Into<String>,
        target_node: impl Into<String>,
    ) -> Self {
        Self {
            key: Uuid::new_v4().to_string(),
            source_scene: source_scene.into(),
            source_node: source_node.into(),
            target_node: target_node.into(),
            actions: BTreeSet::new(),
            states: BTreeSet::new(),
            scene_change: false,
            real_time: 0.0,
            game_time: 0.0,
            timestamp: 0.0,
            status: EdgeStatus::Unverified,
            ignored: false,
        }
    }

    /// The ordered connection pair this edge belongs to. Direction matters:
    /// A→B and B→A are distinct connections.
    pub fn connection(&self) -> (&str, &str) {
        (&self.source_node, &self.target_node)
    }
}

/// A connection the user has flagged as uninteresting.
///
/// Edges whose (source, target) pair matches are marked `ignored` but keep
/// their own status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredConnection {
    pub source_node: String,
    pub target_node: String,
}

impl IgnoredConnection {
    /// Whether this overlay entry covers the edge's connection.
    pub fn matches(&self, edge: &Edge) -> bool {
        self.source_node == edge.source_node && self.target_node == edge.target_node
    }
}
