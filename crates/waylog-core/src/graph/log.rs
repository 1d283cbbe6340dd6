use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Edge, IgnoredConnection, Node};

/// Aggregate root for a reconciled set of movement logs.
///
/// Owned exclusively by the manager; collaborators work from snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogData {
    /// All known action names.
    pub actions: BTreeSet<String>,
    /// All known state keys.
    pub states: BTreeSet<String>,
    /// Nodes mapped by key.
    pub nodes: BTreeMap<String, Node>,
    /// Every observed traversal, across all connections.
    pub edges: Vec<Edge>,
    /// Connections excluded from review without deleting their edges.
    pub ignored_connections: Vec<IgnoredConnection>,
}

impl LogData {
    /// Looks up an edge by its generated key.
    pub fn edge(&self, key: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.key == key)
    }

    pub(crate) fn edge_mut(&mut self, key: &str) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.key == key)
    }

    /// Whether the ordered pair is in the ignored-connection overlay.
    pub fn is_connection_ignored(&self, source: &str, target: &str) -> bool {
        self.ignored_connections
            .iter()
            .any(|c| c.source_node == source && c.target_node == target)
    }
}
