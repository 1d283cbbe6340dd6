use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::{EdgeStatus, IgnoredConnection, LogData};
use crate::resolve::{process_edges, ResolveOptions};
use crate::storage::{Storage, StorageError};

/// Owns the reconciled log graph and its persistence.
///
/// All mutation goes through here. Every mutating command re-runs the
/// resolver over the full edge list before the new state is observable, so
/// snapshots always carry consistent statuses. Commands referencing unknown
/// edge keys or node pairs are silent no-ops: they come from a UI that may
/// be acting on a stale snapshot.
pub struct LogManager<S: Storage> {
    storage: S,
    data: LogData,
}

impl<S: Storage> LogManager<S> {
    /// Creates a manager with an empty graph.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            data: LogData::default(),
        }
    }

    /// Creates a manager and loads the graph from storage.
    pub fn load(storage: S) -> Result<Self, ManagerError> {
        let mut manager = Self::new(storage);
        manager.reload()?;
        Ok(manager)
    }

    /// Replaces the in-memory graph from storage and resolves statuses.
    pub fn reload(&mut self) -> Result<(), ManagerError> {
        self.data = self.storage.load_logs()?;
        self.resolve();
        Ok(())
    }

    /// A read-only copy of the current graph.
    pub fn snapshot(&self) -> LogData {
        self.data.clone()
    }

    /// Writes the graph back to storage. The in-memory graph stays the
    /// source of truth if the write fails.
    pub fn save(&self) -> Result<(), ManagerError> {
        self.storage.save_logs(&self.data)?;
        Ok(())
    }

    /// Deletes edges by key, returning how many were removed. Unknown keys
    /// are skipped.
    pub fn delete_edges(&mut self, keys: &HashSet<String>) -> usize {
        let before = self.data.edges.len();
        self.data.edges.retain(|edge| !keys.contains(&edge.key));
        let removed = before - self.data.edges.len();
        debug!(removed, "deleted edges");
        self.resolve();
        removed
    }

    /// Pins an edge to a manual status.
    pub fn set_edge_status(&mut self, key: &str, status: EdgeStatus) {
        match self.data.edge_mut(key) {
            Some(edge) => edge.status = status,
            None => {
                warn!(key, "status update for unknown edge");
                return;
            }
        }
        self.resolve();
    }

    /// Adds or removes an ignored connection.
    pub fn set_connection_ignored(&mut self, source: &str, target: &str, ignored: bool) {
        if !self.data.nodes.contains_key(source) || !self.data.nodes.contains_key(target) {
            warn!(source, target, "ignore toggle for unknown connection");
            return;
        }
        self.data
            .ignored_connections
            .retain(|c| !(c.source_node == source && c.target_node == target));
        if ignored {
            self.data.ignored_connections.push(IgnoredConnection {
                source_node: source.to_string(),
                target_node: target.to_string(),
            });
        }
        self.resolve();
    }

    fn resolve(&mut self) {
        let options = ResolveOptions {
            ignored: Some(self.data.ignored_connections.clone()),
            ..ResolveOptions::default()
        };
        self.data.edges = process_edges(&self.data.edges, &options);
    }
}

/// Errors that can occur in manager commands.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
