use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::StorageConfig;
use crate::graph::{Edge, IgnoredConnection, LogData, Node};

use super::error::StorageError;
use super::rows::{ActionRow, EdgeRow, IgnoredRow, NodeRow, StateRow};
use super::table::{read_table_opt, write_table, TableRow};
use super::Storage;

/// Log storage over a directory of tab-separated tables.
pub struct FileStorage {
    base_path: PathBuf,
    config: StorageConfig,
}

impl FileStorage {
    /// Storage over the default data directory.
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    /// Storage over the configured data directory.
    pub fn with_config(config: StorageConfig) -> Self {
        let base_path = PathBuf::from(&config.data_dir);
        Self { base_path, config }
    }

    fn table_path(&self, file: &str) -> PathBuf {
        self.base_path.join(file)
    }

    /// Reads a core table; a missing file means this is not a log directory.
    fn read_required<R: TableRow>(&self, file: &str) -> Result<Vec<R>, StorageError> {
        read_table_opt(&self.table_path(file))?
            .ok_or_else(|| StorageError::InvalidLogDirectory(self.base_path.clone()))
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for FileStorage {
    fn load_logs(&self) -> Result<LogData, StorageError> {
        let actions = self.read_required::<ActionRow>(&self.config.actions_file)?;
        let states = self.read_required::<StateRow>(&self.config.states_file)?;
        let nodes = self.read_required::<NodeRow>(&self.config.nodes_file)?;
        let edges = self.read_required::<EdgeRow>(&self.config.edges_file)?;
        let ignored = read_table_opt::<IgnoredRow>(&self.table_path(&self.config.ignored_file))?
            .unwrap_or_default();

        let data = relink(actions, states, nodes, edges, ignored)?;
        info!(
            nodes = data.nodes.len(),
            edges = data.edges.len(),
            "loaded log directory"
        );
        Ok(data)
    }

    fn save_logs(&self, data: &LogData) -> Result<(), StorageError> {
        let tables = export(data)?;

        fs::create_dir_all(&self.base_path)
            .map_err(|err| StorageError::io(&self.base_path, err))?;
        write_table(&self.table_path(&self.config.actions_file), &tables.actions)?;
        write_table(&self.table_path(&self.config.states_file), &tables.states)?;
        write_table(&self.table_path(&self.config.nodes_file), &tables.nodes)?;
        write_table(&self.table_path(&self.config.edges_file), &tables.edges)?;
        write_table(&self.table_path(&self.config.ignored_file), &tables.ignored)?;
        info!(path = %self.base_path.display(), "saved log directory");
        Ok(())
    }
}

/// Rebuilds stable keys from one export's row-local integer ids.
///
/// Node keys become `"{scene}/{location}"`, actions keep their raw label,
/// and states key as `"{scene}/{name}"` with empty components dropped. Any
/// dangling id fails the import; empty labels are dropped from edge sets.
fn relink(
    action_rows: Vec<ActionRow>,
    state_rows: Vec<StateRow>,
    node_rows: Vec<NodeRow>,
    edge_rows: Vec<EdgeRow>,
    ignored_rows: Vec<IgnoredRow>,
) -> Result<LogData, StorageError> {
    let actions_by_id: BTreeMap<u32, String> = action_rows
        .into_iter()
        .map(|row| (row.id, row.action))
        .collect();
    let states_by_id: BTreeMap<u32, String> = state_rows
        .into_iter()
        .map(|row| (row.id, state_key(&row.scene, &row.name)))
        .collect();
    let nodes_by_id: BTreeMap<u32, Node> = node_rows
        .into_iter()
        .map(|row| {
            let node = Node::new(row.scene, row.location, row.x, row.y, row.height);
            (row.id, node)
        })
        .collect();

    let mut edges = Vec::with_capacity(edge_rows.len());
    for row in edge_rows {
        let source = lookup(&nodes_by_id, row.source, "node")?;
        let target = lookup(&nodes_by_id, row.target, "node")?;
        let mut edge = Edge::new(&source.scene, &source.key, &target.key);
        for id in row.actions {
            let action = lookup(&actions_by_id, id, "action")?;
            if !action.is_empty() {
                edge.actions.insert(action.clone());
            }
        }
        for id in row.states {
            let state = lookup(&states_by_id, id, "state")?;
            if !state.is_empty() {
                edge.states.insert(state.clone());
            }
        }
        edge.scene_change = row.scene_change;
        edge.real_time = row.real_time;
        edge.game_time = row.game_time;
        edge.timestamp = row.timestamp;
        edges.push(edge);
    }

    let mut ignored_connections = Vec::with_capacity(ignored_rows.len());
    for row in ignored_rows {
        let source = lookup(&nodes_by_id, row.source, "node")?;
        let target = lookup(&nodes_by_id, row.target, "node")?;
        ignored_connections.push(IgnoredConnection {
            source_node: source.key.clone(),
            target_node: target.key.clone(),
        });
    }

    Ok(LogData {
        actions: actions_by_id.into_values().filter(|a| !a.is_empty()).collect(),
        states: states_by_id.into_values().filter(|s| !s.is_empty()).collect(),
        nodes: nodes_by_id
            .into_values()
            .map(|node| (node.key.clone(), node))
            .collect(),
        edges,
        ignored_connections,
    })
}

struct Tables {
    actions: Vec<ActionRow>,
    states: Vec<StateRow>,
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
    ignored: Vec<IgnoredRow>,
}

/// Inverse of [`relink`]: re-derives dense integer ids from sorted key
/// order. Node, action, and state identity round-trips; edge keys are
/// ephemeral and never written.
fn export(data: &LogData) -> Result<Tables, StorageError> {
    let mut action_names: BTreeSet<String> = data.actions.clone();
    let mut state_keys: BTreeSet<String> = data.states.clone();
    for edge in &data.edges {
        action_names.extend(edge.actions.iter().cloned());
        state_keys.extend(edge.states.iter().cloned());
    }

    let action_ids = dense_ids(&action_names);
    let state_ids = dense_ids(&state_keys);
    let node_ids: BTreeMap<String, u32> = data
        .nodes
        .keys()
        .enumerate()
        .map(|(index, key)| (key.clone(), index as u32 + 1))
        .collect();

    let actions = action_names
        .iter()
        .map(|name| ActionRow {
            id: action_ids[name],
            action: name.clone(),
        })
        .collect();
    let states = state_keys
        .iter()
        .map(|key| {
            let (scene, name) = split_state_key(key);
            StateRow {
                id: state_ids[key],
                scene,
                name,
            }
        })
        .collect();
    let nodes = data
        .nodes
        .values()
        .map(|node| NodeRow {
            id: node_ids[&node.key],
            scene: node.scene.clone(),
            location: node.location.clone(),
            x: node.x,
            y: node.y,
            height: node.height,
        })
        .collect();

    let mut edges = Vec::with_capacity(data.edges.len());
    for edge in &data.edges {
        edges.push(EdgeRow {
            source: node_id(&node_ids, &edge.source_node)?,
            target: node_id(&node_ids, &edge.target_node)?,
            actions: edge.actions.iter().map(|a| action_ids[a]).collect(),
            states: edge.states.iter().map(|s| state_ids[s]).collect(),
            scene_change: edge.scene_change,
            real_time: edge.real_time,
            game_time: edge.game_time,
            timestamp: edge.timestamp,
        });
    }

    let mut ignored = Vec::with_capacity(data.ignored_connections.len());
    for connection in &data.ignored_connections {
        ignored.push(IgnoredRow {
            source: node_id(&node_ids, &connection.source_node)?,
            target: node_id(&node_ids, &connection.target_node)?,
        });
    }

    Ok(Tables {
        actions,
        states,
        nodes,
        edges,
        ignored,
    })
}

fn dense_ids(keys: &BTreeSet<String>) -> BTreeMap<String, u32> {
    keys.iter()
        .enumerate()
        .map(|(index, key)| (key.clone(), index as u32 + 1))
        .collect()
}

fn node_id(node_ids: &BTreeMap<String, u32>, key: &str) -> Result<u32, StorageError> {
    node_ids
        .get(key)
        .copied()
        .ok_or_else(|| StorageError::UnknownNode(key.to_string()))
}

fn lookup<'a, T>(
    map: &'a BTreeMap<u32, T>,
    id: u32,
    kind: &'static str,
) -> Result<&'a T, StorageError> {
    map.get(&id).ok_or(StorageError::UnknownId { kind, id })
}

/// State keys join scene and name, dropping empty components.
fn state_key(scene: &str, name: &str) -> String {
    match (scene.is_empty(), name.is_empty()) {
        (false, false) => format!("{scene}/{name}"),
        (true, _) => name.to_string(),
        (false, true) => scene.to_string(),
    }
}

fn split_state_key(key: &str) -> (String, String) {
    match key.split_once('/') {
        Some((scene, name)) => (scene.to_string(), name.to_string()),
        None => (String::new(), key.to_string()),
    }
}
