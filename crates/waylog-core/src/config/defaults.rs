//! Built-in configuration defaults.

/// Directory the game exporter writes its tables into.
pub const DEFAULT_DATA_DIR: &str = "data";

pub const DEFAULT_ACTIONS_FILE: &str = "actions.tsv";
pub const DEFAULT_STATES_FILE: &str = "states.tsv";
pub const DEFAULT_NODES_FILE: &str = "nodes.tsv";
pub const DEFAULT_EDGES_FILE: &str = "edges.tsv";
pub const DEFAULT_IGNORED_FILE: &str = "ignored-connections.tsv";
