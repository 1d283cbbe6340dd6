//! Configuration management for waylog.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `waylog.toml` file
//! 3. User config `~/.config/waylog/config.toml`
//! 4. Built-in defaults (lowest priority)

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log directory configuration.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./waylog.toml` (project local)
    /// 2. `~/.config/waylog/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        // Try project-local config first
        if Path::new("waylog.toml").exists() {
            return Self::from_file("waylog.toml");
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("waylog").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Use defaults
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("WAYLOG_DATA_DIR") {
            self.storage.data_dir = dir;
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Log directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the exported tables (default: "data").
    pub data_dir: String,

    /// Actions table file name.
    pub actions_file: String,

    /// States table file name.
    pub states_file: String,

    /// Nodes table file name.
    pub nodes_file: String,

    /// Edges table file name.
    pub edges_file: String,

    /// Ignored-connections table file name (optional on import).
    pub ignored_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            actions_file: DEFAULT_ACTIONS_FILE.to_string(),
            states_file: DEFAULT_STATES_FILE.to_string(),
            nodes_file: DEFAULT_NODES_FILE.to_string(),
            edges_file: DEFAULT_EDGES_FILE.to_string(),
            ignored_file: DEFAULT_IGNORED_FILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(config.storage.edges_file, DEFAULT_EDGES_FILE);
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("data_dir"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[storage]
data_dir = "exports/run-4"
edges_file = "traversals.tsv"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.data_dir, "exports/run-4");
        assert_eq!(config.storage.edges_file, "traversals.tsv");
        // Unspecified fields keep their defaults
        assert_eq!(config.storage.nodes_file, DEFAULT_NODES_FILE);
    }
}
