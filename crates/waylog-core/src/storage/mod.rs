//! Import and export of log directories.
//!
//! A log directory holds four row-columnar tables exported by the analysis
//! tool (actions, states, nodes, edges) plus an optional ignored-connections
//! table. Numeric ids only link rows within a single export, so loading
//! relinks everything onto stable string keys; repeated imports of logs
//! describing the same game world then produce matching identities.

mod error;
mod file;
mod rows;
mod table;

pub use error::StorageError;
pub use file::FileStorage;

use crate::graph::LogData;

/// Persistence seam for the log graph.
pub trait Storage {
    /// Reads and relinks a full [`LogData`] from the backing store.
    fn load_logs(&self) -> Result<LogData, StorageError>;

    /// Writes the graph back out, re-deriving compact integer ids.
    fn save_logs(&self, data: &LogData) -> Result<(), StorageError>;
}
