use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing a log directory.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A core table is missing; the directory does not hold movement logs.
    #[error("not a valid log directory: {0} is missing required tables")]
    InvalidLogDirectory(PathBuf),

    #[error("{}: missing column '{column}'", file.display())]
    MissingColumn { file: PathBuf, column: &'static str },

    #[error("{}:{line}: {message}", file.display())]
    Row {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// A row referenced an id absent from its lookup table. Ids must be
    /// internally consistent within one export.
    #[error("unknown {kind} id {id}")]
    UnknownId { kind: &'static str, id: u32 },

    /// An edge or ignored connection referenced a node key that is not in
    /// the graph.
    #[error("unknown node key '{0}'")]
    UnknownNode(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
