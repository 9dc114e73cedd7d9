/// Errors from durable resources: the reputation store, the history log, and case files.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The persisted reputation state cannot be trusted. Never recovered by resetting.
    #[error("corrupt reputation store at {path}: {reason}")]
    CorruptReputationStore { path: String, reason: String },

    #[error("history log error on {path}: {reason}")]
    HistoryLog { path: String, reason: String },

    #[error("malformed case at {path}:{line}: {reason}")]
    MalformedCase {
        path: String,
        line: usize,
        reason: String,
    },
}

impl StorageError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
