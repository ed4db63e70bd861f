use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("log directory does not exist: {}", .0.display())]
    LogRootMissing(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log file pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("failed to serialize embedded logs: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("file watcher failed: {0}")]
    Watch(#[from] notify::Error),
}
