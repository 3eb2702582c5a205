use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("repository root not set: pass --root or export GITTOP")]
    RootNotSet,

    #[error("{0} does not look like a git repo")]
    NotARepository(PathBuf),

    #[error("git executable not found on PATH")]
    GitNotFound,

    #[error("git {op} failed: {detail}")]
    Git { op: String, detail: String },

    #[error("failed to restore '{path}' from {revision}: {detail}")]
    Restore {
        path: String,
        revision: String,
        detail: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
