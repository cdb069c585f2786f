use std::{io, path::PathBuf};
use thiserror::Error;

/// Why a content file could not be turned into a JSON value.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("File read error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Conditions that stop a run instead of becoming an issue.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("cannot enumerate {}: {source}", path.display())]
    Enumerate { path: PathBuf, source: io::Error },
    #[error("invalid glob {pattern:?}: {source}")]
    Glob { pattern: String, source: globset::Error },
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
