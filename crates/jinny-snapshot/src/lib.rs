//! Local working copy of the target repository.
//!
//! The repository is cloned at most once per workspace path and rendered as a
//! textual directory tree whenever a prompt is built.

mod clone;
mod file_tree;

pub use clone::{ensure_cloned, CloneOutcome};
pub use file_tree::{render_tree, EXCLUDED_DIR_NAME};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to spawn git clone for {url}: {source}")]
    CloneSpawn {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("git clone of {url} into {} exited with {status}", .target.display())]
    CloneFailed {
        url: String,
        target: PathBuf,
        status: std::process::ExitStatus,
    },
    #[error("failed to read {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
