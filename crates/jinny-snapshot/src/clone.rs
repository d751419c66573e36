use std::path::Path;

use crate::SnapshotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    AlreadyPresent,
    Cloned,
}

/// Runs `git clone <url> <target>` unless `target` already exists.
///
/// An existing path is never refreshed: no fetch, no pull.
pub async fn ensure_cloned(repo_url: &str, target: &Path) -> Result<CloneOutcome, SnapshotError> {
    if target.exists() {
        tracing::debug!(path = %target.display(), "repository snapshot already present");
        return Ok(CloneOutcome::AlreadyPresent);
    }

    tracing::info!(url = repo_url, path = %target.display(), "cloning repository");
    let status = tokio::process::Command::new("git")
        .arg("clone")
        .arg(repo_url)
        .arg(target)
        .status()
        .await
        .map_err(|source| SnapshotError::CloneSpawn {
            url: repo_url.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(SnapshotError::CloneFailed {
            url: repo_url.to_string(),
            target: target.to_path_buf(),
            status,
        });
    }
    Ok(CloneOutcome::Cloned)
}
