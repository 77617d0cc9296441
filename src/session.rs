//! Scoped temporary workspace for a synchronization session

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::SyncResult;

/// Temporary working directory held for the length of one session
///
/// The directory is removed when the guard drops, on success and on every
/// failure path alike.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Acquire a fresh workspace
    pub fn create() -> SyncResult<Self> {
        let dir = tempfile::Builder::new().prefix("avsync-").tempdir()?;
        debug!("Acquired workspace: {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Workspace root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a scratch file inside the workspace
    pub fn scratch_path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }
}
