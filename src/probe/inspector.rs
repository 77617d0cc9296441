//! Media inspection implementation

use std::path::Path;

use tracing::info;

use crate::adapters::FfprobeRunner;
use crate::error::{SyncError, SyncResult};
use crate::ports::ProbeRunner;
use crate::probe::{parse_probe_output, MediaInfo};

/// Media inspector for analyzing input files
///
/// Generic over the probe backend so tests can substitute a fake runner
/// returning canned metadata.
pub struct MediaInspector<P: ProbeRunner> {
    probe: P,
}

impl MediaInspector<FfprobeRunner> {
    /// Create an inspector backed by the real probe tool
    pub fn new() -> Self {
        Self::with_runner(FfprobeRunner::default())
    }
}

impl Default for MediaInspector<FfprobeRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ProbeRunner> MediaInspector<P> {
    /// Create an inspector with a specific probe backend
    pub fn with_runner(probe: P) -> Self {
        Self { probe }
    }

    /// Inspect a media file
    pub fn inspect(&self, path: &Path) -> SyncResult<MediaInfo> {
        info!("Inspecting media file: {}", path.display());

        if !path.exists() {
            return Err(SyncError::InputFileNotFound {
                path: path.display().to_string(),
            });
        }

        let raw = self.probe.probe(path)?;
        let info = parse_probe_output(&path.display().to_string(), &raw)?;

        info!(
            "Inspection completed: duration {:.3}s, {} streams",
            info.duration,
            info.streams.len()
        );
        Ok(info)
    }
}
