//! Output plausibility verification

use std::path::Path;

use tracing::info;

use crate::error::{SyncError, SyncResult};

/// Smallest output size considered a real media file
pub const MIN_PLAUSIBLE_OUTPUT_BYTES: u64 = 1000;

/// Verify that a produced file exists and is plausibly sized
///
/// The transcode engine can exit zero while writing a header-only stub, so
/// the size floor is checked even after a reported success. Returns the file
/// size on success.
pub fn verify_plausible(path: &Path, min_bytes: u64) -> SyncResult<u64> {
    if !path.exists() {
        return Err(SyncError::ExecutionError {
            message: format!("output file was not created: {}", path.display()),
        });
    }

    let size = std::fs::metadata(path)?.len();
    if size < min_bytes {
        return Err(SyncError::OutputSizeError {
            path: path.display().to_string(),
            size,
            min: min_bytes,
        });
    }

    info!("Output verified: {} ({} bytes)", path.display(), size);
    Ok(size)
}
