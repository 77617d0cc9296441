//! Error handling module for AVSync

use thiserror::Error;

/// Main error type for AVSync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// Zero or negative duration on an input
    #[error("Invalid duration for {path}: {seconds}s (must be > 0)")]
    InvalidDuration { path: String, seconds: f64 },

    /// Invalid sync method token
    #[error("Invalid sync method: {token}. Valid methods: video_speed, audio_speed, balanced, crop_extend, smart_auto")]
    InvalidMethod { token: String },

    /// External transcode invocation failed
    #[error("Transcode failed: {message}")]
    ExecutionError { message: String },

    /// Output file failed the plausibility check
    #[error("Output file is suspiciously small: {path} ({size} bytes, minimum {min})")]
    OutputSizeError { path: String, size: u64, min: u64 },

    /// Speech synthesis error
    #[error("Speech synthesis failed: {message}")]
    SpeechError { message: String },

    /// Policy file error
    #[error("Failed to load sync policy: {message}")]
    PolicyError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for AVSync operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;
