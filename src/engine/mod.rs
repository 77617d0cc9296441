//! Merge engine: quality profiles and execution types

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

pub mod executor;
pub mod filters;

use crate::planner::SyncMethod;

/// Requested output quality level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityLevel {
    Fast,
    Balanced,
    High,
}

impl QualityLevel {
    /// Parse a quality token; unknown tokens fall back to `Balanced`
    pub fn parse(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "fast" => QualityLevel::Fast,
            "high" => QualityLevel::High,
            _ => QualityLevel::Balanced,
        }
    }

    /// Encoder parameter bundle for this level
    pub fn profile(self) -> QualityProfile {
        match self {
            QualityLevel::Fast => QualityProfile {
                video_codec: "libx264",
                preset: "ultrafast",
                crf: 28,
                audio_codec: "aac",
                audio_bitrate: "128k",
            },
            QualityLevel::Balanced => QualityProfile {
                video_codec: "libx264",
                preset: "medium",
                crf: 23,
                audio_codec: "aac",
                audio_bitrate: "128k",
            },
            QualityLevel::High => QualityProfile {
                video_codec: "libx264",
                preset: "slow",
                crf: 18,
                audio_codec: "aac",
                audio_bitrate: "192k",
            },
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QualityLevel::Fast => "fast",
            QualityLevel::Balanced => "balanced",
            QualityLevel::High => "high",
        };
        f.write_str(name)
    }
}

/// Named bundle of encoder parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityProfile {
    pub video_codec: &'static str,
    pub preset: &'static str,
    pub crf: u8,
    pub audio_codec: &'static str,
    pub audio_bitrate: &'static str,
}

/// One merge invocation: inputs, destination, and how to reconcile them
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub video: PathBuf,
    pub audio: PathBuf,
    pub output: PathBuf,
    pub method: SyncMethod,
    pub quality: QualityLevel,
}

/// Outcome summary of a completed merge
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Method actually executed (after smart_auto resolution)
    pub method_used: SyncMethod,
    /// Destination file size in bytes
    pub output_size: u64,
    /// Duration the output was steered toward, in seconds
    pub target_duration: f64,
}
