//! Duration mismatch analysis and reconciliation planning

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod strategy;

use crate::error::{SyncError, SyncResult};

/// Reconciliation method for a video/audio duration mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMethod {
    /// Rescale video presentation timestamps to match the audio duration
    VideoSpeed,
    /// Tempo-adjust audio to match the video duration
    AudioSpeed,
    /// Move both streams to the midpoint of the two durations
    Balanced,
    /// Truncate both streams to the shorter duration, no speed change
    CropExtend,
    /// Defer to the analysis recommendation
    SmartAuto,
}

impl SyncMethod {
    /// Parse a method token (case insensitive)
    pub fn parse(token: &str) -> SyncResult<Self> {
        match token.to_lowercase().as_str() {
            "video_speed" => Ok(SyncMethod::VideoSpeed),
            "audio_speed" => Ok(SyncMethod::AudioSpeed),
            "balanced" => Ok(SyncMethod::Balanced),
            "crop_extend" => Ok(SyncMethod::CropExtend),
            "smart_auto" => Ok(SyncMethod::SmartAuto),
            _ => Err(SyncError::InvalidMethod {
                token: token.to_string(),
            }),
        }
    }

    /// Resolve `smart_auto` against an analysis; explicit methods pass through
    pub fn resolve(self, analysis: &SyncAnalysis) -> SyncMethod {
        match self {
            SyncMethod::SmartAuto => analysis.recommended_method,
            other => other,
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncMethod::VideoSpeed => "video_speed",
            SyncMethod::AudioSpeed => "audio_speed",
            SyncMethod::Balanced => "balanced",
            SyncMethod::CropExtend => "crop_extend",
            SyncMethod::SmartAuto => "smart_auto",
        };
        f.write_str(name)
    }
}

/// Reporting label for how audible/visible the adjustment will be
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityImpact {
    Minimal,
    Low,
    Moderate,
    High,
}

impl fmt::Display for QualityImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QualityImpact::Minimal => "minimal",
            QualityImpact::Low => "low",
            QualityImpact::Moderate => "moderate",
            QualityImpact::High => "high",
        };
        f.write_str(name)
    }
}

/// Quantitative mismatch analysis for one video/audio pair
#[derive(Debug, Clone, Serialize)]
pub struct SyncAnalysis {
    /// Video duration in seconds
    pub video_duration: f64,
    /// Audio duration in seconds
    pub audio_duration: f64,
    /// Absolute duration difference in seconds
    pub difference_seconds: f64,
    /// Difference relative to the longer stream, in percent
    pub difference_percent: f64,
    /// max/min of the two durations, always >= 1
    pub duration_ratio: f64,
    /// Method the policy recommends for this mismatch
    pub recommended_method: SyncMethod,
    /// video/audio duration ratio; reciprocal applies to audio adjustment
    pub speed_factor_needed: f64,
    /// Expected perceptual cost of the adjustment
    pub quality_impact: QualityImpact,
}

/// Mismatch thresholds driving method selection
///
/// Bands are expressed as the duration difference relative to the longer
/// stream, in percent. The boundaries are heuristic rather than derived from
/// a perceptual model, so they are carried as a value and can be overridden
/// from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncPolicy {
    /// Mismatches up to this percentage are handled by truncation alone
    pub crop_extend_max_percent: f64,
    /// Mismatches up to this percentage split the adjustment across both streams
    pub balanced_max_percent: f64,
    /// Mismatches up to this percentage adjust only the longer stream
    pub single_sided_max_percent: f64,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            crop_extend_max_percent: 5.0,
            balanced_max_percent: 15.0,
            single_sided_max_percent: 50.0,
        }
    }
}

impl SyncPolicy {
    /// Load a policy override from a TOML file
    pub fn from_file(path: &Path) -> SyncResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::PolicyError {
            message: format!("{}: {}", path.display(), e),
        })?;
        toml::from_str(&text).map_err(|e| SyncError::PolicyError {
            message: format!("{}: {}", path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_token_parsing() {
        assert_eq!(SyncMethod::parse("video_speed").unwrap(), SyncMethod::VideoSpeed);
        assert_eq!(SyncMethod::parse("CROP_EXTEND").unwrap(), SyncMethod::CropExtend);
        assert_eq!(SyncMethod::parse("Smart_Auto").unwrap(), SyncMethod::SmartAuto);
        assert!(SyncMethod::parse("fastest").is_err());
    }

    #[test]
    fn method_display_round_trips() {
        for method in [
            SyncMethod::VideoSpeed,
            SyncMethod::AudioSpeed,
            SyncMethod::Balanced,
            SyncMethod::CropExtend,
            SyncMethod::SmartAuto,
        ] {
            assert_eq!(SyncMethod::parse(&method.to_string()).unwrap(), method);
        }
    }

    #[test]
    fn default_policy_thresholds() {
        let policy = SyncPolicy::default();
        assert_eq!(policy.crop_extend_max_percent, 5.0);
        assert_eq!(policy.balanced_max_percent, 15.0);
        assert_eq!(policy.single_sided_max_percent, 50.0);
    }

    #[test]
    fn policy_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("policy.toml");
        std::fs::write(&path, "crop_extend_max_percent = 2.0\n").unwrap();

        let policy = SyncPolicy::from_file(&path).unwrap();
        assert_eq!(policy.crop_extend_max_percent, 2.0);
        // Unset keys keep their defaults
        assert_eq!(policy.balanced_max_percent, 15.0);
    }

    #[test]
    fn malformed_policy_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("policy.toml");
        std::fs::write(&path, "crop_extend_max_percent = \"soon\"\n").unwrap();
        assert!(SyncPolicy::from_file(&path).is_err());
    }
}
