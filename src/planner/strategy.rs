//! Sync strategy selection

use tracing::info;

use crate::error::{SyncError, SyncResult};
use crate::planner::{QualityImpact, SyncAnalysis, SyncMethod, SyncPolicy};
use crate::probe::MediaInfo;

/// Strategist that turns two inspected inputs into a reconciliation plan
pub struct SyncStrategist {
    policy: SyncPolicy,
}

impl SyncStrategist {
    /// Create a strategist with the default policy table
    pub fn new() -> Self {
        Self::with_policy(SyncPolicy::default())
    }

    /// Create a strategist with an explicit policy table
    pub fn with_policy(policy: SyncPolicy) -> Self {
        Self { policy }
    }

    /// Analyze the duration mismatch between a video and an audio input
    pub fn analyze(&self, video: &MediaInfo, audio: &MediaInfo) -> SyncResult<SyncAnalysis> {
        let video_duration = video.duration;
        let audio_duration = audio.duration;

        if video_duration <= 0.0 {
            return Err(SyncError::InvalidDuration {
                path: video.path.clone(),
                seconds: video_duration,
            });
        }
        if audio_duration <= 0.0 {
            return Err(SyncError::InvalidDuration {
                path: audio.path.clone(),
                seconds: audio_duration,
            });
        }

        let longer = video_duration.max(audio_duration);
        let shorter = video_duration.min(audio_duration);
        let difference_seconds = (video_duration - audio_duration).abs();
        let difference_percent = difference_seconds / longer * 100.0;
        let duration_ratio = longer / shorter;

        let recommended_method =
            self.select_method(difference_percent, video_duration, audio_duration);
        let quality_impact = self.quality_impact(difference_percent);

        info!(
            "Sync analysis: video {:.3}s, audio {:.3}s, ratio {:.3}, recommending {} ({} impact)",
            video_duration, audio_duration, duration_ratio, recommended_method, quality_impact
        );

        Ok(SyncAnalysis {
            video_duration,
            audio_duration,
            difference_seconds,
            difference_percent,
            duration_ratio,
            recommended_method,
            speed_factor_needed: video_duration / audio_duration,
            quality_impact,
        })
    }

    /// Pick a method for the given mismatch; first matching band wins
    fn select_method(&self, percent: f64, video_duration: f64, audio_duration: f64) -> SyncMethod {
        if percent <= self.policy.crop_extend_max_percent {
            SyncMethod::CropExtend
        } else if percent <= self.policy.balanced_max_percent {
            SyncMethod::Balanced
        } else if percent <= self.policy.single_sided_max_percent {
            // The longer stream absorbs the whole adjustment
            if video_duration > audio_duration {
                SyncMethod::VideoSpeed
            } else {
                SyncMethod::AudioSpeed
            }
        } else {
            SyncMethod::Balanced
        }
    }

    fn quality_impact(&self, percent: f64) -> QualityImpact {
        if percent <= self.policy.crop_extend_max_percent {
            QualityImpact::Minimal
        } else if percent <= self.policy.balanced_max_percent {
            QualityImpact::Low
        } else if percent <= self.policy.single_sided_max_percent {
            QualityImpact::Moderate
        } else {
            QualityImpact::High
        }
    }
}

impl Default for SyncStrategist {
    fn default() -> Self {
        Self::new()
    }
}
