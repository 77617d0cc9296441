//! Filter-graph construction for PTS rescaling and audio tempo chains

/// Per-stage tempo bounds enforced by the transcode engine
pub const TEMPO_STAGE_MIN: f64 = 0.5;
pub const TEMPO_STAGE_MAX: f64 = 100.0;

/// PTS-rescale expression playing the video at `speed` (>1 shortens it)
///
/// The emitted multiplier is the reciprocal of the playback speed: a 30s
/// video at speed 1.5 gets `setpts=0.666667*PTS` and lands at 20s.
pub fn video_speed_filter(speed: f64) -> String {
    format!("setpts={:.6}*PTS", 1.0 / speed)
}

/// Decompose a tempo factor into stages the engine will accept
///
/// Each stage lies within [0.5, 100.0] and the product of all stages equals
/// the target factor. Factors of 100.0 are peeled off while the remainder is
/// too large, factors of 0.5 while it is too small, and the residual stage is
/// appended unless it is exactly 1.0.
pub fn tempo_chain(factor: f64) -> Vec<f64> {
    let mut stages = Vec::new();
    let mut remaining = factor;

    while remaining > TEMPO_STAGE_MAX {
        stages.push(TEMPO_STAGE_MAX);
        remaining /= TEMPO_STAGE_MAX;
    }
    while remaining < TEMPO_STAGE_MIN {
        stages.push(TEMPO_STAGE_MIN);
        remaining /= TEMPO_STAGE_MIN;
    }
    if remaining != 1.0 {
        stages.push(remaining);
    }

    stages
}

/// Tempo filter expression for the given factor
///
/// A factor of exactly 1.0 decomposes to an empty chain; the audio still has
/// to pass through the graph, so that case emits a null audio filter.
pub fn audio_tempo_filter(factor: f64) -> String {
    let stages = tempo_chain(factor);
    if stages.is_empty() {
        return "anull".to_string();
    }
    stages
        .iter()
        .map(|stage| format!("atempo={:.6}", stage))
        .collect::<Vec<_>>()
        .join(",")
}
