//! Cross-module scenario tests for the sync core

use avsync_cli::engine::filters::{tempo_chain, video_speed_filter, TEMPO_STAGE_MAX, TEMPO_STAGE_MIN};
use avsync_cli::{MediaInfo, QualityImpact, SyncMethod, SyncStrategist};

fn media(path: &str, duration: f64) -> MediaInfo {
    MediaInfo {
        path: path.to_string(),
        duration,
        size_bytes: 5_000_000,
        bitrate: 1_000_000,
        streams: vec![],
    }
}

fn analyze(video_duration: f64, audio_duration: f64) -> avsync_cli::SyncAnalysis {
    SyncStrategist::new()
        .analyze(
            &media("video.mp4", video_duration),
            &media("audio.mp3", audio_duration),
        )
        .unwrap()
}

#[test]
fn near_match_is_cropped() {
    // video 10.0s vs audio 10.2s: ratio 1.02
    let analysis = analyze(10.0, 10.2);
    assert_eq!(analysis.recommended_method, SyncMethod::CropExtend);
    // Truncation lands on the shorter duration
    assert_eq!(analysis.video_duration.min(analysis.audio_duration), 10.0);
}

#[test]
fn moderate_gap_balances_on_the_mean() {
    // video 20.0s vs audio 17.0s: ratio ~1.176
    let analysis = analyze(20.0, 17.0);
    assert!((analysis.duration_ratio - 1.176).abs() < 0.001);
    assert_eq!(analysis.recommended_method, SyncMethod::Balanced);
    let target = (analysis.video_duration + analysis.audio_duration) / 2.0;
    assert!((target - 18.5).abs() < 1e-9);
}

#[test]
fn large_gap_speeds_the_longer_stream() {
    // video 30.0s vs audio 20.0s: ratio 1.5, video longer
    let analysis = analyze(30.0, 20.0);
    assert_eq!(analysis.recommended_method, SyncMethod::VideoSpeed);
    assert_eq!(analysis.speed_factor_needed, 1.5);
}

#[test]
fn extreme_gap_is_balanced_with_high_impact() {
    // video 10.0s vs audio 1000.0s: ratio 100
    let analysis = analyze(10.0, 1000.0);
    assert_eq!(analysis.duration_ratio, 100.0);
    assert_eq!(analysis.recommended_method, SyncMethod::Balanced);
    assert_eq!(analysis.quality_impact, QualityImpact::High);
}

#[test]
fn large_tempo_factor_decomposes_within_stage_bounds() {
    let chain = tempo_chain(250.0);
    assert_eq!(chain, vec![100.0, 2.5]);
    let product: f64 = chain.iter().product();
    assert!((product - 250.0).abs() < 1e-9);
    for stage in chain {
        assert!((TEMPO_STAGE_MIN..=TEMPO_STAGE_MAX).contains(&stage));
    }
}

#[test]
fn speed_adjustments_are_inverses_across_swapped_roles() {
    // Speeding the 30s video by its factor lands on the 20s audio
    let forward = analyze(30.0, 20.0);
    let adjusted_video = forward.video_duration / forward.speed_factor_needed;
    assert!((adjusted_video - forward.audio_duration).abs() < 1e-9);

    // With roles swapped the audio tempo (reciprocal factor) lands on video
    let swapped = analyze(20.0, 30.0);
    let tempo = 1.0 / swapped.speed_factor_needed;
    let adjusted_audio = swapped.audio_duration / tempo;
    assert!((adjusted_audio - swapped.video_duration).abs() < 1e-9);
}

#[test]
fn balanced_legs_meet_at_the_same_target() {
    let analysis = analyze(20.0, 17.0);
    let target = (analysis.video_duration + analysis.audio_duration) / 2.0;

    let video_speed = analysis.video_duration / target;
    let audio_tempo = analysis.audio_duration / target;
    let adjusted_video = analysis.video_duration / video_speed;
    let adjusted_audio = analysis.audio_duration / audio_tempo;

    assert!((adjusted_video - target).abs() < 1e-9);
    assert!((adjusted_audio - target).abs() < 1e-9);
}

#[test]
fn pts_expression_matches_the_speed_factor() {
    let analysis = analyze(30.0, 20.0);
    assert_eq!(
        video_speed_filter(analysis.speed_factor_needed),
        "setpts=0.666667*PTS"
    );
}
