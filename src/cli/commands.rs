//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::args::{AnalyzeArgs, InspectArgs, MergeArgs, SpeakArgs};
use crate::engine::executor::SyncExecutor;
use crate::engine::{MergeRequest, QualityLevel};
use crate::error::SyncError;
use crate::planner::strategy::SyncStrategist;
use crate::planner::{SyncAnalysis, SyncMethod, SyncPolicy};
use crate::probe::inspector::MediaInspector;
use crate::probe::{MediaInfo, StreamKind};
use crate::session::Workspace;
use crate::speech::SpeechSynthesizer;

/// Execute the merge command
pub fn merge(args: MergeArgs) -> Result<()> {
    info!("Starting merge operation");
    info!("Video: {}", args.video);
    info!("Audio: {}", args.audio);
    info!("Output: {}", args.output);

    require_input(&args.video)?;
    require_input(&args.audio)?;

    let method = SyncMethod::parse(&args.method)?;
    let quality = QualityLevel::parse(&args.quality);
    let strategist = load_strategist(args.policy.as_deref())?;

    let workspace = Workspace::create().context("Failed to acquire working directory")?;

    let inspector = MediaInspector::new();
    let video_info = inspector
        .inspect(Path::new(&args.video))
        .context("Failed to inspect video file")?;
    let audio_info = inspector
        .inspect(Path::new(&args.audio))
        .context("Failed to inspect audio file")?;

    let analysis = strategist.analyze(&video_info, &audio_info)?;
    display_analysis(&analysis);

    let request = MergeRequest {
        video: PathBuf::from(&args.video),
        audio: PathBuf::from(&args.audio),
        output: PathBuf::from(&args.output),
        method,
        quality,
    };

    let executor = SyncExecutor::new();
    let report = executor
        .execute(&request, &analysis, &workspace)
        .context("Failed to execute merge")?;

    println!(
        "Merged with {} to {} ({} bytes, target {:.2}s)",
        report.method_used, args.output, report.output_size, report.target_duration
    );

    info!("Merge operation completed successfully");
    Ok(())
}

/// Execute the analyze command
pub fn analyze(args: AnalyzeArgs) -> Result<()> {
    info!("Starting analyze operation");

    require_input(&args.video)?;
    require_input(&args.audio)?;

    let strategist = load_strategist(args.policy.as_deref())?;

    let inspector = MediaInspector::new();
    let video_info = inspector
        .inspect(Path::new(&args.video))
        .context("Failed to inspect video file")?;
    let audio_info = inspector
        .inspect(Path::new(&args.audio))
        .context("Failed to inspect audio file")?;

    let analysis = strategist.analyze(&video_info, &audio_info)?;

    if args.json {
        let json = serde_json::to_string_pretty(&analysis)
            .context("Failed to serialize analysis to JSON")?;
        println!("{}", json);
    } else {
        display_analysis(&analysis);
    }

    Ok(())
}

/// Execute the inspect command
pub fn inspect(args: InspectArgs) -> Result<()> {
    info!("Starting inspect operation");
    info!("Input: {}", args.input);

    require_input(&args.input)?;

    let inspector = MediaInspector::new();
    let media_info = inspector
        .inspect(Path::new(&args.input))
        .context("Failed to inspect input file")?;

    if args.json {
        let json = serde_json::to_string_pretty(&media_info)
            .context("Failed to serialize media info to JSON")?;
        println!("{}", json);
    } else {
        display_media_info(&media_info);
    }

    Ok(())
}

/// Execute the speak command
pub fn speak(args: SpeakArgs) -> Result<()> {
    info!("Starting speak operation");

    let workspace = Workspace::create().context("Failed to acquire working directory")?;

    let mut synthesizer = SpeechSynthesizer::new().with_voice(&args.voice);
    if let Some(dir) = &args.models_dir {
        synthesizer = synthesizer.with_models_dir(dir);
    }

    synthesizer
        .synthesize(&args.text, Path::new(&args.output), &workspace)
        .context("Failed to synthesize speech")?;

    println!("Generated narration at {}", args.output);
    Ok(())
}

/// Reject missing inputs before any engine is invoked
fn require_input(path: &str) -> Result<()> {
    if !Path::new(path).exists() {
        return Err(SyncError::InputFileNotFound {
            path: path.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Build a strategist, applying a policy file override when given
fn load_strategist(policy_path: Option<&str>) -> Result<SyncStrategist> {
    let policy = match policy_path {
        Some(path) => SyncPolicy::from_file(Path::new(path))?,
        None => SyncPolicy::default(),
    };
    Ok(SyncStrategist::with_policy(policy))
}

/// Display the sync analysis in human-readable form
fn display_analysis(analysis: &SyncAnalysis) {
    println!("Sync Analysis");
    println!("=============");
    println!("Video duration:  {:.3}s", analysis.video_duration);
    println!("Audio duration:  {:.3}s", analysis.audio_duration);
    println!(
        "Difference:      {:.3}s ({:.1}%)",
        analysis.difference_seconds, analysis.difference_percent
    );
    println!("Duration ratio:  {:.3}", analysis.duration_ratio);
    println!("Speed factor:    {:.3}", analysis.speed_factor_needed);
    println!("Recommended:     {}", analysis.recommended_method);
    println!("Quality impact:  {}", analysis.quality_impact);
}

/// Display media information in human-readable form
fn display_media_info(media_info: &MediaInfo) {
    println!("Media Information");
    println!("=================");
    println!("File: {}", media_info.path);
    println!("Duration: {:.3}s", media_info.duration);
    println!("File Size: {} bytes", media_info.size_bytes);
    println!("Bit Rate: {} bps", media_info.bitrate);
    println!();

    for (i, stream) in media_info.streams.iter().enumerate() {
        match stream.kind {
            StreamKind::Video => {
                println!(
                    "  Stream {}: video {} {}x{} @ {:.2} fps, {:.3}s",
                    i, stream.codec, stream.width, stream.height, stream.fps, stream.duration
                );
            }
            StreamKind::Audio => {
                println!(
                    "  Stream {}: audio {} {} Hz, {} channels, {:.3}s",
                    i, stream.codec, stream.sample_rate, stream.channels, stream.duration
                );
            }
            StreamKind::Other => {
                println!("  Stream {}: other ({})", i, stream.codec);
            }
        }
    }
}
