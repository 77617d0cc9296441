//! Command-line argument definitions

use clap::Args;

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input video file path
    pub video: String,

    /// Input audio file path
    pub audio: String,

    /// Output file path
    pub output: String,

    /// Sync method (video_speed, audio_speed, balanced, crop_extend, smart_auto)
    #[arg(default_value = "smart_auto")]
    pub method: String,

    /// Quality level (fast, balanced, high)
    #[arg(default_value = "balanced")]
    pub quality: String,

    /// TOML file overriding the duration-ratio policy thresholds
    #[arg(long)]
    pub policy: Option<String>,
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input video file path
    pub video: String,

    /// Input audio file path
    pub audio: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// TOML file overriding the duration-ratio policy thresholds
    #[arg(long)]
    pub policy: Option<String>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input media file path
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the speak command
#[derive(Args, Debug)]
pub struct SpeakArgs {
    /// Text to synthesize
    pub text: String,

    /// Output audio file path (.wav, or .mp3 for converted output)
    pub output: String,

    /// Voice model name
    #[arg(long, default_value = crate::speech::DEFAULT_VOICE)]
    pub voice: String,

    /// Directory holding the voice model files
    #[arg(long)]
    pub models_dir: Option<String>,
}
