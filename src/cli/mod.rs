//! CLI module for AVSync
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// AVSync CLI
///
/// Merges a video track with a narration audio track, reconciling mismatched
/// durations through speed or crop adjustments.
#[derive(Parser)]
#[command(name = "avsync")]
#[command(about = "AVSync - merge video and narration audio with duration reconciliation")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Merge a video file with an audio file
    Merge(args::MergeArgs),
    /// Report the duration mismatch analysis without merging
    Analyze(args::AnalyzeArgs),
    /// Inspect media file information
    Inspect(args::InspectArgs),
    /// Synthesize narration audio from text
    Speak(args::SpeakArgs),
}
