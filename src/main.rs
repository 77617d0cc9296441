//! AVSync CLI
//!
//! A command-line tool that merges a video track with a narration audio
//! track, reconciling mismatched durations without large perceptible quality
//! loss.
//!
//! # Usage
//!
//! ```bash
//! avsync merge video.mp4 narration.mp3 merged.mp4
//! avsync merge video.mp4 narration.mp3 merged.mp4 balanced high
//! avsync analyze video.mp4 narration.mp3 --json
//! avsync inspect video.mp4
//! avsync speak "Hello there" narration.mp3
//! ```

use clap::Parser;
use tracing::{error, info};

use avsync_cli::cli::{commands, Cli, Commands};

/// Main entry point for the AVSync CLI application
fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute the requested command
    let result = match cli.command {
        Commands::Merge(args) => commands::merge(args),
        Commands::Analyze(args) => commands::analyze(args),
        Commands::Inspect(args) => commands::inspect(args),
        Commands::Speak(args) => commands::speak(args),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("AVSync completed successfully");
}
