//! AVSync library
//!
//! Merges a video track with a narration audio track, reconciling mismatched
//! durations through presentation-timestamp rescaling, audio tempo chains, or
//! truncation, executed against external probe/transcode engines.

pub mod adapters;
pub mod cli;
pub mod engine;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod probe;
pub mod session;
pub mod speech;

// Re-export commonly used types
pub use engine::executor::SyncExecutor;
pub use engine::{MergeReport, MergeRequest, QualityLevel, QualityProfile};
pub use error::{SyncError, SyncResult};
pub use planner::strategy::SyncStrategist;
pub use planner::{QualityImpact, SyncAnalysis, SyncMethod, SyncPolicy};
pub use probe::inspector::MediaInspector;
pub use probe::{MediaInfo, StreamInfo, StreamKind};
pub use session::Workspace;
