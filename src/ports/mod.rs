// Ports - interfaces to the external media engines

use std::path::{Path, PathBuf};

use crate::error::SyncResult;

/// Port for media file probing
///
/// Implementations return the probe tool's structured (JSON) output verbatim;
/// parsing into [`crate::probe::MediaInfo`] happens in the inspector so fakes
/// can feed canned documents in tests.
pub trait ProbeRunner {
    /// Probe a file and return the raw structured metadata document
    fn probe(&self, path: &Path) -> SyncResult<String>;
}

/// Port for running one transcode job to completion
pub trait TranscodeRunner {
    /// Execute the job, blocking until the engine exits
    fn run(&self, job: &TranscodeJob) -> SyncResult<()>;
}

/// Port for speech synthesis
pub trait SpeechRunner {
    /// Synthesize `text` into a WAV file at `wav_out` using the given model
    fn synthesize(&self, text: &str, model: &Path, wav_out: &Path) -> SyncResult<()>;
}

/// Video encoding parameters for a transcode job
#[derive(Debug, Clone, PartialEq)]
pub enum VideoEncoding {
    /// Pass the video stream through untouched
    Copy,
    /// Re-encode with codec/preset/CRF
    Encode {
        codec: String,
        preset: String,
        crf: u8,
    },
}

/// Audio encoding parameters for a transcode job
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEncoding {
    pub codec: String,
    /// Bitrate token as the engine expects it, e.g. "128k"
    pub bitrate: String,
}

/// Declarative description of one transcode invocation
///
/// The executor builds these; adapters translate them into an engine command
/// line. Stream selectors in `maps` use the engine's mapping syntax
/// ("0:v:0", "1:a:0") or filter-graph output labels ("[v]", "[a]").
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    pub inputs: Vec<PathBuf>,
    /// Optional filter-graph expression (PTS rescaling, tempo chains)
    pub filter_graph: Option<String>,
    pub maps: Vec<String>,
    pub video: Option<VideoEncoding>,
    pub audio: Option<AudioEncoding>,
    /// Truncate the output to this many seconds
    pub limit_duration: Option<f64>,
    /// Stop writing when the shortest mapped stream ends
    pub shortest: bool,
    pub output: PathBuf,
}

impl TranscodeJob {
    /// Create a job writing to `output` with no inputs or settings yet
    pub fn to_output(output: PathBuf) -> Self {
        Self {
            inputs: Vec::new(),
            filter_graph: None,
            maps: Vec::new(),
            video: None,
            audio: None,
            limit_duration: None,
            shortest: false,
            output,
        }
    }
}
