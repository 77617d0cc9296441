//! Speech synthesis wrapper around the external TTS engine

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::{FfmpegRunner, PiperRunner};
use crate::error::{SyncError, SyncResult};
use crate::ports::{AudioEncoding, SpeechRunner, TranscodeJob, TranscodeRunner};
use crate::session::Workspace;

/// Default voice model name
pub const DEFAULT_VOICE: &str = "en_US-amy-medium";

/// Speech synthesizer producing WAV or MP3 narration from text
///
/// The TTS engine always emits WAV; when the requested output ends in
/// `.mp3`, the WAV goes into the session workspace and the transcode engine
/// converts it.
pub struct SpeechSynthesizer<S: SpeechRunner, T: TranscodeRunner> {
    speech: S,
    transcode: T,
    voice: String,
    models_dir: PathBuf,
}

impl SpeechSynthesizer<PiperRunner, FfmpegRunner> {
    /// Create a synthesizer backed by the real engines
    pub fn new() -> Self {
        Self::with_runners(PiperRunner::default(), FfmpegRunner::default())
    }
}

impl Default for SpeechSynthesizer<PiperRunner, FfmpegRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SpeechRunner, T: TranscodeRunner> SpeechSynthesizer<S, T> {
    /// Create a synthesizer with specific engine backends
    pub fn with_runners(speech: S, transcode: T) -> Self {
        Self {
            speech,
            transcode,
            voice: DEFAULT_VOICE.to_string(),
            models_dir: default_models_dir(),
        }
    }

    /// Set the voice model name
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the directory holding the voice model files
    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    /// Synthesize `text` into the requested output file
    pub fn synthesize(&self, text: &str, output: &Path, workspace: &Workspace) -> SyncResult<()> {
        if text.trim().is_empty() {
            return Err(SyncError::SpeechError {
                message: "text content cannot be empty".to_string(),
            });
        }

        let model = self.resolve_model()?;
        info!("Synthesizing speech with voice {}", self.voice);

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let wants_mp3 = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"));

        if wants_mp3 {
            let wav = workspace.scratch_path("speech.wav");
            self.speech.synthesize(text, &model, &wav)?;

            info!("Converting narration to {}", output.display());
            let mut job = TranscodeJob::to_output(output.to_path_buf());
            job.inputs = vec![wav];
            job.maps = vec!["0:a:0".to_string()];
            job.audio = Some(AudioEncoding {
                codec: "libmp3lame".to_string(),
                bitrate: "128k".to_string(),
            });
            self.transcode.run(&job)?;
        } else {
            self.speech.synthesize(text, &model, output)?;
        }

        info!("Generated narration at {}", output.display());
        Ok(())
    }

    /// Locate the voice model, requiring both the model and its config
    fn resolve_model(&self) -> SyncResult<PathBuf> {
        let model = self.models_dir.join(format!("{}.onnx", self.voice));
        let config = self.models_dir.join(format!("{}.onnx.json", self.voice));

        if !model.is_file() || !config.is_file() {
            return Err(SyncError::SpeechError {
                message: format!(
                    "voice model '{}' not found; expected {} and {}",
                    self.voice,
                    model.display(),
                    config.display()
                ),
            });
        }

        Ok(model)
    }
}

/// Per-user data directory for voice models
fn default_models_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "avsync")
        .map(|dirs| dirs.data_local_dir().join("models"))
        .unwrap_or_else(|| PathBuf::from("piper_models"))
}
