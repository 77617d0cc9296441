//! Subprocess-backed adapters for the external media engines

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::ports::{ProbeRunner, SpeechRunner, TranscodeJob, TranscodeRunner, VideoEncoding};

/// ffprobe-backed probe runner
pub struct FfprobeRunner {
    binary: String,
}

impl FfprobeRunner {
    /// Use a specific probe binary
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfprobeRunner {
    fn default() -> Self {
        Self::with_binary("ffprobe")
    }
}

impl ProbeRunner for FfprobeRunner {
    fn probe(&self, path: &Path) -> SyncResult<String> {
        let output = Command::new(&self.binary)
            .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .output()
            .map_err(|e| SyncError::ProbeError {
                message: format!("failed to spawn {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            return Err(SyncError::ProbeError {
                message: format!(
                    "{} exited with {} for {}: {}",
                    self.binary,
                    output.status,
                    path.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// ffmpeg-backed transcode runner
pub struct FfmpegRunner {
    binary: String,
}

impl FfmpegRunner {
    /// Use a specific transcode binary
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::with_binary("ffmpeg")
    }
}

impl TranscodeRunner for FfmpegRunner {
    fn run(&self, job: &TranscodeJob) -> SyncResult<()> {
        let args = transcode_args(job);
        debug!("Running {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| SyncError::ExecutionError {
                message: format!("failed to spawn {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            return Err(SyncError::ExecutionError {
                message: format!(
                    "{} exited with {}: {}",
                    self.binary,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}

/// Translate a declarative job into a transcode engine command line
pub fn transcode_args(job: &TranscodeJob) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
    ];

    for input in &job.inputs {
        args.push("-i".into());
        args.push(input.display().to_string());
    }

    if let Some(graph) = &job.filter_graph {
        args.push("-filter_complex".into());
        args.push(graph.clone());
    }

    for map in &job.maps {
        args.push("-map".into());
        args.push(map.clone());
    }

    match &job.video {
        Some(VideoEncoding::Copy) => {
            args.push("-c:v".into());
            args.push("copy".into());
        }
        Some(VideoEncoding::Encode { codec, preset, crf }) => {
            args.push("-c:v".into());
            args.push(codec.clone());
            args.push("-preset".into());
            args.push(preset.clone());
            args.push("-crf".into());
            args.push(crf.to_string());
        }
        None => {}
    }

    if let Some(audio) = &job.audio {
        args.push("-c:a".into());
        args.push(audio.codec.clone());
        args.push("-b:a".into());
        args.push(audio.bitrate.clone());
    }

    if let Some(limit) = job.limit_duration {
        args.push("-t".into());
        args.push(format!("{:.6}", limit));
    }

    if job.shortest {
        args.push("-shortest".into());
    }

    args.push(job.output.display().to_string());
    args
}

/// piper-backed speech runner
///
/// The engine reads text from stdin and writes a WAV file.
pub struct PiperRunner {
    binary: String,
}

impl PiperRunner {
    /// Use a specific speech binary
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PiperRunner {
    fn default() -> Self {
        Self::with_binary("piper")
    }
}

impl SpeechRunner for PiperRunner {
    fn synthesize(&self, text: &str, model: &Path, wav_out: &Path) -> SyncResult<()> {
        let mut child = Command::new(&self.binary)
            .arg("--model")
            .arg(model)
            .arg("--output_file")
            .arg(wav_out)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SyncError::SpeechError {
                message: format!("failed to spawn {}: {}", self.binary, e),
            })?;

        child
            .stdin
            .take()
            .ok_or_else(|| SyncError::SpeechError {
                message: "speech engine stdin unavailable".to_string(),
            })?
            .write_all(text.as_bytes())?;

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(SyncError::SpeechError {
                message: format!(
                    "{} exited with {}: {}",
                    self.binary,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}
