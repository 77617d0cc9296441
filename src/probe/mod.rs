//! Media file inspection and metadata model

use serde::{Deserialize, Serialize};

pub mod inspector;

use crate::error::{SyncError, SyncResult};

/// Stream type reported by the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Other,
}

/// Media file information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// File path
    pub path: String,
    /// Container duration in seconds; 0 means unknown
    pub duration: f64,
    /// File size in bytes
    pub size_bytes: u64,
    /// Container bitrate in bits per second
    pub bitrate: u64,
    /// Streams in probe order
    pub streams: Vec<StreamInfo>,
}

/// One stream within a media file
///
/// Video-only fields are zero on audio streams and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Stream type
    pub kind: StreamKind,
    /// Codec name
    pub codec: String,
    /// Stream duration in seconds; falls back to the container duration
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate
    pub fps: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u32,
}

impl MediaInfo {
    /// First video stream, if any
    pub fn first_video(&self) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.kind == StreamKind::Video)
    }

    /// First audio stream, if any
    pub fn first_audio(&self) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.kind == StreamKind::Audio)
    }

    /// Number of streams of the given kind
    pub fn stream_count(&self, kind: StreamKind) -> usize {
        self.streams.iter().filter(|s| s.kind == kind).count()
    }
}

// Raw probe schema. ffprobe reports numeric fields as strings, so everything
// below is Option<String> and converted with a zero default.

#[derive(Debug, Deserialize)]
struct RawProbeOutput {
    #[serde(default)]
    format: RawFormat,
    #[serde(default)]
    streams: Vec<RawStream>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    duration: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
}

/// Parse the probe tool's JSON document into a [`MediaInfo`]
///
/// Missing fields default to zero; a document that is not valid JSON at all
/// is a [`SyncError::ProbeError`].
pub fn parse_probe_output(path: &str, raw: &str) -> SyncResult<MediaInfo> {
    let parsed: RawProbeOutput =
        serde_json::from_str(raw).map_err(|e| SyncError::ProbeError {
            message: format!("unparseable probe output for {}: {}", path, e),
        })?;

    let duration = parse_f64(parsed.format.duration.as_deref());
    let streams = parsed
        .streams
        .iter()
        .map(|s| parse_stream(s, duration))
        .collect();

    Ok(MediaInfo {
        path: path.to_string(),
        duration,
        size_bytes: parse_u64(parsed.format.size.as_deref()),
        bitrate: parse_u64(parsed.format.bit_rate.as_deref()),
        streams,
    })
}

fn parse_stream(raw: &RawStream, container_duration: f64) -> StreamInfo {
    let kind = match raw.codec_type.as_deref() {
        Some("video") => StreamKind::Video,
        Some("audio") => StreamKind::Audio,
        _ => StreamKind::Other,
    };

    let duration = match parse_f64(raw.duration.as_deref()) {
        d if d > 0.0 => d,
        _ => container_duration,
    };

    StreamInfo {
        kind,
        codec: raw.codec_name.clone().unwrap_or_default(),
        duration,
        width: raw.width.unwrap_or(0),
        height: raw.height.unwrap_or(0),
        fps: parse_frame_rate(raw.r_frame_rate.as_deref().unwrap_or_default()),
        sample_rate: parse_u64(raw.sample_rate.as_deref()) as u32,
        channels: raw.channels.unwrap_or(0),
    }
}

/// Parse a frame rate in "num/den" or bare-number form
///
/// A zero denominator or any parse failure yields 0.0 rather than failing
/// the inspection.
pub fn parse_frame_rate(value: &str) -> f64 {
    let value = value.trim();
    match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = match num.trim().parse() {
                Ok(n) => n,
                Err(_) => return 0.0,
            };
            let den: f64 = match den.trim().parse() {
                Ok(d) => d,
                Err(_) => return 0.0,
            };
            if den == 0.0 {
                0.0
            } else {
                num / den
            }
        }
        None => value.parse().unwrap_or(0.0),
    }
}

fn parse_f64(value: Option<&str>) -> f64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
}

fn parse_u64(value: Option<&str>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}
