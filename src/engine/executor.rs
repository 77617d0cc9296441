//! Sync execution: method dispatch into transcode jobs

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::adapters::FfmpegRunner;
use crate::engine::filters::{audio_tempo_filter, video_speed_filter};
use crate::engine::{MergeReport, MergeRequest};
use crate::error::SyncResult;
use crate::output::{verify_plausible, MIN_PLAUSIBLE_OUTPUT_BYTES};
use crate::planner::{SyncAnalysis, SyncMethod};
use crate::ports::{AudioEncoding, TranscodeJob, TranscodeRunner, VideoEncoding};
use crate::session::Workspace;

/// Executor translating a chosen method into one transcode invocation
pub struct SyncExecutor<R: TranscodeRunner> {
    runner: R,
    min_output_bytes: u64,
}

impl SyncExecutor<FfmpegRunner> {
    /// Create an executor backed by the real transcode engine
    pub fn new() -> Self {
        Self::with_runner(FfmpegRunner::default())
    }
}

impl Default for SyncExecutor<FfmpegRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TranscodeRunner> SyncExecutor<R> {
    /// Create an executor with a specific transcode backend
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            min_output_bytes: MIN_PLAUSIBLE_OUTPUT_BYTES,
        }
    }

    /// Execute one merge: build the job, run it, verify, persist
    ///
    /// The engine writes into the session workspace; the destination is only
    /// touched after the plausibility check passes.
    pub fn execute(
        &self,
        request: &MergeRequest,
        analysis: &SyncAnalysis,
        workspace: &Workspace,
    ) -> SyncResult<MergeReport> {
        let method = request.method.resolve(analysis);
        let target_duration = target_duration(method, analysis);

        info!(
            "Executing {} merge toward {:.3}s (quality: {})",
            method, target_duration, request.quality
        );

        let scratch = workspace.scratch_path(&scratch_name(&request.output));
        let job = self.build_job(method, request, analysis, &scratch);
        self.runner.run(&job)?;

        let output_size = verify_plausible(&scratch, self.min_output_bytes)?;
        persist(&scratch, &request.output)?;

        info!(
            "Merge completed: {} ({} bytes)",
            request.output.display(),
            output_size
        );

        Ok(MergeReport {
            method_used: method,
            output_size,
            target_duration,
        })
    }

    /// Build the transcode job for a method
    ///
    /// Input 0 is the video file, input 1 the audio file. Video is stream
    /// copied only when no speed change is applied; every other method
    /// re-encodes with the profile's codec/preset/CRF. Audio is always
    /// re-encoded to the profile's codec and bitrate.
    fn build_job(
        &self,
        method: SyncMethod,
        request: &MergeRequest,
        analysis: &SyncAnalysis,
        scratch: &Path,
    ) -> TranscodeJob {
        let profile = request.quality.profile();
        let reencode = VideoEncoding::Encode {
            codec: profile.video_codec.to_string(),
            preset: profile.preset.to_string(),
            crf: profile.crf,
        };

        let mut job = TranscodeJob::to_output(scratch.to_path_buf());
        job.inputs = vec![request.video.clone(), request.audio.clone()];
        job.audio = Some(AudioEncoding {
            codec: profile.audio_codec.to_string(),
            bitrate: profile.audio_bitrate.to_string(),
        });

        match method {
            SyncMethod::VideoSpeed => {
                // Play the video at speed v/a so it lands on the audio
                // duration; truncate to the shorter stream as a safety net.
                job.filter_graph = Some(format!(
                    "[0:v]{}[v]",
                    video_speed_filter(analysis.speed_factor_needed)
                ));
                job.maps = vec!["[v]".to_string(), "1:a:0".to_string()];
                job.video = Some(reencode);
                job.shortest = true;
            }
            SyncMethod::AudioSpeed => {
                // Tempo factor is the reciprocal of the video speed factor
                let tempo = 1.0 / analysis.speed_factor_needed;
                job.filter_graph = Some(format!("[1:a]{}[a]", audio_tempo_filter(tempo)));
                job.maps = vec!["0:v:0".to_string(), "[a]".to_string()];
                job.video = Some(reencode);
            }
            SyncMethod::Balanced => {
                // Both streams move toward the midpoint, bounding the
                // per-stream distortion when the mismatch is large
                let target = target_duration(SyncMethod::Balanced, analysis);
                let video_speed = analysis.video_duration / target;
                let audio_tempo = analysis.audio_duration / target;
                job.filter_graph = Some(format!(
                    "[0:v]{}[v];[1:a]{}[a]",
                    video_speed_filter(video_speed),
                    audio_tempo_filter(audio_tempo)
                ));
                job.maps = vec!["[v]".to_string(), "[a]".to_string()];
                job.video = Some(reencode);
            }
            SyncMethod::CropExtend => {
                // No speed change, so the video stream can be copied
                job.maps = vec!["0:v:0".to_string(), "1:a:0".to_string()];
                job.video = Some(VideoEncoding::Copy);
                job.limit_duration =
                    Some(analysis.video_duration.min(analysis.audio_duration));
            }
            SyncMethod::SmartAuto => {
                return self.build_job(method.resolve(analysis), request, analysis, scratch);
            }
        }

        job
    }
}

/// Duration the output is steered toward under each method
fn target_duration(method: SyncMethod, analysis: &SyncAnalysis) -> f64 {
    match method {
        SyncMethod::VideoSpeed => analysis.audio_duration,
        SyncMethod::AudioSpeed => analysis.video_duration,
        SyncMethod::Balanced => (analysis.video_duration + analysis.audio_duration) / 2.0,
        SyncMethod::CropExtend => analysis.video_duration.min(analysis.audio_duration),
        SyncMethod::SmartAuto => target_duration(analysis.recommended_method, analysis),
    }
}

/// Scratch file name carrying the destination's extension
fn scratch_name(output: &Path) -> String {
    match output.extension() {
        Some(ext) => format!("merged.{}", ext.to_string_lossy()),
        None => "merged.mp4".to_string(),
    }
}

/// Move the verified scratch file to its destination
fn persist(scratch: &Path, destination: &Path) -> SyncResult<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    // Rename fails across filesystems; fall back to a copy and let the
    // workspace guard collect the scratch file.
    if fs::rename(scratch, destination).is_err() {
        warn!(
            "Rename to {} failed, copying instead",
            destination.display()
        );
        fs::copy(scratch, destination)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QualityLevel;
    use crate::error::SyncError;
    use crate::planner::strategy::SyncStrategist;
    use crate::probe::MediaInfo;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FakeRunner {
        jobs: RefCell<Vec<TranscodeJob>>,
        output_bytes: usize,
        fail_with: Option<String>,
    }

    impl FakeRunner {
        fn producing(output_bytes: usize) -> Self {
            Self {
                jobs: RefCell::new(Vec::new()),
                output_bytes,
                fail_with: None,
            }
        }

        fn failing(stderr: &str) -> Self {
            Self {
                jobs: RefCell::new(Vec::new()),
                output_bytes: 0,
                fail_with: Some(stderr.to_string()),
            }
        }

        fn last_job(&self) -> TranscodeJob {
            self.jobs.borrow().last().cloned().unwrap()
        }
    }

    impl TranscodeRunner for FakeRunner {
        fn run(&self, job: &TranscodeJob) -> SyncResult<()> {
            self.jobs.borrow_mut().push(job.clone());
            if let Some(stderr) = &self.fail_with {
                return Err(SyncError::ExecutionError {
                    message: stderr.clone(),
                });
            }
            fs::write(&job.output, vec![0u8; self.output_bytes])?;
            Ok(())
        }
    }

    fn media(path: &str, duration: f64) -> MediaInfo {
        MediaInfo {
            path: path.to_string(),
            duration,
            size_bytes: 1_000_000,
            bitrate: 800_000,
            streams: vec![],
        }
    }

    fn analysis(video_duration: f64, audio_duration: f64) -> SyncAnalysis {
        SyncStrategist::new()
            .analyze(&media("v.mp4", video_duration), &media("a.mp3", audio_duration))
            .unwrap()
    }

    fn request(dir: &TempDir, method: SyncMethod) -> MergeRequest {
        MergeRequest {
            video: PathBuf::from("v.mp4"),
            audio: PathBuf::from("a.mp3"),
            output: dir.path().join("out").join("merged.mp4"),
            method,
            quality: QualityLevel::Balanced,
        }
    }

    fn run(
        method: SyncMethod,
        video_duration: f64,
        audio_duration: f64,
        runner: FakeRunner,
    ) -> (SyncResult<MergeReport>, FakeRunner, TempDir) {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::create().unwrap();
        let request = request(&dir, method);
        let executor = SyncExecutor::with_runner(runner);
        let report = executor.execute(&request, &analysis(video_duration, audio_duration), &workspace);
        let SyncExecutor { runner, .. } = executor;
        (report, runner, dir)
    }

    #[test]
    fn crop_extend_truncates_to_the_shorter_stream() {
        let (report, runner, _dir) =
            run(SyncMethod::CropExtend, 10.0, 10.2, FakeRunner::producing(4096));
        let job = runner.last_job();

        assert_eq!(job.limit_duration, Some(10.0));
        assert_eq!(job.video, Some(VideoEncoding::Copy));
        assert_eq!(job.filter_graph, None);
        assert_eq!(job.maps, vec!["0:v:0", "1:a:0"]);
        assert_eq!(report.unwrap().target_duration, 10.0);
    }

    #[test]
    fn video_speed_rescales_pts_toward_audio() {
        let (report, runner, _dir) =
            run(SyncMethod::VideoSpeed, 30.0, 20.0, FakeRunner::producing(4096));
        let job = runner.last_job();

        // Speed 1.5 means a PTS multiplier of 1/1.5
        assert_eq!(job.filter_graph.as_deref(), Some("[0:v]setpts=0.666667*PTS[v]"));
        assert_eq!(job.maps, vec!["[v]", "1:a:0"]);
        assert!(job.shortest);
        assert!(matches!(job.video, Some(VideoEncoding::Encode { .. })));
        assert_eq!(report.unwrap().target_duration, 20.0);
    }

    #[test]
    fn audio_speed_applies_the_reciprocal_tempo() {
        let (report, runner, _dir) =
            run(SyncMethod::AudioSpeed, 20.0, 30.0, FakeRunner::producing(4096));
        let job = runner.last_job();

        // speed_factor = 20/30, tempo = 30/20 = 1.5
        assert_eq!(job.filter_graph.as_deref(), Some("[1:a]atempo=1.500000[a]"));
        assert_eq!(job.maps, vec!["0:v:0", "[a]"]);
        assert_eq!(report.unwrap().target_duration, 20.0);
    }

    #[test]
    fn balanced_moves_both_streams_to_the_mean() {
        let (report, runner, _dir) =
            run(SyncMethod::Balanced, 20.0, 17.0, FakeRunner::producing(4096));
        let job = runner.last_job();

        let graph = job.filter_graph.unwrap();
        assert!(graph.contains("setpts="), "missing video leg: {graph}");
        assert!(graph.contains("atempo="), "missing audio leg: {graph}");
        assert_eq!(job.maps, vec!["[v]", "[a]"]);
        assert_eq!(report.unwrap().target_duration, 18.5);
    }

    #[test]
    fn smart_auto_resolves_to_the_recommendation() {
        let (report, runner, _dir) =
            run(SyncMethod::SmartAuto, 10.0, 10.2, FakeRunner::producing(4096));
        let job = runner.last_job();

        assert_eq!(report.unwrap().method_used, SyncMethod::CropExtend);
        assert_eq!(job.limit_duration, Some(10.0));
    }

    #[test]
    fn explicit_method_overrides_the_recommendation() {
        // Ratio 1.02 recommends crop_extend; the caller asked for balanced
        let (report, runner, _dir) =
            run(SyncMethod::Balanced, 10.0, 10.2, FakeRunner::producing(4096));

        assert_eq!(report.unwrap().method_used, SyncMethod::Balanced);
        assert!(runner.last_job().filter_graph.is_some());
    }

    #[test]
    fn verified_output_is_persisted_to_the_destination() {
        let (report, _runner, dir) =
            run(SyncMethod::CropExtend, 10.0, 10.2, FakeRunner::producing(4096));

        let report = report.unwrap();
        assert_eq!(report.output_size, 4096);
        let dest = dir.path().join("out").join("merged.mp4");
        assert_eq!(fs::metadata(dest).unwrap().len(), 4096);
    }

    #[test]
    fn undersized_output_fails_and_leaves_no_destination() {
        let (report, _runner, dir) =
            run(SyncMethod::CropExtend, 10.0, 10.2, FakeRunner::producing(12));

        assert!(matches!(report.unwrap_err(), SyncError::OutputSizeError { .. }));
        assert!(!dir.path().join("out").join("merged.mp4").exists());
    }

    #[test]
    fn engine_failure_surfaces_its_diagnostics() {
        let (report, _runner, dir) = run(
            SyncMethod::Balanced,
            20.0,
            17.0,
            FakeRunner::failing("Unknown encoder 'libx264'"),
        );

        match report.unwrap_err() {
            SyncError::ExecutionError { message } => {
                assert!(message.contains("Unknown encoder"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("out").join("merged.mp4").exists());
    }
}
