//! End-to-end CLI contract tests
//!
//! These exercise argument handling and the pre-flight checks that run
//! before any external engine would be spawned, so they pass without
//! ffmpeg/ffprobe installed.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn avsync() -> Command {
    Command::cargo_bin("avsync").unwrap()
}

#[test]
fn help_succeeds() {
    avsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge"));
}

#[test]
fn no_arguments_fails() {
    avsync().assert().failure();
}

#[test]
fn merge_missing_video_exits_one() {
    avsync()
        .args(["merge", "/no/such/video.mp4", "/no/such/audio.mp3", "out.mp4"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/no/such/video.mp4"));
}

#[test]
fn merge_missing_audio_exits_one() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("video.mp4");
    std::fs::write(&video, b"fake video data").unwrap();

    avsync()
        .args([
            "merge",
            video.to_str().unwrap(),
            "/no/such/audio.mp3",
            "out.mp4",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/no/such/audio.mp3"));
}

#[test]
fn merge_invalid_method_exits_one() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("video.mp4");
    let audio = dir.path().join("audio.mp3");
    std::fs::write(&video, b"fake video data").unwrap();
    std::fs::write(&audio, b"fake audio data").unwrap();

    avsync()
        .args([
            "merge",
            video.to_str().unwrap(),
            audio.to_str().unwrap(),
            "out.mp4",
            "warp",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid sync method"));
}

#[test]
fn merge_rejects_unreadable_policy_file() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("video.mp4");
    let audio = dir.path().join("audio.mp3");
    std::fs::write(&video, b"fake video data").unwrap();
    std::fs::write(&audio, b"fake audio data").unwrap();

    avsync()
        .args([
            "merge",
            video.to_str().unwrap(),
            audio.to_str().unwrap(),
            "out.mp4",
            "smart_auto",
            "balanced",
            "--policy",
            "/no/such/policy.toml",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("policy"));
}

#[test]
fn analyze_missing_input_exits_one() {
    avsync()
        .args(["analyze", "/no/such/video.mp4", "/no/such/audio.mp3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn inspect_missing_input_exits_one() {
    avsync()
        .args(["inspect", "/no/such/input.mp4"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn speak_rejects_empty_text() {
    avsync()
        .args(["speak", "   ", "out.wav"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("empty"));
}
