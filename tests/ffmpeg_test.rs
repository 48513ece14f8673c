//! 使用真實 ffmpeg / ffprobe 的端對端測試
//!
//! 系統上沒有 ffmpeg 時自動跳過

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use highlight_reel::component::HighlightReel;
use highlight_reel::config::{ReelParameters, ToolSettings};
use highlight_reel::tools::{FfprobeProber, Prober, Resolution, parse_media_info};
use tempfile::TempDir;

fn tools_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|tool| {
        Command::new(tool)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    })
}

fn generate_video(path: &Path, size: &str, seconds: u32, with_audio: bool) {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-hide_banner", "-loglevel", "error", "-y", "-f", "lavfi", "-i"])
        .arg(format!("testsrc=size={size}:rate=25:duration={seconds}"));
    if with_audio {
        cmd.args(["-f", "lavfi", "-i"])
            .arg(format!("sine=frequency=440:duration={seconds}"));
    }
    cmd.args(["-c:v", "libx264", "-pix_fmt", "yuv420p"]);
    if with_audio {
        cmd.args(["-c:a", "aac"]);
    }
    let status = cmd.arg(path).status().unwrap();
    assert!(status.success(), "無法產生測試影片");
}

#[test]
fn test_reel_from_real_videos() {
    if !tools_available() {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    std::fs::create_dir(&input).unwrap();
    generate_video(&input.join("a.mp4"), "640x360", 5, true);
    generate_video(&input.join("b.mkv"), "320x240", 4, false);

    let output = temp_dir.path().join("reel.mp4");
    let params = ReelParameters {
        input_folder: input,
        output_file: output.clone(),
        clip_duration: 1.0,
        skip_duration: 1.0,
    };

    let reel = HighlightReel::new(
        params,
        ToolSettings::default(),
        Arc::new(AtomicBool::new(false)),
    );
    let report = reel.run().unwrap();

    assert_eq!(report.target_resolution, Resolution::new(320, 240));
    assert!(report.reel.segment_count >= 4);
    assert!(output.exists());

    let json = FfprobeProber::default().probe(&output).unwrap();
    let info = parse_media_info(&json, &output).unwrap();
    assert_eq!(info.resolution, Resolution::new(320, 240));
    assert!(info.has_audio);
    assert!(
        (info.duration_seconds - report.reel.duration_seconds).abs() < 1.0,
        "輸出長度 {:.2}s 與預期 {:.2}s 差距過大",
        info.duration_seconds,
        report.reel.duration_seconds
    );
}
