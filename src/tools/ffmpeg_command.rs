use crate::tools::Resolution;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const VIDEO_CODEC: &str = "libx264";
pub const AUDIO_CODEC: &str = "aac";
pub const PIXEL_FORMAT: &str = "yuv420p";

/// 中間片段統一的音訊規格，串接時各片段的串流配置必須一致
const AUDIO_SAMPLE_RATE: &str = "48000";
const AUDIO_CHANNELS: &str = "2";
const VIDEO_TIMESCALE: &str = "90000";

/// 擷取單一片段並縮放至目標解析度
#[derive(Debug, Clone)]
pub struct SegmentCommand {
    pub program: PathBuf,
    pub source_path: PathBuf,
    pub start_seconds: f64,
    pub duration_seconds: f64,
    /// 輸出解析度，來源旋轉後的顯示尺寸也會縮放到這裡
    pub scale_to: Resolution,
    pub source_has_audio: bool,
    pub destination_path: PathBuf,
}

impl SegmentCommand {
    #[must_use]
    pub fn video_filter(&self) -> String {
        format!(
            "scale={}:{},setsar=1,format={PIXEL_FORMAT}",
            self.scale_to.width, self.scale_to.height
        )
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]);

        // -ss 在 -i 前：轉碼時仍為精準定位
        cmd.arg("-ss")
            .arg(format!("{:.3}", self.start_seconds))
            .arg("-i")
            .arg(&self.source_path);

        if self.source_has_audio {
            cmd.args(["-map", "0:v:0", "-map", "0:a:0"]);
        } else {
            // 沒有音訊的來源補上靜音軌，讓所有片段串流配置一致
            cmd.args([
                "-f",
                "lavfi",
                "-i",
                "anullsrc=channel_layout=stereo:sample_rate=48000",
                "-map",
                "0:v:0",
                "-map",
                "1:a:0",
            ]);
        }

        cmd.arg("-t")
            .arg(format!("{:.3}", self.duration_seconds))
            .arg("-vf")
            .arg(self.video_filter())
            .args([
                "-c:v",
                VIDEO_CODEC,
                "-preset",
                "veryfast",
                "-crf",
                "18",
                "-c:a",
                AUDIO_CODEC,
                "-ar",
                AUDIO_SAMPLE_RATE,
                "-ac",
                AUDIO_CHANNELS,
                "-video_track_timescale",
                VIDEO_TIMESCALE,
                "-sn",
                "-dn",
                "-map_metadata",
                "-1",
            ])
            .arg(&self.destination_path);

        cmd
    }
}

/// 以 concat demuxer 串接所有片段並做最終編碼
#[derive(Debug, Clone)]
pub struct ConcatCommand {
    pub program: PathBuf,
    pub manifest_path: PathBuf,
    pub output_path: PathBuf,
}

impl ConcatCommand {
    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"])
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(&self.manifest_path)
            .args([
                "-map",
                "0:v:0",
                "-map",
                "0:a:0",
                "-c:v",
                VIDEO_CODEC,
                "-pix_fmt",
                PIXEL_FORMAT,
                "-c:a",
                AUDIO_CODEC,
                "-movflags",
                "+faststart",
            ])
            .arg(&self.output_path);

        cmd
    }
}

/// 產生 ffconcat 清單內容
#[must_use]
pub fn concat_manifest(segments: &[PathBuf]) -> String {
    let mut manifest = String::from("ffconcat version 1.0\n");
    for segment in segments {
        let _ = writeln!(manifest, "file '{}'", escape_manifest_path(segment));
    }
    manifest
}

/// 單引號需以 `'\''` 跳脫
fn escape_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn segment(scale_to: Resolution, source_has_audio: bool) -> SegmentCommand {
        SegmentCommand {
            program: PathBuf::from("ffmpeg"),
            source_path: PathBuf::from("/videos/a.mov"),
            start_seconds: 10.0,
            duration_seconds: 3.0,
            scale_to,
            source_has_audio,
            destination_path: PathBuf::from("/tmp/seg_0000.mp4"),
        }
    }

    #[test]
    fn test_video_filter_always_scales_to_target() {
        let cmd = segment(Resolution::new(1280, 720), true);
        assert_eq!(cmd.video_filter(), "scale=1280:720,setsar=1,format=yuv420p");

        // 旋轉過的來源與目標同尺寸時仍需縮放
        let cmd = segment(Resolution::new(1920, 1080), true);
        assert!(cmd.video_filter().starts_with("scale=1920:1080,"));
    }

    #[test]
    fn test_segment_command_seeks_and_limits() {
        let args = args_of(&segment(Resolution::new(640, 360), true).build_command());

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
        assert_eq!(args[ss + 1], "10.000");

        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "3.000");
        assert!(args.contains(&"0:a:0".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("anullsrc")));
        assert_eq!(args.last().unwrap(), "/tmp/seg_0000.mp4");
    }

    #[test]
    fn test_segment_command_adds_silence_without_audio() {
        let args = args_of(&segment(Resolution::new(640, 360), false).build_command());
        assert!(args.iter().any(|a| a.starts_with("anullsrc")));
        assert!(args.contains(&"1:a:0".to_string()));
    }

    #[test]
    fn test_concat_command_codecs() {
        let cmd = ConcatCommand {
            program: PathBuf::from("ffmpeg"),
            manifest_path: PathBuf::from("/tmp/reel.ffconcat"),
            output_path: PathBuf::from("out.mp4"),
        };
        let args = args_of(&cmd.build_command());

        let cv = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[cv + 1], VIDEO_CODEC);
        let ca = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[ca + 1], AUDIO_CODEC);
        assert!(args.contains(&"-y".to_string()));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_concat_manifest() {
        let manifest = concat_manifest(&[
            PathBuf::from("/tmp/seg_0000.mp4"),
            PathBuf::from("/tmp/it's.mp4"),
        ]);
        assert_eq!(
            manifest,
            "ffconcat version 1.0\nfile '/tmp/seg_0000.mp4'\nfile '/tmp/it'\\''s.mp4'\n"
        );
    }
}
