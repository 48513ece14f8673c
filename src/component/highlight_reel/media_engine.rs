//! 媒體讀寫介面
//!
//! 解碼、縮放與編碼都交給外部 ffmpeg，這裡只負責組出指令並檢查結果

use super::clip_sampler::ClipSegment;
use crate::config::ToolSettings;
use crate::error::{ReelError, Result};
use crate::tools::{
    ConcatCommand, FfprobeProber, MediaInfo, Prober, SegmentCommand, concat_manifest,
    parse_media_info, run_with_timeout,
};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 串接清單檔名，放在片段所在資料夾
const MANIFEST_FILE_NAME: &str = "reel.ffconcat";

pub trait MediaEngine: Send + Sync {
    /// 讀取解析度、長度與音訊資訊
    fn inspect(&self, path: &Path) -> Result<MediaInfo>;

    /// 將片段擷取並縮放後寫入 `destination`
    fn render_segment(&self, segment: &ClipSegment, destination: &Path) -> Result<()>;

    /// 依序串接片段並編碼到 `output`，已存在的檔案會被覆寫
    fn concat(&self, segments: &[PathBuf], output: &Path) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    ffmpeg_path: PathBuf,
    prober: FfprobeProber,
}

impl FfmpegEngine {
    #[must_use]
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            ffmpeg_path: settings.ffmpeg_path.clone(),
            prober: FfprobeProber::new(&settings.ffprobe_path, settings.probe_timeout()),
        }
    }

    fn run_ffmpeg(&self, command: std::process::Command, subject: &Path) -> Result<()> {
        let output = run_with_timeout(command, subject, None)?;
        if !output.success() {
            return Err(ReelError::encode(output.stderr.trim().to_string()));
        }
        Ok(())
    }
}

impl MediaEngine for FfmpegEngine {
    fn inspect(&self, path: &Path) -> Result<MediaInfo> {
        let json = self.prober.probe(path)?;
        parse_media_info(&json, path)
    }

    fn render_segment(&self, segment: &ClipSegment, destination: &Path) -> Result<()> {
        let command = SegmentCommand {
            program: self.ffmpeg_path.clone(),
            source_path: segment.source_path.clone(),
            start_seconds: segment.start_seconds,
            duration_seconds: segment.duration_seconds,
            scale_to: segment.target_resolution,
            source_has_audio: segment.source_has_audio,
            destination_path: destination.to_path_buf(),
        };

        debug!(
            "擷取片段 {} [{:.3}s, {:.3}s) {} -> {}{}",
            segment.source_path.display(),
            segment.start_seconds,
            segment.end_seconds(),
            segment.target_resolution,
            destination.display(),
            if segment.needs_resize() { " (縮放)" } else { "" }
        );
        self.run_ffmpeg(command.build_command(), &segment.source_path)
    }

    fn concat(&self, segments: &[PathBuf], output: &Path) -> Result<()> {
        let manifest_dir = segments
            .first()
            .and_then(|p| p.parent())
            .ok_or(ReelError::EmptyReel)?;
        let manifest_path = manifest_dir.join(MANIFEST_FILE_NAME);
        fs::write(&manifest_path, concat_manifest(segments))?;

        let command = ConcatCommand {
            program: self.ffmpeg_path.clone(),
            manifest_path,
            output_path: output.to_path_buf(),
        };

        info!("串接 {} 個片段 -> {}", segments.len(), output.display());
        self.run_ffmpeg(command.build_command(), output)
    }
}
