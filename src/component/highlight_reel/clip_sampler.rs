//! 片段取樣
//!
//! 從時間 0 開始，每隔 `clip + skip` 秒取一段 `clip` 秒的視窗，
//! 直到下一個視窗會超出影片長度為止。

use super::video_catalog::SourceVideo;
use crate::error::{ReelError, Result};
use crate::tools::Resolution;
use std::path::PathBuf;

/// 來源影片中的一段時間視窗，輸出時縮放至 `target_resolution`
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSegment {
    pub source_path: PathBuf,
    pub start_seconds: f64,
    pub duration_seconds: f64,
    pub source_resolution: Resolution,
    pub target_resolution: Resolution,
    pub source_has_audio: bool,
}

impl ClipSegment {
    #[must_use]
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }

    #[must_use]
    pub fn needs_resize(&self) -> bool {
        self.source_resolution != self.target_resolution
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClipSampler {
    clip_duration: f64,
    skip_duration: f64,
}

impl ClipSampler {
    pub fn new(clip_duration: f64, skip_duration: f64) -> Result<Self> {
        if !clip_duration.is_finite() || clip_duration <= 0.0 {
            return Err(ReelError::InvalidParameters(format!(
                "clip duration must be positive, got {clip_duration}"
            )));
        }
        if !skip_duration.is_finite() || skip_duration < 0.0 {
            return Err(ReelError::InvalidParameters(format!(
                "skip duration must not be negative, got {skip_duration}"
            )));
        }
        Ok(Self {
            clip_duration,
            skip_duration,
        })
    }

    /// 視窗數量：`floor((d - c) / (c + s)) + 1`，短於片段長度時為 0
    #[must_use]
    pub fn window_count(&self, source_duration: f64) -> usize {
        if !source_duration.is_finite() || source_duration < self.clip_duration {
            return 0;
        }
        let stride = self.clip_duration + self.skip_duration;
        ((source_duration - self.clip_duration) / stride).floor() as usize + 1
    }

    /// 計算所有視窗的起點（秒）
    #[must_use]
    pub fn window_starts(&self, source_duration: f64) -> Vec<f64> {
        let stride = self.clip_duration + self.skip_duration;
        (0..self.window_count(source_duration))
            .map(|index| index as f64 * stride)
            .collect()
    }

    pub fn sample(&self, video: &SourceVideo, target_resolution: Resolution) -> Vec<ClipSegment> {
        self.window_starts(video.duration_seconds)
            .into_iter()
            .map(|start_seconds| ClipSegment {
                source_path: video.path.clone(),
                start_seconds,
                duration_seconds: self.clip_duration,
                source_resolution: video.resolution,
                target_resolution,
                source_has_audio: video.has_audio,
            })
            .collect()
    }
}
