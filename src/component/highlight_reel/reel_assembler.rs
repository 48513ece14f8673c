use super::clip_sampler::ClipSegment;
use super::media_engine::MediaEngine;
use crate::error::{ReelError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub struct ReelSummary {
    pub output_path: PathBuf,
    pub segment_count: usize,
    /// 輸出影片總長（秒）
    pub duration_seconds: f64,
    /// 保留下來的中間片段資料夾
    pub segments_dir: Option<PathBuf>,
}

/// 將所有片段逐一擷取到暫存資料夾，再一次串接編碼
pub struct ReelAssembler<'a, M: MediaEngine + ?Sized> {
    engine: &'a M,
    shutdown_signal: Arc<AtomicBool>,
    keep_segments: bool,
}

impl<'a, M: MediaEngine + ?Sized> ReelAssembler<'a, M> {
    pub const fn new(engine: &'a M, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            engine,
            shutdown_signal,
            keep_segments: false,
        }
    }

    #[must_use]
    pub const fn with_keep_segments(mut self, keep_segments: bool) -> Self {
        self.keep_segments = keep_segments;
        self
    }

    pub fn assemble(&self, segments: &[ClipSegment], output_path: &Path) -> Result<ReelSummary> {
        if segments.is_empty() {
            return Err(ReelError::EmptyReel);
        }

        let workspace = tempfile::Builder::new()
            .prefix("highlight_reel_")
            .tempdir()?;

        let progress_bar = ProgressBar::new(segments.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar.set_message("擷取片段中...");

        let mut rendered = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            if self.is_cancelled() {
                progress_bar.abandon_with_message("已取消");
                return Err(ReelError::Cancelled);
            }

            let destination = workspace.path().join(format!("segment_{index:05}.mp4"));
            if let Err(e) = self.engine.render_segment(segment, &destination) {
                progress_bar.abandon_with_message("失敗");
                return Err(e);
            }

            rendered.push(destination);
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("完成");

        if self.is_cancelled() {
            return Err(ReelError::Cancelled);
        }
        self.engine.concat(&rendered, output_path)?;

        let segments_dir = if self.keep_segments {
            let kept = workspace.keep();
            info!("中間片段保留於 {}", kept.display());
            Some(kept)
        } else {
            None
        };

        Ok(ReelSummary {
            output_path: output_path.to_path_buf(),
            segment_count: segments.len(),
            duration_seconds: segments.iter().map(|s| s.duration_seconds).sum(),
            segments_dir,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.shutdown_signal.load(Ordering::SeqCst)
    }
}
