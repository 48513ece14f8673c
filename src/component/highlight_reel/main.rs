use super::clip_sampler::{ClipSampler, ClipSegment};
use super::media_engine::{FfmpegEngine, MediaEngine};
use super::reel_assembler::{ReelAssembler, ReelSummary};
use super::video_catalog::{Catalog, VideoCatalog};
use crate::config::{ReelParameters, ToolSettings};
use crate::error::Result;
use crate::tools::{FfprobeProber, Prober, Resolution};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 一次執行的結果摘要
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub sources: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub target_resolution: Resolution,
    pub reel: ReelSummary,
}

pub struct HighlightReel {
    params: ReelParameters,
    settings: ToolSettings,
    shutdown_signal: Arc<AtomicBool>,
}

impl HighlightReel {
    pub const fn new(
        params: ReelParameters,
        settings: ToolSettings,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            params,
            settings,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<RunReport> {
        let prober = FfprobeProber::new(&self.settings.ffprobe_path, self.settings.probe_timeout());
        let engine = FfmpegEngine::new(&self.settings);

        process_files(
            &self.params,
            &self.settings,
            &prober,
            &engine,
            Arc::clone(&self.shutdown_signal),
        )
    }
}

/// 探索 → 依時間排序 → 決定目標解析度 → 逐一取樣 → 串接輸出
pub fn process_files<P, M>(
    params: &ReelParameters,
    settings: &ToolSettings,
    prober: &P,
    engine: &M,
    shutdown_signal: Arc<AtomicBool>,
) -> Result<RunReport>
where
    P: Prober + ?Sized,
    M: MediaEngine + ?Sized,
{
    let sampler = ClipSampler::new(params.clip_duration, params.skip_duration)?;

    let Catalog {
        videos,
        target_resolution,
        skipped,
    } = VideoCatalog::new(prober, engine)
        .with_parallel_probe(settings.parallel_probe)
        .discover(&params.input_folder)?;

    info!(
        "排序後的影片: {:?}",
        videos.iter().map(|v| v.path.display().to_string()).collect::<Vec<_>>()
    );
    info!("所有影片統一縮放至 {target_resolution}");

    let mut segments: Vec<ClipSegment> = Vec::new();
    for video in &videos {
        let sampled = sampler.sample(video, target_resolution);
        info!(
            "{}: {:.2}s, {} 個片段",
            video.path.display(),
            video.duration_seconds,
            sampled.len()
        );
        segments.extend(sampled);
    }

    let reel = ReelAssembler::new(engine, shutdown_signal)
        .with_keep_segments(settings.keep_segments)
        .assemble(&segments, &params.output_file)?;
    info!("輸出完成: {}", reel.output_path.display());

    Ok(RunReport {
        sources: videos.into_iter().map(|v| v.path).collect(),
        skipped,
        target_resolution,
        reel,
    })
}
