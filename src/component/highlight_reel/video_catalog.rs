//! 影片目錄
//!
//! 探索資料夾中的影片、依拍攝時間排序，並決定共同的目標解析度

use super::media_engine::MediaEngine;
use super::metadata_reader::{CaptureTime, MetadataReader};
use crate::error::{ReelError, Result};
use crate::tools::{Prober, Resolution, scan_video_files};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 單一來源影片，整個執行期間不會改變
#[derive(Debug, Clone, PartialEq)]
pub struct SourceVideo {
    pub path: PathBuf,
    pub resolution: Resolution,
    pub duration_seconds: f64,
    pub has_audio: bool,
    pub capture_time: CaptureTime,
}

/// 排序完成的影片目錄
#[derive(Debug, Clone)]
pub struct Catalog {
    pub videos: Vec<SourceVideo>,
    pub target_resolution: Resolution,
    /// 無法讀取而略過的檔案
    pub skipped: Vec<PathBuf>,
}

pub struct VideoCatalog<'a, P: Prober + ?Sized, M: MediaEngine + ?Sized> {
    prober: &'a P,
    engine: &'a M,
    parallel_probe: bool,
}

impl<'a, P, M> VideoCatalog<'a, P, M>
where
    P: Prober + ?Sized,
    M: MediaEngine + ?Sized,
{
    pub const fn new(prober: &'a P, engine: &'a M) -> Self {
        Self {
            prober,
            engine,
            parallel_probe: false,
        }
    }

    #[must_use]
    pub const fn with_parallel_probe(mut self, parallel_probe: bool) -> Self {
        self.parallel_probe = parallel_probe;
        self
    }

    pub fn discover(&self, folder: &Path) -> Result<Catalog> {
        let files = scan_video_files(folder)?;
        if files.is_empty() {
            return Err(ReelError::NoVideosFound {
                folder: folder.to_path_buf(),
            });
        }
        info!("找到 {} 個影片檔案", files.len());

        let ordered = order_by_capture_time(self.capture_times(files));
        let unknown = ordered.iter().filter(|(_, time)| !time.is_known()).count();
        if unknown > 0 {
            info!("{unknown} 個影片沒有拍攝時間，依檔名排在最後");
        }

        let mut videos = Vec::with_capacity(ordered.len());
        let mut skipped = Vec::new();
        for (path, capture_time) in ordered {
            match self.engine.inspect(&path) {
                Ok(media) => videos.push(SourceVideo {
                    path,
                    resolution: media.resolution,
                    duration_seconds: media.duration_seconds,
                    has_audio: media.has_audio,
                    capture_time,
                }),
                Err(e) if e.is_recoverable() => {
                    warn!("略過無法讀取的影片 {}: {e}", path.display());
                    skipped.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        let Some(target_resolution) = select_target_resolution(&videos) else {
            return Err(ReelError::NoReadableVideos {
                folder: folder.to_path_buf(),
                skipped,
            });
        };

        Ok(Catalog {
            videos,
            target_resolution,
            skipped,
        })
    }

    /// 取得每個檔案的拍攝時間，結果維持輸入順序
    fn capture_times(&self, files: Vec<PathBuf>) -> Vec<(PathBuf, CaptureTime)> {
        let reader = MetadataReader::new(self.prober);

        if self.parallel_probe {
            let times: Vec<CaptureTime> =
                files.par_iter().map(|path| reader.capture_time(path)).collect();
            files.into_iter().zip(times).collect()
        } else {
            files
                .into_iter()
                .map(|path| {
                    let time = reader.capture_time(&path);
                    (path, time)
                })
                .collect()
        }
    }
}

/// 依拍攝時間穩定排序，時間相同或皆未知時依路徑
#[must_use]
pub fn order_by_capture_time(mut files: Vec<(PathBuf, CaptureTime)>) -> Vec<(PathBuf, CaptureTime)> {
    files.sort_by(|(path_a, time_a), (path_b, time_b)| {
        time_a.cmp(time_b).then_with(|| path_a.cmp(path_b))
    });
    files
}

/// 選出總像素最少的解析度，相同時取目錄順序中的第一個
#[must_use]
pub fn select_target_resolution(videos: &[SourceVideo]) -> Option<Resolution> {
    let mut lowest: Option<Resolution> = None;
    for video in videos {
        match lowest {
            Some(current) if video.resolution.pixel_count() >= current.pixel_count() => {}
            _ => lowest = Some(video.resolution),
        }
    }
    lowest
}
