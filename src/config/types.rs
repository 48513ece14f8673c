use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CLIP_DURATION: f64 = 3.0;
pub const DEFAULT_SKIP_DURATION: f64 = 7.0;

/// 一次執行的輸入參數
#[derive(Debug, Clone, PartialEq)]
pub struct ReelParameters {
    pub input_folder: PathBuf,
    pub output_file: PathBuf,
    /// 每個片段長度（秒）
    pub clip_duration: f64,
    /// 片段之間跳過的長度（秒）
    pub skip_duration: f64,
}

impl Default for ReelParameters {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("."),
            output_file: PathBuf::from("out.mp4"),
            clip_duration: DEFAULT_CLIP_DURATION,
            skip_duration: DEFAULT_SKIP_DURATION,
        }
    }
}

/// 外部工具設定，可由 JSON 檔覆寫
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub ffprobe_path: PathBuf,
    pub ffmpeg_path: PathBuf,
    /// 每次 ffprobe 呼叫的時限（秒），0 表示不限
    pub probe_timeout_secs: u64,
    /// 平行探測建立時間
    pub parallel_probe: bool,
    /// 保留中間片段檔案
    pub keep_segments: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            probe_timeout_secs: 30,
            parallel_probe: false,
            keep_segments: false,
        }
    }
}

impl ToolSettings {
    #[must_use]
    pub const fn probe_timeout(&self) -> Option<Duration> {
        match self.probe_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
