use crate::error::{ReelError, Result};
use crate::tools::process_runner::run_with_timeout;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// 影像解析度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 總像素數
    #[must_use]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub resolution: Resolution,
    pub duration_seconds: f64,
    pub has_audio: bool,
}

/// 外部探測程式，回傳原始 JSON 文字
pub trait Prober: Send + Sync {
    fn probe(&self, path: &Path) -> Result<String>;
}

/// 以 ffprobe 子程序實作的 [`Prober`]
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl FfprobeProber {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe", None)
    }
}

impl Prober for FfprobeProber {
    fn probe(&self, path: &Path) -> Result<String> {
        let mut command = Command::new(&self.program);
        command
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path);

        let output = run_with_timeout(command, path, self.timeout)?;
        if !output.success() {
            return Err(ReelError::probe(
                path,
                format!("ffprobe exited with {}: {}", output.status, output.stderr.trim()),
            ));
        }

        Ok(output.stdout)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FfprobeOutput {
    pub format: Option<FormatInfo>,
    pub streams: Option<Vec<StreamInfo>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FormatInfo {
    pub duration: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamInfo {
    pub codec_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub side_data_list: Vec<SideData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SideData {
    pub rotation: Option<f64>,
}

impl StreamInfo {
    /// 顯示旋轉角度：優先讀 Display Matrix，其次舊式的 `rotate` tag
    fn rotation_degrees(&self) -> Option<f64> {
        self.side_data_list
            .iter()
            .find_map(|side_data| side_data.rotation)
            .or_else(|| self.tags.get("rotate").and_then(|r| r.trim().parse().ok()))
    }

    /// 旋轉 ±90/270 度時，解碼後的寬高會互換
    fn is_quarter_turn(&self) -> bool {
        self.rotation_degrees()
            .is_some_and(|degrees| (degrees.round() as i64).rem_euclid(180) == 90)
    }
}

impl FfprobeOutput {
    pub(crate) fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 讀取 format 層級的 tag
    pub(crate) fn format_tag(&self, key: &str) -> Option<&str> {
        self.format
            .as_ref()
            .and_then(|format| format.tags.get(key))
            .map(String::as_str)
    }
}

/// 從 ffprobe JSON 取出解析度、長度與是否有音訊
pub fn parse_media_info(json: &str, path: &Path) -> Result<MediaInfo> {
    let probe = FfprobeOutput::parse(json)
        .map_err(|e| ReelError::probe(path, format!("unreadable ffprobe output: {e}")))?;
    let streams = probe.streams.as_deref().unwrap_or_default();

    let video_stream = streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ReelError::probe(path, "no video stream"))?;

    let (width, height) = match (video_stream.width, video_stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(ReelError::probe(path, "video stream has no resolution")),
    };
    // ffmpeg 解碼時會自動套用旋轉，解析度以顯示方向為準
    let (width, height) = if video_stream.is_quarter_turn() {
        (height, width)
    } else {
        (width, height)
    };

    // 優先從 format 取長度，其次從 stream
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(video_stream.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| ReelError::probe(path, "unknown duration"))?;

    let has_audio = streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(MediaInfo {
        resolution: Resolution::new(width, height),
        duration_seconds,
        has_audio,
    })
}
