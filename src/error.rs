//! 錯誤類型
//!
//! 區分「單一檔案可吸收」與「整個流程必須中止」兩類錯誤

use std::path::PathBuf;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, ReelError>;

#[derive(Debug, thiserror::Error)]
pub enum ReelError {
    /// 輸入資料夾中沒有可辨識的影片
    #[error("no video files found in {}", folder.display())]
    NoVideosFound { folder: PathBuf },

    /// 所有來源都短於片段長度，沒有任何片段可以串接
    #[error("no clips were produced: every source is shorter than the clip duration")]
    EmptyReel,

    /// 有影片檔，但全部都無法讀取
    #[error("none of the {} video files in {} could be read", skipped.len(), folder.display())]
    NoReadableVideos {
        folder: PathBuf,
        skipped: Vec<PathBuf>,
    },

    /// 外部程式超過時限
    #[error("{program} timed out after {}s on {}", timeout.as_secs(), path.display())]
    ProbeTimeout {
        program: String,
        path: PathBuf,
        timeout: Duration,
    },

    /// 找不到或無法啟動外部程式
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// 單一檔案探測失敗（由呼叫端決定是否吸收）
    #[error("failed to probe {}: {message}", path.display())]
    Probe { path: PathBuf, message: String },

    /// 編碼器回報失敗，訊息為 ffmpeg 原始 stderr
    #[error("encoding failed: {message}")]
    Encode { message: String },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReelError {
    pub fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// 是否屬於只影響單一檔案的錯誤
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Probe { .. } | Self::Json(_))
    }
}
