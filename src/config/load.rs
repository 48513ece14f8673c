use crate::config::types::ToolSettings;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// 預設設定檔，位於目前工作目錄
pub const DEFAULT_SETTINGS_FILE: &str = "highlight_reel.json";

impl ToolSettings {
    /// 載入設定；檔案不存在或格式錯誤時使用預設值
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
        if !path.exists() {
            debug!("找不到設定檔 {}，使用預設值", path.display());
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{e:#}，使用預設值");
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
