use crate::config::types::Settings;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// 指向 JSON 設定檔的環境變數
pub const SETTINGS_ENV_VAR: &str = "VIDEO_THUMBNAILER_SETTINGS";

impl Settings {
    /// 載入設定；未設定環境變數時使用預設值，讀取失敗時警告並退回預設值
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV_VAR) else {
            return Self::default();
        };

        match Self::load_from(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("讀取設定檔: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
