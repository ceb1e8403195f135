use serde::{Deserialize, Serialize};

/// 執行時設定檔中 `VIDEO_THUMBNAILER_SETTINGS` 指向的 JSON 對應結構
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ffmpeg_binary: String,
    pub ffprobe_binary: String,
    pub uri_runtime: UriRuntimeLibraries,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ffmpeg_binary: "ffmpeg".to_string(),
            ffprobe_binary: "ffprobe".to_string(),
            uri_runtime: UriRuntimeLibraries::default(),
        }
    }
}

/// URI 轉換所需的三個共享函式庫（以動態載入器搜尋路徑名稱表示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UriRuntimeLibraries {
    pub glib: String,
    pub gobject: String,
    pub gio: String,
}

impl Default for UriRuntimeLibraries {
    fn default() -> Self {
        Self {
            glib: "libglib-2.0.so.0".to_string(),
            gobject: "libgobject-2.0.so.0".to_string(),
            gio: "libgio-2.0.so.0".to_string(),
        }
    }
}
