use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SEEK_PERCENTAGE: i32 = 10;
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 128;
pub const DEFAULT_IMAGE_QUALITY: u8 = 8;

/// 擷取時間點：百分比或絕對時間，兩者互斥
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekTarget {
    Percentage(i32),
    Time(String),
}

impl Default for SeekTarget {
    fn default() -> Self {
        Self::Percentage(DEFAULT_SEEK_PERCENTAGE)
    }
}

impl FromStr for SeekTarget {
    type Err = String;

    /// 含 `:` 的值視為 `hh:mm:ss`，否則為百分比
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.contains(':') {
            return Ok(Self::Time(value.to_string()));
        }

        value
            .trim()
            .parse::<i32>()
            .map(Self::Percentage)
            .map_err(|e| format!("invalid seek percentage '{value}': {e}"))
    }
}

/// 一次執行的完整縮圖設定，建立後不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub image_format: Option<String>,
    pub size: u32,
    pub quality: u8,
    pub maintain_aspect_ratio: bool,
    pub smart_frame_selection: bool,
    pub workaround_issues: bool,
    pub film_strip: bool,
    pub seek: SeekTarget,
}

impl ThumbnailRequest {
    /// 以預設值建立請求
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            image_format: None,
            size: DEFAULT_THUMBNAIL_SIZE,
            quality: DEFAULT_IMAGE_QUALITY,
            maintain_aspect_ratio: true,
            smart_frame_selection: false,
            workaround_issues: false,
            film_strip: false,
            seek: SeekTarget::default(),
        }
    }

    #[must_use]
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
