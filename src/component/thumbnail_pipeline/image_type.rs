use crate::error::{ThumbnailerError, ThumbnailerResult};
use std::path::Path;

/// 輸出圖片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Png,
    Jpeg,
}

impl ImageType {
    /// 由 `-c` 指定的格式名稱決定（不分大小寫）
    pub fn from_format_name(name: &str) -> ThumbnailerResult<Self> {
        match name.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            _ => Err(ThumbnailerError::invalid_image_type(name)),
        }
    }

    /// 由輸出檔名的副檔名推斷，無法判斷時為 PNG
    ///
    /// 比後綴短的檔名不會符合任何後綴，因此同樣得到 PNG。
    /// 只比對位元組，非 UTF-8 的檔名也能判斷。
    #[must_use]
    pub fn from_filename(filename: &Path) -> Self {
        let lowercase = filename.as_os_str().as_encoded_bytes().to_ascii_lowercase();
        if lowercase.ends_with(b".jpeg") || lowercase.ends_with(b".jpg") {
            Self::Jpeg
        } else {
            Self::Png
        }
    }

    /// 明確指定的格式優先，否則由檔名推斷
    pub fn resolve(explicit: Option<&str>, output: &Path) -> ThumbnailerResult<Self> {
        explicit.map_or_else(|| Ok(Self::from_filename(output)), Self::from_format_name)
    }
}
