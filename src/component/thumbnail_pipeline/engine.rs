use super::image_type::ImageType;
use crate::error::ThumbnailerResult;
use image::RgbImage;
use std::path::Path;

/// 引擎訊息等級
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

pub type LogCallback = Box<dyn Fn(LogLevel, &str)>;

/// 建立引擎時的固定設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub size: u32,
    pub workaround_issues: bool,
    pub maintain_aspect_ratio: bool,
    pub quality: u8,
    pub smart_frame_selection: bool,
}

/// 在編碼前修改影格的濾鏡
pub trait FrameFilter {
    fn process(&self, frame: &mut RgbImage);
}

/// 縮圖引擎：解碼、定位、縮放、濾鏡、編碼
pub trait ThumbnailEngine {
    fn set_log_callback(&mut self, callback: LogCallback);

    /// 引擎取得濾鏡所有權，濾鏡隨引擎一起釋放
    fn add_filter(&mut self, filter: Box<dyn FrameFilter>);

    fn set_seek_percentage(&mut self, percentage: i32);

    fn set_seek_time(&mut self, time: &str);

    fn generate(
        &mut self,
        input: &Path,
        image_type: ImageType,
        output: &Path,
    ) -> ThumbnailerResult<()>;
}
