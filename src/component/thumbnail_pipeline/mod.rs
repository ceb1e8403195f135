//! 縮圖產生元件
//!
//! 決定輸出格式、建立引擎、掛上底片濾鏡、設定擷取時間點後交給引擎產生縮圖

mod engine;
mod ffmpeg_engine;
mod film_strip;
mod image_type;
mod main;
mod request;

pub use engine::{EngineOptions, FrameFilter, LogCallback, LogLevel, ThumbnailEngine};
pub use ffmpeg_engine::FfmpegThumbnailer;
pub use film_strip::FilmStripFilter;
pub use image_type::ImageType;
pub use main::{LogStream, generate_thumbnail, log_stream, run_thumbnailer};
pub use request::{
    DEFAULT_IMAGE_QUALITY, DEFAULT_SEEK_PERCENTAGE, DEFAULT_THUMBNAIL_SIZE, SeekTarget,
    ThumbnailRequest,
};
