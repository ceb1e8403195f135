use super::engine::{EngineOptions, FrameFilter, LogCallback, LogLevel, ThumbnailEngine};
use super::image_type::ImageType;
use super::request::SeekTarget;
use crate::config::Settings;
use crate::error::{ThumbnailerError, ThumbnailerResult};
use crate::tools::get_media_duration;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// 百分比定位與片尾保留的距離（秒），定位在片尾時 ffmpeg 解不出任何影格
const END_OF_STREAM_MARGIN_SECS: f64 = 0.5;

/// 以系統 ffmpeg 擷取影格的縮圖引擎
///
/// ffmpeg 負責解碼、定位與縮放，輸出一張 PNG 到 stdout；
/// 濾鏡與最終編碼在行程內完成。
pub struct FfmpegThumbnailer {
    options: EngineOptions,
    ffmpeg: String,
    ffprobe: String,
    seek: SeekTarget,
    filters: Vec<Box<dyn FrameFilter>>,
    log_callback: Option<LogCallback>,
}

impl FfmpegThumbnailer {
    #[must_use]
    pub fn new(options: EngineOptions, settings: &Settings) -> Self {
        Self {
            options,
            ffmpeg: settings.ffmpeg_binary.clone(),
            ffprobe: settings.ffprobe_binary.clone(),
            seek: SeekTarget::default(),
            filters: Vec::new(),
            log_callback: None,
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        if let Some(callback) = &self.log_callback {
            callback(level, message);
        }
    }

    fn seek_seconds(&self, input: &Path) -> ThumbnailerResult<f64> {
        match &self.seek {
            SeekTarget::Time(time) => parse_seek_time(time).map(|secs| secs as f64),
            SeekTarget::Percentage(percentage) => {
                match get_media_duration(&self.ffprobe, input) {
                    Ok(duration) => Ok(percentage_seek_seconds(duration, *percentage)),
                    Err(e) => {
                        self.log(
                            LogLevel::Error,
                            &format!("Could not determine duration, seeking to start: {e:#}"),
                        );
                        Ok(0.0)
                    }
                }
            }
        }
    }

    fn decode_frame(&self, input: &Path, seek_seconds: f64) -> ThumbnailerResult<RgbImage> {
        let args = build_ffmpeg_args(input, seek_seconds, &self.options);
        debug!("{} {args:?}", self.ffmpeg);

        let output = Command::new(&self.ffmpeg)
            .args(&args)
            .output()
            .map_err(|e| {
                ThumbnailerError::engine(format!("Failed to run {}: {e}", self.ffmpeg))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !output.status.success() {
            return Err(ThumbnailerError::engine(format!(
                "Failed to decode video frame from {}: {stderr}",
                input.display()
            )));
        }
        if !stderr.is_empty() {
            self.log(LogLevel::Error, stderr);
        }
        if output.stdout.is_empty() {
            return Err(ThumbnailerError::engine(format!(
                "No video frame could be decoded from {}",
                input.display()
            )));
        }

        let frame = image::load_from_memory_with_format(&output.stdout, image::ImageFormat::Png)?;
        Ok(frame.into_rgb8())
    }
}

impl ThumbnailEngine for FfmpegThumbnailer {
    fn set_log_callback(&mut self, callback: LogCallback) {
        self.log_callback = Some(callback);
    }

    fn add_filter(&mut self, filter: Box<dyn FrameFilter>) {
        self.filters.push(filter);
    }

    fn set_seek_percentage(&mut self, percentage: i32) {
        self.seek = SeekTarget::Percentage(percentage);
    }

    fn set_seek_time(&mut self, time: &str) {
        self.seek = SeekTarget::Time(time.to_string());
    }

    fn generate(
        &mut self,
        input: &Path,
        image_type: ImageType,
        output: &Path,
    ) -> ThumbnailerResult<()> {
        let seek_seconds = self.seek_seconds(input)?;
        let mut frame = self.decode_frame(input, seek_seconds)?;

        for filter in &self.filters {
            filter.process(&mut frame);
        }

        let encoded = encode_frame(&frame, image_type, self.options.quality)?;
        if output.as_os_str() == "-" {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&encoded)?;
            stdout.flush()?;
        } else {
            std::fs::write(output, &encoded)?;
            self.log(
                LogLevel::Info,
                &format!(
                    "Wrote {}x{} thumbnail to {}",
                    frame.width(),
                    frame.height(),
                    output.display()
                ),
            );
        }

        Ok(())
    }
}

/// 百分比（夾在 0-100）換算為秒數，且不超過片尾前的保留距離
fn percentage_seek_seconds(duration: f64, percentage: i32) -> f64 {
    let percentage = percentage.clamp(0, 100);
    let latest = (duration - END_OF_STREAM_MARGIN_SECS).max(0.0);
    (duration * f64::from(percentage) / 100.0).min(latest)
}

/// 解析 `hh:mm:ss`（或 `mm:ss`）為秒數
///
/// 分與秒欄位不限於 0-59，`00:90` 即 90 秒；溢位視為格式錯誤。
fn parse_seek_time(time: &str) -> ThumbnailerResult<u64> {
    let parts: Vec<&str> = time.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(ThumbnailerError::invalid_seek_time(time));
    }

    parts
        .iter()
        .try_fold(0u64, |total, part| {
            let value = part.parse::<u64>().ok()?;
            total.checked_mul(60)?.checked_add(value)
        })
        .ok_or_else(|| ThumbnailerError::invalid_seek_time(time))
}

/// 組合 ffmpeg 參數
///
/// 一般情況 `-ss` 放在 `-i` 前做快速定位；workaround 模式放在 `-i` 後，
/// 以解碼方式定位，避開舊版 demuxer 定位不準的問題。
fn build_ffmpeg_args(input: &Path, seek_seconds: f64, options: &EngineOptions) -> Vec<OsString> {
    let seek = OsString::from(format!("{:.3}", seek_seconds.max(0.0)));
    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error"]
        .into_iter()
        .map(OsString::from)
        .collect();

    if !options.workaround_issues {
        args.extend([OsString::from("-ss"), seek.clone()]);
    }

    args.extend([OsString::from("-i"), input.as_os_str().to_os_string()]);

    if options.workaround_issues {
        args.extend([OsString::from("-ss"), seek]);
    }

    args.extend(["-an", "-sn", "-dn"].into_iter().map(OsString::from));

    if let Some(filter) = build_video_filter(options) {
        args.extend([OsString::from("-vf"), OsString::from(filter)]);
    }

    args.extend(
        ["-frames:v", "1", "-f", "image2pipe", "-c:v", "png", "-"]
            .into_iter()
            .map(OsString::from),
    );

    args
}

fn build_video_filter(options: &EngineOptions) -> Option<String> {
    let mut filters = Vec::new();

    if options.smart_frame_selection {
        filters.push("thumbnail".to_string());
    }

    if options.size > 0 {
        let size = options.size;
        if options.maintain_aspect_ratio {
            filters.push(format!(
                "scale={size}:{size}:force_original_aspect_ratio=decrease"
            ));
        } else {
            filters.push(format!("scale={size}:{size}"));
        }
    }

    (!filters.is_empty()).then(|| filters.join(","))
}

/// 品質 0-10 對應 JPEG 品質 1-100
fn jpeg_quality(quality: u8) -> u8 {
    (quality.min(10) * 10).max(1)
}

fn encode_frame(
    frame: &RgbImage,
    image_type: ImageType,
    quality: u8,
) -> ThumbnailerResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match image_type {
        ImageType::Png => frame.write_with_encoder(PngEncoder::new(&mut buffer))?,
        ImageType::Jpeg => frame.write_with_encoder(JpegEncoder::new_with_quality(
            &mut buffer,
            jpeg_quality(quality),
        ))?,
    }
    Ok(buffer)
}
