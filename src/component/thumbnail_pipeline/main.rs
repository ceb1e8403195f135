use super::engine::{EngineOptions, LogLevel, ThumbnailEngine};
use super::ffmpeg_engine::FfmpegThumbnailer;
use super::film_strip::FilmStripFilter;
use super::image_type::ImageType;
use super::request::{SeekTarget, ThumbnailRequest};
use crate::config::Settings;
use crate::error::ThumbnailerResult;
use log::debug;

/// 引擎訊息要寫到哪個輸出串流
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStream {
    Stdout,
    Stderr,
}

#[must_use]
pub const fn log_stream(level: LogLevel) -> LogStream {
    match level {
        LogLevel::Info => LogStream::Stdout,
        LogLevel::Error => LogStream::Stderr,
    }
}

fn print_engine_message(level: LogLevel, message: &str) {
    match log_stream(level) {
        LogStream::Stdout => println!("{message}"),
        LogStream::Stderr => eprintln!("{message}"),
    }
}

/// 依請求設定引擎並產生縮圖
///
/// 流程：
/// 1. 決定輸出格式（`-c` 優先，其次為檔名）
/// 2. 以固定設定建立引擎並掛上訊息輸出
/// 3. 需要時掛上一個底片濾鏡
/// 4. 設定擷取時間點後產生縮圖
///
/// 引擎與其濾鏡在函式結束時一併釋放，不論成功或失敗。
pub fn generate_thumbnail<E, F>(
    request: &ThumbnailRequest,
    create_engine: F,
) -> ThumbnailerResult<()>
where
    E: ThumbnailEngine,
    F: FnOnce(EngineOptions) -> E,
{
    let image_type = ImageType::resolve(request.image_format.as_deref(), &request.output)?;

    let mut engine = create_engine(EngineOptions {
        size: request.size,
        workaround_issues: request.workaround_issues,
        maintain_aspect_ratio: request.maintain_aspect_ratio,
        quality: request.quality,
        smart_frame_selection: request.smart_frame_selection,
    });
    engine.set_log_callback(Box::new(print_engine_message));

    if request.film_strip {
        engine.add_filter(Box::new(FilmStripFilter::new()));
    }

    match &request.seek {
        SeekTarget::Time(time) => engine.set_seek_time(time),
        SeekTarget::Percentage(percentage) => engine.set_seek_percentage(*percentage),
    }

    debug!(
        "產生縮圖: {} -> {} ({image_type:?})",
        request.input.display(),
        request.output.display()
    );
    engine.generate(&request.input, image_type, &request.output)
}

/// 使用 ffmpeg 引擎產生縮圖
pub fn run_thumbnailer(request: &ThumbnailRequest, settings: &Settings) -> ThumbnailerResult<()> {
    generate_thumbnail(request, |options| FfmpegThumbnailer::new(options, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::thumbnail_pipeline::engine::{FrameFilter, LogCallback};
    use crate::error::ThumbnailerError;
    use image::RgbImage;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Recorded {
        options: Option<EngineOptions>,
        has_log_callback: bool,
        filters: usize,
        seek: Option<SeekTarget>,
        generated: Vec<(PathBuf, ImageType, PathBuf)>,
        filters_dropped: usize,
    }

    struct RecordingEngine {
        recorded: Rc<RefCell<Recorded>>,
        filters: Vec<Box<dyn FrameFilter>>,
        fail: bool,
    }

    impl Drop for RecordingEngine {
        fn drop(&mut self) {
            self.recorded.borrow_mut().filters_dropped += self.filters.len();
        }
    }

    impl ThumbnailEngine for RecordingEngine {
        fn set_log_callback(&mut self, _callback: LogCallback) {
            self.recorded.borrow_mut().has_log_callback = true;
        }

        fn add_filter(&mut self, filter: Box<dyn FrameFilter>) {
            self.filters.push(filter);
            self.recorded.borrow_mut().filters += 1;
        }

        fn set_seek_percentage(&mut self, percentage: i32) {
            self.recorded.borrow_mut().seek = Some(SeekTarget::Percentage(percentage));
        }

        fn set_seek_time(&mut self, time: &str) {
            self.recorded.borrow_mut().seek = Some(SeekTarget::Time(time.to_string()));
        }

        fn generate(
            &mut self,
            input: &Path,
            image_type: ImageType,
            output: &Path,
        ) -> ThumbnailerResult<()> {
            let mut frame = RgbImage::new(64, 36);
            for filter in &self.filters {
                filter.process(&mut frame);
            }
            self.recorded.borrow_mut().generated.push((
                input.to_path_buf(),
                image_type,
                output.to_path_buf(),
            ));
            if self.fail {
                return Err(ThumbnailerError::engine("decoder exploded"));
            }
            Ok(())
        }
    }

    fn run(
        request: &ThumbnailRequest,
        fail: bool,
    ) -> (ThumbnailerResult<()>, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let shared = Rc::clone(&recorded);
        let result = generate_thumbnail(request, move |options| {
            shared.borrow_mut().options = Some(options);
            RecordingEngine {
                recorded: shared,
                filters: Vec::new(),
                fail,
            }
        });
        (result, recorded)
    }

    #[test]
    fn test_generate_with_defaults() {
        let mut request = ThumbnailRequest::new("in.mp4", "out.png");
        request.size = 200;

        let (result, recorded) = run(&request, false);
        result.unwrap();

        let recorded = recorded.borrow();
        let options = recorded.options.unwrap();
        assert_eq!(options.size, 200);
        assert_eq!(options.quality, 8);
        assert!(options.maintain_aspect_ratio);
        assert!(recorded.has_log_callback);
        assert_eq!(recorded.filters, 0);
        assert_eq!(recorded.seek, Some(SeekTarget::Percentage(10)));
        assert_eq!(
            recorded.generated,
            vec![(PathBuf::from("in.mp4"), ImageType::Png, PathBuf::from("out.png"))]
        );
    }

    #[test]
    fn test_seek_time_supersedes_percentage() {
        let mut request = ThumbnailRequest::new("in.mp4", "out.jpg");
        request.seek = SeekTarget::Time("00:01:30".to_string());

        let (result, recorded) = run(&request, false);
        result.unwrap();

        let recorded = recorded.borrow();
        assert_eq!(recorded.seek, Some(SeekTarget::Time("00:01:30".to_string())));
        assert_eq!(recorded.generated[0].1, ImageType::Jpeg);
    }

    #[test]
    fn test_film_strip_released_after_failure() {
        let mut request = ThumbnailRequest::new("in.mp4", "out.png");
        request.film_strip = true;

        let (result, recorded) = run(&request, true);
        assert!(matches!(result, Err(ThumbnailerError::Engine(_))));

        let recorded = recorded.borrow();
        assert_eq!(recorded.filters, 1);
        assert_eq!(recorded.filters_dropped, 1);
    }

    #[test]
    fn test_invalid_format_skips_engine() {
        let mut request = ThumbnailRequest::new("in.mp4", "out.png");
        request.image_format = Some("bmp".to_string());

        let (result, recorded) = run(&request, false);
        assert!(matches!(result, Err(ThumbnailerError::InvalidImageType(_))));
        assert!(recorded.borrow().options.is_none());
        assert!(recorded.borrow().generated.is_empty());
    }

    #[test]
    fn test_log_stream_routing() {
        assert_eq!(log_stream(LogLevel::Info), LogStream::Stdout);
        assert_eq!(log_stream(LogLevel::Error), LogStream::Stderr);
    }
}
