use crate::component::thumbnail_pipeline::{
    DEFAULT_IMAGE_QUALITY, DEFAULT_THUMBNAIL_SIZE, SeekTarget, ThumbnailRequest,
};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// 命令列參數（getopt 風格，值可以緊接在旗標後，例如 `-ifoo.mp4`）
///
/// 需要值的旗標一律取下一個參數，即使它以 `-` 開頭；
/// 多餘的非選項參數被忽略。
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct CliArgs {
    /// Input file or URI
    #[arg(short = 'i', allow_hyphen_values = true)]
    pub input: Option<PathBuf>,

    /// Output file (`-` for stdout)
    #[arg(short = 'o', allow_hyphen_values = true)]
    pub output: Option<PathBuf>,

    /// Thumbnail size, 0 keeps the original size
    #[arg(short = 's', allow_hyphen_values = true, default_value_t = DEFAULT_THUMBNAIL_SIZE)]
    pub size: u32,

    /// Seek target: percentage or hh:mm:ss
    #[arg(short = 't', allow_hyphen_values = true)]
    pub seek: Option<SeekTarget>,

    /// Image quality, 0 (bad) to 10 (best)
    #[arg(
        short = 'q',
        allow_hyphen_values = true,
        default_value_t = DEFAULT_IMAGE_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=10)
    )]
    pub quality: u8,

    /// Override image format (png, jpeg or jpg)
    #[arg(short = 'c', allow_hyphen_values = true)]
    pub image_format: Option<String>,

    #[arg(short = 'a')]
    pub ignore_aspect_ratio: bool,

    #[arg(short = 'f')]
    pub film_strip: bool,

    #[arg(short = 'p')]
    pub smart_frame_selection: bool,

    #[arg(short = 'w')]
    pub workaround_issues: bool,

    #[arg(short = 'v')]
    pub show_version: bool,

    #[arg(short = 'h')]
    pub show_help: bool,

    #[arg(hide = true)]
    pub operands: Vec<OsString>,
}

impl CliArgs {
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// 以（可能已轉換過的）輸入路徑建立請求
    #[must_use]
    pub fn into_request(self, input: PathBuf, output: PathBuf) -> ThumbnailRequest {
        ThumbnailRequest {
            input,
            output,
            image_format: self.image_format,
            size: self.size,
            quality: self.quality,
            maintain_aspect_ratio: !self.ignore_aspect_ratio,
            smart_frame_selection: self.smart_frame_selection,
            workaround_issues: self.workaround_issues,
            film_strip: self.film_strip,
            seek: self.seek.unwrap_or_default(),
        }
    }
}

#[must_use]
pub fn version_text() -> String {
    format!(
        "{} version: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

#[must_use]
pub fn usage_text() -> String {
    format!(
        "Usage: {} [options]

Options:
  -i<s>   : input file
  -o<s>   : output file
  -s<n>   : thumbnail size (use 0 for original size) (default: 128)
  -t<n|s> : time to seek to (percentage or absolute time hh:mm:ss) (default: 10%)
  -q<n>   : image quality (0 = bad, 10 = best) (default: 8)
  -c      : override image format (jpeg or png) (default: determined by filename)
  -a      : ignore aspect ratio and generate square thumbnail
  -f      : create a movie strip overlay
  -p      : use smarter frame selection (slower)
  -w      : workaround issues in old versions of ffmpeg
  -v      : print version number
  -h      : display this help",
        env!("CARGO_PKG_NAME")
    )
}
