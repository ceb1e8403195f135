use super::args::{CliArgs, usage_text, version_text};
use crate::component::resolve_uri;
use crate::component::thumbnail_pipeline::ThumbnailRequest;
use crate::config::Settings;
use crate::error::ThumbnailerResult;
use console::style;
use log::debug;
use std::ffi::OsString;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = -1;

/// 解析參數、轉換 URI 並交給 `generate` 產生縮圖，回傳行程結束碼
///
/// - 無法解析的參數：顯示用法，回傳 -1
/// - 缺少輸入或輸出：顯示用法，回傳 0
/// - 輸出到 stdout 卻未指定格式：提示後回傳 0，不產生縮圖
/// - 產生失敗：輸出 `Error:` 訊息，回傳 -1
pub fn run_cli<I, T, G>(argv: I, settings: &Settings, generate: G) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    G: FnOnce(&ThumbnailRequest) -> ThumbnailerResult<()>,
{
    let args = match CliArgs::try_parse_args(argv) {
        Ok(args) => args,
        Err(e) => {
            debug!("參數解析失敗: {e}");
            eprintln!("invalid arguments");
            println!("{}", usage_text());
            return EXIT_FAILURE;
        }
    };

    if args.show_help {
        println!("{}", usage_text());
        return EXIT_SUCCESS;
    }
    if args.show_version {
        println!("{}", version_text());
        return EXIT_SUCCESS;
    }

    let (Some(input), Some(output)) = (args.input.clone(), args.output.clone()) else {
        eprintln!("invalid arguments");
        println!("{}", usage_text());
        return EXIT_SUCCESS;
    };
    if input.as_os_str().is_empty() || output.as_os_str().is_empty() {
        eprintln!("invalid arguments");
        println!("{}", usage_text());
        return EXIT_SUCCESS;
    }

    if !args.operands.is_empty() {
        debug!("忽略多餘參數: {:?}", args.operands);
    }

    if output.as_os_str() == "-" && args.image_format.is_none() {
        eprintln!("When writing to stdout the image format needs to be specified (e.g.: -c png)");
        return EXIT_SUCCESS;
    }

    let input = resolve_uri(&input, &settings.uri_runtime);
    let request = args.into_request(input, output);

    match generate(&request) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold().for_stderr());
            EXIT_FAILURE
        }
    }
}
