use log::debug;
use std::process::ExitCode;
use video_thumbnailer::cli::run_cli;
use video_thumbnailer::component::run_thumbnailer;
use video_thumbnailer::config::Settings;
use video_thumbnailer::init;
use video_thumbnailer::tools::set_ctype_locale_from_env;

fn main() -> ExitCode {
    init::init();

    if !set_ctype_locale_from_env() {
        eprintln!("Failed to set locale");
    }

    let settings = Settings::load();
    debug!("設定: {settings:?}");

    let status = std::panic::catch_unwind(|| {
        run_cli(std::env::args_os(), &settings, |request| {
            run_thumbnailer(request, &settings)
        })
    });

    match status {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX)),
        Err(_) => {
            eprintln!("Unexpected error");
            ExitCode::from(u8::MAX)
        }
    }
}
