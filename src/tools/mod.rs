mod ffprobe_info;
mod library_probe;
mod locale;

pub use ffprobe_info::get_media_duration;
pub use library_probe::LibraryHandle;
pub use locale::set_ctype_locale_from_env;
