//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod thumbnail_pipeline;
pub mod uri_resolver;

pub use thumbnail_pipeline::{ThumbnailRequest, generate_thumbnail, run_thumbnailer};
pub use uri_resolver::resolve_uri;
