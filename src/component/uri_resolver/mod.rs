//! URI 轉本機路徑元件
//!
//! 執行時才以名稱載入 glib / gobject / gio，缺少任何一項都只是提示，不影響主流程

mod guard;
mod main;
mod runtime;

pub use guard::{FileObjectGuard, PathBufferGuard};
pub use main::{Advisory, is_uri_shaped, resolve_uri, resolve_with_runtime};
pub use runtime::{FileUriRuntime, GioRuntime, UriRuntimeError};
