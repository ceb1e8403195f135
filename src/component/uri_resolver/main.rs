use super::guard::{FileObjectGuard, PathBufferGuard};
use super::runtime::{FileUriRuntime, GioRuntime, UriRuntimeError};
use crate::component::thumbnail_pipeline::LogStream;
use crate::config::UriRuntimeLibraries;
use log::debug;
use std::ffi::CString;
use std::fmt;
use std::path::{Path, PathBuf};

/// 含有 `:` 的輸入才視為 URI
#[must_use]
pub fn is_uri_shaped(path: &Path) -> bool {
    path.as_os_str().as_encoded_bytes().contains(&b':')
}

/// 轉換過程中放棄時的提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory<'a> {
    CreateFailed(&'a Path),
    NotNative(&'a Path),
    PathFailed(&'a Path),
}

impl Advisory<'_> {
    /// 非本機檔案只是警告，與一般輸出一起印到 stdout
    #[must_use]
    pub const fn stream(&self) -> LogStream {
        match self {
            Self::NotNative(_) => LogStream::Stdout,
            Self::CreateFailed(_) | Self::PathFailed(_) => LogStream::Stderr,
        }
    }

    fn emit(&self) {
        match self.stream() {
            LogStream::Stdout => println!("{self}"),
            LogStream::Stderr => eprintln!("{self}"),
        }
    }
}

impl fmt::Display for Advisory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFailed(path) => write!(f, "Failed to create gio file: {}", path.display()),
            Self::NotNative(path) => write!(
                f,
                "Not a native file, thumbnailing will likely fail: {}",
                path.display()
            ),
            Self::PathFailed(path) => write!(f, "Failed to get path: {}", path.display()),
        }
    }
}

/// 嘗試把 URI 轉為本機路徑
///
/// 任何失敗（函式庫、符號、建立物件、非本機檔案）都只輸出提示並回傳原始輸入。
#[must_use]
pub fn resolve_uri(path: &Path, libraries: &UriRuntimeLibraries) -> PathBuf {
    if !is_uri_shaped(path) {
        return path.to_path_buf();
    }

    match GioRuntime::load(libraries) {
        Ok(runtime) => resolve_with_runtime(&runtime, path),
        Err(errors) => {
            report_unavailable(&errors);
            path.to_path_buf()
        }
    }
}

fn report_unavailable(errors: &[UriRuntimeError]) {
    for error in errors {
        debug!("GIO 不可用: {error}");
        if let UriRuntimeError::LoadFailure { message, .. } = error {
            eprintln!("{message}");
        }
    }

    if errors
        .iter()
        .any(|e| matches!(e, UriRuntimeError::MissingSymbol { .. }))
    {
        eprintln!("Failed to obtain functions from gio libraries");
    } else {
        eprintln!("Failed to load gio libraries, using input path as is");
    }
}

/// 已取得 runtime 後的轉換流程
///
/// 建立檔案物件後，不論從哪個分支離開，物件與路徑緩衝區都各釋放一次。
/// 路徑以原始位元組傳遞，不經過 UTF-8 轉換。
pub fn resolve_with_runtime<R: FileUriRuntime + ?Sized>(runtime: &R, path: &Path) -> PathBuf {
    runtime.init();

    let Ok(uri) = CString::new(path.as_os_str().as_encoded_bytes()) else {
        Advisory::CreateFailed(path).emit();
        return path.to_path_buf();
    };

    let Some(file) = runtime.file_for_uri(&uri) else {
        Advisory::CreateFailed(path).emit();
        return path.to_path_buf();
    };
    let file = FileObjectGuard::new(runtime, file);

    if !runtime.is_native(file.as_ptr()) {
        Advisory::NotNative(path).emit();
        return path.to_path_buf();
    }

    match runtime.native_path(file.as_ptr()) {
        Some(buffer) => {
            let buffer = PathBufferGuard::new(runtime, buffer);
            let resolved = buffer.to_path_buf();
            debug!("URI 轉換: {} -> {}", path.display(), resolved.display());
            resolved
        }
        None => {
            Advisory::PathFailed(path).emit();
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::ffi::{CStr, OsStr, c_char, c_void};
    use std::os::unix::ffi::OsStrExt;
    use std::ptr::NonNull;

    /// 記錄每個入口被呼叫次數的假 runtime
    #[derive(Default)]
    struct FakeRuntime {
        create_fails: bool,
        native: bool,
        path: Option<&'static [u8]>,
        init_calls: Cell<usize>,
        created: Cell<usize>,
        unrefs: Cell<usize>,
        frees: Cell<usize>,
        seen_uri: RefCell<Option<Vec<u8>>>,
    }

    unsafe impl FileUriRuntime for FakeRuntime {
        fn init(&self) {
            self.init_calls.set(self.init_calls.get() + 1);
        }

        fn file_for_uri(&self, uri: &CStr) -> Option<NonNull<c_void>> {
            *self.seen_uri.borrow_mut() = Some(uri.to_bytes().to_vec());
            if self.create_fails {
                return None;
            }
            self.created.set(self.created.get() + 1);
            Some(NonNull::dangling())
        }

        fn is_native(&self, _file: NonNull<c_void>) -> bool {
            self.native
        }

        fn native_path(&self, _file: NonNull<c_void>) -> Option<NonNull<c_char>> {
            self.path
                .map(|p| NonNull::new(CString::new(p).unwrap().into_raw()).unwrap())
        }

        fn unref(&self, _file: NonNull<c_void>) {
            self.unrefs.set(self.unrefs.get() + 1);
        }

        fn free(&self, buffer: NonNull<c_void>) {
            drop(unsafe { CString::from_raw(buffer.cast::<c_char>().as_ptr()) });
            self.frees.set(self.frees.get() + 1);
        }
    }

    fn path(bytes: &[u8]) -> &Path {
        Path::new(OsStr::from_bytes(bytes))
    }

    #[test]
    fn test_plain_path_is_returned_unchanged() {
        let libraries = UriRuntimeLibraries::default();
        for plain in ["/videos/movie.mp4", "relative/clip.mkv", ""] {
            assert_eq!(resolve_uri(Path::new(plain), &libraries), Path::new(plain));
        }
    }

    #[test]
    fn test_missing_libraries_keep_uri() {
        let libraries = UriRuntimeLibraries {
            glib: "libnope-glib-4242.so".to_string(),
            gobject: "libnope-gobject-4242.so".to_string(),
            gio: "libnope-gio-4242.so".to_string(),
        };
        let uri = Path::new("smb://server/share/movie.mp4");
        assert_eq!(resolve_uri(uri, &libraries), uri);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_missing_symbols_keep_uri() {
        let libraries = UriRuntimeLibraries {
            glib: "libc.so.6".to_string(),
            gobject: "libc.so.6".to_string(),
            gio: "libc.so.6".to_string(),
        };
        let uri = Path::new("file:///videos/movie.mp4");
        assert_eq!(resolve_uri(uri, &libraries), uri);
    }

    #[test]
    fn test_native_file_resolves_to_accessor_value() {
        let runtime = FakeRuntime {
            native: true,
            path: Some(b"/home/user/My Videos/clip.mp4"),
            ..Default::default()
        };

        let resolved = resolve_with_runtime(
            &runtime,
            Path::new("file:///home/user/My%20Videos/clip.mp4"),
        );

        assert_eq!(resolved, Path::new("/home/user/My Videos/clip.mp4"));
        assert_eq!(runtime.init_calls.get(), 1);
        assert_eq!(runtime.created.get(), 1);
        assert_eq!(runtime.frees.get(), 1);
        assert_eq!(runtime.unrefs.get(), 1);
        assert_eq!(
            runtime.seen_uri.borrow().as_deref(),
            Some(&b"file:///home/user/My%20Videos/clip.mp4"[..])
        );
    }

    #[test]
    fn test_non_utf8_native_path_is_byte_exact() {
        let runtime = FakeRuntime {
            native: true,
            path: Some(b"/tmp/caf\xe9.mp4"),
            ..Default::default()
        };

        let resolved = resolve_with_runtime(&runtime, Path::new("file:///tmp/caf%E9.mp4"));

        assert_eq!(resolved.as_os_str().as_bytes(), b"/tmp/caf\xe9.mp4");
        assert_eq!(runtime.frees.get(), 1);
        assert_eq!(runtime.unrefs.get(), 1);
    }

    #[test]
    fn test_non_utf8_uri_is_passed_through_unchanged() {
        let runtime = FakeRuntime {
            native: true,
            path: Some(b"/tmp/x.mp4"),
            ..Default::default()
        };

        let uri = path(b"file:///tmp/caf\xe9.mp4");
        resolve_with_runtime(&runtime, uri);

        assert_eq!(
            runtime.seen_uri.borrow().as_deref(),
            Some(&b"file:///tmp/caf\xe9.mp4"[..])
        );
    }

    #[test]
    fn test_non_native_file_is_released_once() {
        let runtime = FakeRuntime {
            native: false,
            path: Some(b"/never/used"),
            ..Default::default()
        };

        let uri = Path::new("sftp://host/video.mp4");
        assert_eq!(resolve_with_runtime(&runtime, uri), uri);
        assert_eq!(runtime.unrefs.get(), 1);
        assert_eq!(runtime.frees.get(), 0);
    }

    #[test]
    fn test_failed_path_fetch_still_releases_object() {
        let runtime = FakeRuntime {
            native: true,
            path: None,
            ..Default::default()
        };

        let uri = Path::new("file:///broken.mp4");
        assert_eq!(resolve_with_runtime(&runtime, uri), uri);
        assert_eq!(runtime.unrefs.get(), 1);
        assert_eq!(runtime.frees.get(), 0);
    }

    #[test]
    fn test_failed_creation_releases_nothing() {
        let runtime = FakeRuntime {
            create_fails: true,
            ..Default::default()
        };

        let uri = Path::new("bogus:thing");
        assert_eq!(resolve_with_runtime(&runtime, uri), uri);
        assert_eq!(runtime.init_calls.get(), 1);
        assert_eq!(runtime.unrefs.get(), 0);
        assert_eq!(runtime.frees.get(), 0);
    }

    #[test]
    fn test_interior_nul_is_not_passed_to_runtime() {
        let runtime = FakeRuntime::default();

        let uri = Path::new("file:///a\0b.mp4");
        assert_eq!(resolve_with_runtime(&runtime, uri), uri);
        assert!(runtime.seen_uri.borrow().is_none());
        assert_eq!(runtime.unrefs.get(), 0);
    }

    #[test]
    fn test_is_uri_shaped() {
        assert!(is_uri_shaped(Path::new("file:///tmp/a.mp4")));
        assert!(is_uri_shaped(Path::new("clip:1.mp4")));
        assert!(!is_uri_shaped(Path::new("/tmp/a.mp4")));
        assert!(!is_uri_shaped(path(b"/tmp/caf\xe9.mp4")));
    }

    #[test]
    fn test_advisory_streams_and_messages() {
        let uri = Path::new("sftp://host/video.mp4");

        assert_eq!(Advisory::NotNative(uri).stream(), LogStream::Stdout);
        assert_eq!(Advisory::CreateFailed(uri).stream(), LogStream::Stderr);
        assert_eq!(Advisory::PathFailed(uri).stream(), LogStream::Stderr);
        assert_eq!(
            Advisory::NotNative(uri).to_string(),
            "Not a native file, thumbnailing will likely fail: sftp://host/video.mp4"
        );
        assert_eq!(
            Advisory::PathFailed(uri).to_string(),
            "Failed to get path: sftp://host/video.mp4"
        );
    }
}
