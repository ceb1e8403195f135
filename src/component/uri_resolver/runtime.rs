use crate::config::UriRuntimeLibraries;
use crate::tools::LibraryHandle;
use std::ffi::{CStr, c_char, c_int, c_void};
use std::ptr::NonNull;

/// URI 轉換所需的六個入口
///
/// # Safety
/// 實作者必須保證：
/// - `file_for_uri` 回傳的物件在 `unref` 之前有效；
/// - `native_path` 回傳的緩衝區是以 NUL 結尾的字串，在 `free` 之前有效；
/// - `unref` 與 `free` 各自只接受先前由本 runtime 取得的指標。
pub unsafe trait FileUriRuntime {
    fn init(&self);
    fn file_for_uri(&self, uri: &CStr) -> Option<NonNull<c_void>>;
    fn is_native(&self, file: NonNull<c_void>) -> bool;
    fn native_path(&self, file: NonNull<c_void>) -> Option<NonNull<c_char>>;
    fn unref(&self, file: NonNull<c_void>);
    fn free(&self, buffer: NonNull<c_void>);
}

/// 無法使用 GIO 時的原因
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UriRuntimeError {
    #[error("failed to load {library}: {message}")]
    LoadFailure { library: String, message: String },

    #[error("{library} does not export {symbol}")]
    MissingSymbol { library: String, symbol: String },
}

type InitFn = unsafe extern "C" fn();
type FileNewForUriFn = unsafe extern "C" fn(*const c_char) -> *mut c_void;
type FileIsNativeFn = unsafe extern "C" fn(*mut c_void) -> c_int;
type FileGetPathFn = unsafe extern "C" fn(*mut c_void) -> *mut c_char;
type ObjectUnrefFn = unsafe extern "C" fn(*mut c_void);
type FreeFn = unsafe extern "C" fn(*mut c_void);

/// 透過 dlopen 取得的 glib / gobject / gio
///
/// 函式指標只在 `_libraries` 存活期間有效，兩者一起持有與釋放。
pub struct GioRuntime {
    type_init: InitFn,
    file_new_for_uri: FileNewForUriFn,
    file_is_native: FileIsNativeFn,
    file_get_path: FileGetPathFn,
    object_unref: ObjectUnrefFn,
    free: FreeFn,
    _libraries: [LibraryHandle; 3],
}

impl GioRuntime {
    /// 載入三個函式庫並解析全部符號
    ///
    /// 三個函式庫都會嘗試載入，每個失敗都會輸出一行提示。
    pub fn load(names: &UriRuntimeLibraries) -> Result<Self, Vec<UriRuntimeError>> {
        let glib = LibraryHandle::probe(&names.glib);
        let gobject = LibraryHandle::probe(&names.gobject);
        let gio = LibraryHandle::probe(&names.gio);

        let load_failures: Vec<UriRuntimeError> = [&glib, &gobject, &gio]
            .into_iter()
            .filter(|handle| !handle.is_usable())
            .map(|handle| UriRuntimeError::LoadFailure {
                library: handle.name().to_string(),
                message: handle.load_error().unwrap_or_default().to_string(),
            })
            .collect();
        if !load_failures.is_empty() {
            return Err(load_failures);
        }

        let mut missing = Vec::new();
        // SAFETY: 型別與 GLib 2.x 公開 API 的 C 簽章一致
        let type_init = unsafe { lookup::<InitFn>(&gobject, "g_type_init", &mut missing) };
        let object_unref =
            unsafe { lookup::<ObjectUnrefFn>(&gobject, "g_object_unref", &mut missing) };
        let file_new_for_uri =
            unsafe { lookup::<FileNewForUriFn>(&gio, "g_file_new_for_uri", &mut missing) };
        let file_is_native =
            unsafe { lookup::<FileIsNativeFn>(&gio, "g_file_is_native", &mut missing) };
        let file_get_path =
            unsafe { lookup::<FileGetPathFn>(&gio, "g_file_get_path", &mut missing) };
        let free = unsafe { lookup::<FreeFn>(&glib, "g_free", &mut missing) };

        match (
            type_init,
            object_unref,
            file_new_for_uri,
            file_is_native,
            file_get_path,
            free,
        ) {
            (
                Some(type_init),
                Some(object_unref),
                Some(file_new_for_uri),
                Some(file_is_native),
                Some(file_get_path),
                Some(free),
            ) => Ok(Self {
                type_init,
                file_new_for_uri,
                file_is_native,
                file_get_path,
                object_unref,
                free,
                _libraries: [glib, gobject, gio],
            }),
            _ => Err(missing),
        }
    }
}

unsafe fn lookup<F: Copy>(
    handle: &LibraryHandle,
    symbol: &str,
    missing: &mut Vec<UriRuntimeError>,
) -> Option<F> {
    // SAFETY: 由呼叫端保證 F 的簽章
    let resolved = unsafe { handle.resolve::<F>(symbol) };
    if resolved.is_none() {
        missing.push(UriRuntimeError::MissingSymbol {
            library: handle.name().to_string(),
            symbol: symbol.to_string(),
        });
    }
    resolved
}

// SAFETY: 直接轉發到 GIO，生命週期規則即 GObject 的參考計數與 g_free 規則
unsafe impl FileUriRuntime for GioRuntime {
    fn init(&self) {
        unsafe { (self.type_init)() }
    }

    fn file_for_uri(&self, uri: &CStr) -> Option<NonNull<c_void>> {
        NonNull::new(unsafe { (self.file_new_for_uri)(uri.as_ptr()) })
    }

    fn is_native(&self, file: NonNull<c_void>) -> bool {
        unsafe { (self.file_is_native)(file.as_ptr()) != 0 }
    }

    fn native_path(&self, file: NonNull<c_void>) -> Option<NonNull<c_char>> {
        NonNull::new(unsafe { (self.file_get_path)(file.as_ptr()) })
    }

    fn unref(&self, file: NonNull<c_void>) {
        unsafe { (self.object_unref)(file.as_ptr()) }
    }

    fn free(&self, buffer: NonNull<c_void>) {
        unsafe { (self.free)(buffer.as_ptr()) }
    }
}
