use super::runtime::FileUriRuntime;
use std::ffi::{CStr, OsStr, c_char, c_void};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use std::ptr::NonNull;

/// 持有一個檔案物件的參考，drop 時 unref 一次
pub struct FileObjectGuard<'r, R: FileUriRuntime + ?Sized> {
    runtime: &'r R,
    file: NonNull<c_void>,
}

impl<'r, R: FileUriRuntime + ?Sized> FileObjectGuard<'r, R> {
    pub const fn new(runtime: &'r R, file: NonNull<c_void>) -> Self {
        Self { runtime, file }
    }

    pub const fn as_ptr(&self) -> NonNull<c_void> {
        self.file
    }
}

impl<R: FileUriRuntime + ?Sized> Drop for FileObjectGuard<'_, R> {
    fn drop(&mut self) {
        self.runtime.unref(self.file);
    }
}

/// 持有 runtime 配置的路徑字串，drop 時 free 一次
pub struct PathBufferGuard<'r, R: FileUriRuntime + ?Sized> {
    runtime: &'r R,
    buffer: NonNull<c_char>,
}

impl<'r, R: FileUriRuntime + ?Sized> PathBufferGuard<'r, R> {
    pub const fn new(runtime: &'r R, buffer: NonNull<c_char>) -> Self {
        Self { runtime, buffer }
    }

    /// 逐位元組複製，不做 UTF-8 轉換
    pub fn to_path_buf(&self) -> PathBuf {
        // SAFETY: FileUriRuntime 保證緩衝區以 NUL 結尾且在 free 前有效
        let bytes = unsafe { CStr::from_ptr(self.buffer.as_ptr()) }.to_bytes();
        PathBuf::from(OsStr::from_bytes(bytes))
    }
}

impl<R: FileUriRuntime + ?Sized> Drop for PathBufferGuard<'_, R> {
    fn drop(&mut self) {
        self.runtime.free(self.buffer.cast());
    }
}
