use log::debug;

/// 依環境變數設定 `LC_CTYPE`，回傳是否成功
pub fn set_ctype_locale_from_env() -> bool {
    // SAFETY: 空字串代表從環境取得 locale；在單執行緒的啟動階段呼叫
    let result = unsafe { libc::setlocale(libc::LC_CTYPE, c"".as_ptr()) };
    let ok = !result.is_null();
    debug!("setlocale(LC_CTYPE): {ok}");
    ok
}
