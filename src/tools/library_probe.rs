use libloading::Library;
use log::debug;

/// 以名稱動態載入的共享函式庫
///
/// 載入失敗不會回傳錯誤，而是保留一個不可用的 handle 與載入器的錯誤訊息。
/// handle 被 drop 時函式庫會被卸載一次；失敗的 handle drop 時不做任何事。
#[derive(Debug)]
pub struct LibraryHandle {
    name: String,
    library: Option<Library>,
    load_error: Option<String>,
}

impl LibraryHandle {
    /// 嘗試以動態載入器的搜尋路徑載入 `name`
    #[must_use]
    pub fn probe(name: &str) -> Self {
        // SAFETY: 載入函式庫會執行其初始化程式碼；這裡只載入呼叫端指定的系統函式庫
        match unsafe { Library::new(name) } {
            Ok(library) => {
                debug!("已載入函式庫: {name}");
                Self {
                    name: name.to_string(),
                    library: Some(library),
                    load_error: None,
                }
            }
            Err(e) => {
                debug!("無法載入函式庫 {name}: {e}");
                Self {
                    name: name.to_string(),
                    library: None,
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.library.is_some()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// 解析匯出符號並複製出函式指標
    ///
    /// 不可用的 handle 或找不到符號時回傳 `None`。
    ///
    /// # Safety
    /// `F` 必須是與該符號實際 ABI 與簽章相符的 `extern "C"` 函式指標型別，
    /// 且回傳的指標只能在此 handle 存活期間使用。
    #[must_use]
    pub unsafe fn resolve<F: Copy>(&self, symbol: &str) -> Option<F> {
        let library = self.library.as_ref()?;

        // SAFETY: 由呼叫端保證 F 與符號簽章相符
        match unsafe { library.get::<F>(symbol.as_bytes()) } {
            Ok(sym) => Some(*sym),
            Err(e) => {
                debug!("{} 中找不到符號 {symbol}: {e}", self.name);
                None
            }
        }
    }
}
