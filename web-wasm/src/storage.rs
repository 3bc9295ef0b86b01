//! localStorage による設定保存

use batch_ocr_common::{Error, PreferenceStore, Result};
use wasm_bindgen::JsValue;

/// ブラウザの localStorage。プライベートモード等で使えなければエラーを返す。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| Error::Storage("window is not available".into()))?
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| Error::Storage("localStorage is not available".into()))
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?.set_item(key, value).map_err(storage_error)
    }
}

fn storage_error(value: JsValue) -> Error {
    Error::Storage(format!("{:?}", value))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use batch_ocr_common::{ThemePreference, ThemeState};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_theme_survives_reload() {
        let key = "theme-test";
        LocalStore.set(key, "dark").unwrap();

        let mut theme = ThemeState::load(&LocalStore, key);
        assert_eq!(theme.toggle(&LocalStore).unwrap(), ThemePreference::Light);

        let reloaded = ThemeState::load(&LocalStore, key);
        assert_eq!(reloaded.preference(), ThemePreference::Light);
        assert_eq!(LocalStore.get(key).unwrap().as_deref(), Some("light"));
    }
}
