//! JavaScript Bridge バインディング
//!
//! Tesseract.js のワーカー操作を `/js/ocr-bridge.js` 経由で呼び出す。

use batch_ocr_common::{EngineEvent, Error};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// ============================================
// データ型定義
// ============================================

/// Tesseract.js の logger に渡ってくるメッセージ
///
/// `workerId` / `jobId` なども来るが使わない。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggerMessage {
    pub status: String,
    pub progress: f64,
}

impl From<LoggerMessage> for EngineEvent {
    fn from(message: LoggerMessage) -> Self {
        EngineEvent::from_tag(&message.status, message.progress)
    }
}

/// JS側の例外をエラーに変換
pub fn engine_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Engine(message)
}

// ============================================
// JavaScript関数のextern宣言
// ============================================

#[wasm_bindgen(module = "/js/ocr-bridge.js")]
extern "C" {
    /// ワーカーを生成。`on_event` は進捗メッセージごとに呼ばれる。
    #[wasm_bindgen(js_name = "createWorker", catch)]
    pub async fn create_worker_js(on_event: &js_sys::Function) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "loadLanguage", catch)]
    pub async fn load_language_js(worker: &JsValue, lang: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "initialize", catch)]
    pub async fn initialize_js(worker: &JsValue, lang: &str) -> Result<JsValue, JsValue>;

    /// 認識テキスト（string）を返す
    #[wasm_bindgen(js_name = "recognize", catch)]
    pub async fn recognize_js(worker: &JsValue, image: &web_sys::File) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "terminate", catch)]
    pub async fn terminate_js(worker: &JsValue) -> Result<JsValue, JsValue>;
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_logger_message_from_js_object() {
        let object = js_sys::Object::new();
        js_sys::Reflect::set(&object, &"status".into(), &"recognizing text".into()).unwrap();
        js_sys::Reflect::set(&object, &"progress".into(), &0.5.into()).unwrap();
        js_sys::Reflect::set(&object, &"workerId".into(), &"Worker-0".into()).unwrap();

        let message: LoggerMessage = serde_wasm_bindgen::from_value(object.into()).unwrap();
        assert_eq!(message.status, "recognizing text");
        assert_eq!(message.progress, 0.5);
    }

    #[wasm_bindgen_test]
    fn wasm_engine_error_message() {
        let error = engine_error(js_sys::Error::new("network down").into());
        assert_eq!(error.to_string(), "Recognition engine error: network down");
    }
}
