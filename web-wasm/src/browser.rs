//! ブラウザ操作（アラート・クリップボード・ダウンロード）

use batch_ocr_common::{Error, Result, TextExport};
use gloo::file::{Blob, ObjectUrl};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlDocument, HtmlTextAreaElement};

pub const COPIED_MESSAGE: &str = "Text copied to clipboard!";

pub fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

/// 操作の前提条件違反はアラート、それ以外はログのみ
pub fn report(error: &Error) {
    if error.is_user_input() {
        alert(&error.to_string());
    } else {
        tracing::warn!(error = %error, "action failed");
    }
}

fn document() -> Result<web_sys::Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Config("document is not available".into()))
}

fn dom_error(value: JsValue) -> Error {
    Error::Config(format!("DOM error: {:?}", value))
}

/// テキストエリアを全選択してコピーを要求する。成否は確認しない。
pub fn copy_from_textarea(textarea: &HtmlTextAreaElement) -> Result<()> {
    textarea.select();
    // モバイル向け
    textarea
        .set_selection_range(0, 99_999)
        .map_err(dom_error)?;
    let document: HtmlDocument = document()?.dyn_into().map_err(|_| {
        Error::Config("document is not an HTML document".into())
    })?;
    let accepted = document.exec_command("copy").map_err(dom_error)?;
    tracing::debug!(accepted, "copy requested");
    Ok(())
}

/// テキストファイルとしてダウンロードさせる
pub fn download_text(export: &TextExport) -> Result<()> {
    let blob = Blob::new_with_options(export.contents.as_str(), Some(export.mime_type));
    let url = ObjectUrl::from(blob);

    let document = document()?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(dom_error)?
        .dyn_into()
        .map_err(|_| Error::Config("anchor element expected".into()))?;
    anchor.set_href(&url);
    anchor.set_download(&export.file_name);

    let body = document
        .body()
        .ok_or_else(|| Error::Config("document has no body".into()))?;
    body.append_child(&anchor).map_err(dom_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(dom_error)?;

    tracing::info!(file = %export.file_name, bytes = export.contents.len(), "text downloaded");
    // url はここでdropされ revoke される
    Ok(())
}
