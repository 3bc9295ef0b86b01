//! 出力パネルコンポーネント（テキスト表示・コピー・ダウンロード）

use crate::app::SessionSignal;
use crate::browser;
use leptos::html::Textarea;
use leptos::prelude::*;

#[component]
pub fn OutputPanel(session: SessionSignal, export_file_name: String) -> impl IntoView {
    let textarea_ref = NodeRef::<Textarea>::new();
    let file_name = StoredValue::new(export_file_name);
    let affordances = move || session.with(|s| s.affordances());

    let on_copy = move |_| {
        if let Err(e) = session.with_untracked(|s| s.prepare_copy().map(|_| ())) {
            browser::report(&e);
            return;
        }
        if let Some(textarea) = textarea_ref.get_untracked() {
            if let Err(e) = browser::copy_from_textarea(&textarea) {
                tracing::warn!(error = %e, "copy request failed");
            }
        }
        // 書き込み結果は確認しない
        browser::alert(browser::COPIED_MESSAGE);
    };

    let on_download = move |_| {
        let export = file_name.with_value(|name| session.with_untracked(|s| s.prepare_download(name)));
        match export {
            Ok(export) => {
                if let Err(e) = browser::download_text(&export) {
                    tracing::error!(error = %e, "download failed");
                }
            }
            Err(e) => browser::report(&e),
        }
    };

    view! {
        <div class="output-section">
            <textarea
                id="output"
                rows="15"
                readonly=true
                placeholder="Extracted text will appear here..."
                node_ref=textarea_ref
                prop:value=move || session.with(|s| s.display_text().to_string())
            />
            <div class="output-actions">
                <button
                    id="copyBtn"
                    class="btn btn-secondary"
                    disabled=move || !affordances().copy_enabled
                    on:click=on_copy
                >
                    "Copy Text"
                </button>
                <button
                    id="downloadBtn"
                    class="btn btn-secondary"
                    disabled=move || !affordances().download_enabled
                    on:click=on_download
                >
                    "Download Text"
                </button>
            </div>
        </div>
    }
}
