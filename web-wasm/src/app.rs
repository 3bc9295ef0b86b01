//! メインアプリケーションコンポーネント

use crate::browser;
use crate::components::{
    header::Header,
    language_select::LanguageSelect,
    output_panel::OutputPanel,
    preview_gallery::PreviewGallery,
    progress_bar::ProgressBar,
    upload_area::UploadArea,
};
use crate::engine::TesseractFactory;
use crate::settings;
use batch_ocr_common::{run_recognition, LanguageCode, RunObserver, Session};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

/// アプリケーションの状態（ファイル列・プレビュー・出力・実行状態）
///
/// `web_sys::File` を持つのでスレッドローカルなシグナルに置く。
pub type SessionSignal = RwSignal<Session<File>, LocalStorage>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = settings::load();

    let session: SessionSignal = RwSignal::new_local(Session::new());
    let (language, set_language) = signal(config.default_language_code());

    let affordances = move || session.with(|s| s.affordances());

    // 抽出開始ハンドラ
    let on_start = move |_| {
        start_recognition(session, language.get_untracked());
    };

    view! {
        <div class="container">
            <Header storage_key=config.theme_storage_key.clone() />

            <UploadArea session=session />

            <PreviewGallery session=session hover_delay_ms=config.hover_delay_ms />

            <div class="controls">
                <LanguageSelect
                    languages=config.languages.clone()
                    language=language
                    set_language=set_language
                    disabled=Signal::derive(move || session.with(|s| s.run_state().is_running()))
                />
                <button
                    id="startBtn"
                    class="btn btn-primary"
                    disabled=move || !affordances().start_enabled
                    on:click=on_start
                >
                    {move || affordances().start_label}
                </button>
            </div>

            <ProgressBar session=session />

            <OutputPanel session=session export_file_name=config.export_file_name.clone() />
        </div>
    }
}

/// 認識を開始する
///
/// ファイルが無い・実行中ならアラートを出すだけでエンジンは作らない。
fn start_recognition(session: SessionSignal, language: LanguageCode) {
    let files = match session.try_update(|s| s.begin_run()) {
        Some(Ok(files)) => files,
        Some(Err(e)) => {
            browser::report(&e);
            return;
        }
        None => return,
    };

    let observer: RunObserver = Rc::new(move |event| {
        session.update(move |s| s.apply(event));
    });

    spawn_local(async move {
        if let Err(e) = run_recognition(&TesseractFactory, &files, &language, observer).await {
            tracing::error!(error = %e, "extraction aborted");
        }
    });
}
