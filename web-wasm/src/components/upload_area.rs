//! アップロードエリアコンポーネント
//!
//! 個別画像/フォルダのモード切り替え、ファイル選択ボタン、ドロップゾーン。

use crate::app::SessionSignal;
use crate::components::preview_gallery::load_thumbnails;
use batch_ocr_common::{ImageFile, UploadMode};
use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList};

#[component]
pub fn UploadArea(session: SessionSignal) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();
    let affordances = move || session.with(|s| s.affordances());
    let running = move || session.with(|s| s.run_state().is_running());

    let handle_files = move |files: FileList| {
        let candidates = collect_files(&files);
        match session.try_update(|s| s.select_files(candidates)) {
            Some(Ok(count)) => {
                tracing::debug!(count, "selection applied");
                load_thumbnails(session);
            }
            Some(Err(e)) => tracing::warn!(error = %e, "selection ignored"),
            None => {}
        }
    };

    let on_mode_change = move |mode: UploadMode| {
        // セッション側で受理されたときだけピッカーを切り替える
        match session.try_update(|s| s.set_upload_mode(mode)) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                tracing::warn!(error = %e, "upload mode not changed");
                return;
            }
            None => return,
        }
        if let Some(input) = input_ref.get_untracked() {
            let result = if mode.accepts_directory() {
                input.set_attribute("webkitdirectory", "")
            } else {
                input.remove_attribute("webkitdirectory")
            };
            if let Err(e) = result {
                tracing::warn!(error = ?e, "picker mode not applied");
            }
            input.set_multiple(mode.allows_multiple());
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(false);

        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(false);
    };

    view! {
        <div class="upload-section">
            <div class="upload-mode">
                <label>
                    <input
                        type="radio"
                        id="uploadImagesRadio"
                        name="uploadMode"
                        prop:checked=move || session.with(|s| s.mode() == UploadMode::Images)
                        disabled=running
                        on:change=move |_| on_mode_change(UploadMode::Images)
                    />
                    "Upload Images"
                </label>
                <label>
                    <input
                        type="radio"
                        id="uploadFolderRadio"
                        name="uploadMode"
                        prop:checked=move || session.with(|s| s.mode() == UploadMode::Folder)
                        disabled=running
                        on:change=move |_| on_mode_change(UploadMode::Folder)
                    />
                    "Upload Folder"
                </label>
            </div>

            <input
                type="file"
                id="imageInput"
                accept="image/*"
                multiple=true
                style="display: none"
                node_ref=input_ref
                on:change=move |_| {
                    if let Some(files) = input_ref.get_untracked().and_then(|i| i.files()) {
                        handle_files(files);
                    }
                }
            />
            <button
                id="selectImagesBtn"
                class="btn btn-secondary"
                on:click=move |_| {
                    if let Some(input) = input_ref.get_untracked() {
                        input.click();
                    }
                }
            >
                {move || affordances().picker_label}
            </button>

            <div
                id="dropZone"
                class=move || {
                    if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                }
                style:display=move || if affordances().drop_zone_visible { "block" } else { "none" }
                on:dragenter=on_dragover
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
            >
                <div class="upload-icon">"🖼️"</div>
                <p>"Drag & drop images here"</p>
                <p class="text-muted">"Non-image files are ignored"</p>
            </div>
        </div>
    }
}

/// FileList → 取り込み候補（この時点では画像かどうか問わない）
fn collect_files(files: &FileList) -> Vec<ImageFile<File>> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|file| ImageFile::new(file.name(), file.type_(), file))
        .collect()
}
