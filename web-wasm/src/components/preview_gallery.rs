//! プレビューギャラリーコンポーネント
//!
//! サムネイル一覧と、ホバーで開く拡大モーダル。

use crate::app::SessionSignal;
use batch_ocr_common::ZoomOverlay;
use gloo::timers::callback::Timeout;
use leptos::ev;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen_futures::spawn_local;

/// 未読み込みのサムネイルを読み込む
///
/// 読み込みはファイルごとに独立して走り、完了順に差し込まれる。
pub fn load_thumbnails(session: SessionSignal) {
    let jobs = session.with_untracked(|s| s.thumbnail_jobs());
    for job in jobs {
        spawn_local(async move {
            let file = gloo::file::File::from(job.handle);
            match gloo::file::futures::read_as_data_url(&file).await {
                Ok(data_url) => {
                    session.update(|s| {
                        s.insert_thumbnail(job.epoch, job.index, data_url);
                    });
                }
                Err(e) => tracing::warn!(index = job.index, error = %e, "thumbnail not loaded"),
            }
        });
    }
}

#[component]
pub fn PreviewGallery(session: SessionSignal, hover_delay_ms: u32) -> impl IntoView {
    let zoom = RwSignal::new(ZoomOverlay::new());
    // ホバー中の遅延タイマー。dropでキャンセルされる。
    let timer: StoredValue<Option<(usize, Timeout)>, LocalStorage> = StoredValue::new_local(None);

    let affordances = move || session.with(|s| s.affordances());
    let thumbnails = move || {
        session.with(|s| {
            let epoch = s.thumbnails().epoch();
            s.thumbnails()
                .iter()
                .map(|(index, url)| (epoch, index, url.to_string()))
                .collect::<Vec<_>>()
        })
    };
    let open_url = move || {
        zoom.with(|z| z.open_index())
            .and_then(|index| session.with(|s| s.thumbnails().get(index).map(str::to_string)))
            .unwrap_or_default()
    };

    let close = move || {
        zoom.update(|z| z.close());
    };

    let on_toggle = move |_| {
        session.update(|s| {
            s.toggle_preview();
        });
        zoom.update(|z| z.reset());
        timer.set_value(None);
        load_thumbnails(session);
    };

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && zoom.with_untracked(|z| z.is_open()) {
            close();
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <div class="preview-section">
            <button id="togglePreview" class="btn btn-tertiary" on:click=on_toggle>
                {move || affordances().preview_toggle_label}
            </button>

            <div
                id="previewContainer"
                class="preview-container"
                style:display=move || if affordances().previews_visible { "flex" } else { "none" }
            >
                <For
                    each=thumbnails
                    // 選択し直すと同じインデックスでも別画像になるので世代込みで識別
                    key=|(epoch, index, _)| (*epoch, *index)
                    children=move |(_, index, url)| {
                        view! {
                            <img
                                class="thumb"
                                src=url
                                on:mouseenter=move |_| {
                                    if let Some(ticket) = zoom.try_update(|z| z.pointer_enter(index)) {
                                        let pending = Timeout::new(hover_delay_ms, move || {
                                            zoom.update(|z| {
                                                z.timer_fired(ticket);
                                            });
                                        });
                                        timer.set_value(Some((index, pending)));
                                    }
                                }
                                on:mouseleave=move |_| {
                                    zoom.update(|z| z.pointer_leave(index));
                                    timer.update_value(|t| {
                                        if matches!(t, Some((i, _)) if *i == index) {
                                            *t = None;
                                        }
                                    });
                                }
                            />
                        }
                    }
                />
            </div>

            <Show when=move || zoom.with(|z| z.is_open())>
                <div
                    id="imageModal"
                    class="modal"
                    on:click=move |ev| {
                        // 背景クリックのみ（画像自体のクリックは無視）
                        if ev.target() == ev.current_target() {
                            close();
                        }
                    }
                >
                    <span class="close" on:click=move |_| close()>"×"</span>
                    <img id="modalImage" class="modal-content" src=open_url />
                </div>
            </Show>
        </div>
    }
}
