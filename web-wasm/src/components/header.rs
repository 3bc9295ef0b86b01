//! ヘッダーコンポーネント（テーマ切り替え付き）

use crate::storage::LocalStore;
use batch_ocr_common::{ThemePreference, ThemeState};
use leptos::prelude::*;

const LIGHT_MODE_CLASS: &str = "light-mode";

#[component]
pub fn Header(storage_key: String) -> impl IntoView {
    let initial = ThemeState::load(&LocalStore, &storage_key);
    apply_theme(initial.preference());
    let (theme, set_theme) = signal(initial);

    let on_toggle = move |_| {
        let mut next = theme.get_untracked();
        if let Err(e) = next.toggle(&LocalStore) {
            tracing::warn!(error = %e, "theme preference not saved");
        }
        apply_theme(next.preference());
        set_theme.set(next);
    };

    view! {
        <header class="header">
            <h1>"Image to Text (OCR)"</h1>
            <button
                id="theme-toggle-btn"
                class="theme-toggle"
                title="Toggle theme"
                on:click=on_toggle
            >
                {move || theme.with(|t| t.preference().glyph())}
            </button>
        </header>
    }
}

/// body の `light-mode` クラスを付け外しする
fn apply_theme(preference: ThemePreference) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let classes = body.class_list();
    let result = if preference.is_light() {
        classes.add_1(LIGHT_MODE_CLASS)
    } else {
        classes.remove_1(LIGHT_MODE_CLASS)
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, "theme class not applied");
    }
}
