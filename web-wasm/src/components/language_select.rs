//! 言語セレクタ

use batch_ocr_common::{LanguageCode, LanguageOption};
use leptos::prelude::*;

#[component]
pub fn LanguageSelect(
    languages: Vec<LanguageOption>,
    language: ReadSignal<LanguageCode>,
    set_language: WriteSignal<LanguageCode>,
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for="languageSelect">"Language"</label>
            <select
                id="languageSelect"
                disabled=move || disabled.get()
                on:change=move |ev| {
                    set_language.set(LanguageCode::new(event_target_value(&ev)));
                }
            >
                {languages
                    .into_iter()
                    .map(|option| {
                        let code = option.code.clone();
                        view! {
                            <option
                                value=option.code
                                selected=move || language.with(|l| l.as_str() == code)
                            >
                                {option.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
