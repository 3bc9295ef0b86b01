//! プログレスバーコンポーネント

use crate::app::SessionSignal;
use leptos::prelude::*;

#[component]
pub fn ProgressBar(session: SessionSignal) -> impl IntoView {
    let fraction = move || session.with(|s| s.progress().fraction);
    let affordances = move || session.with(|s| s.affordances());

    view! {
        <div
            class="progress-bar-container"
            style:display=move || if affordances().progress_visible { "block" } else { "none" }
        >
            <div
                id="progressBar"
                class="progress-bar"
                style=move || format!("width: {}%", fraction() * 100.0)
            />
        </div>
        <p
            id="statusMsg"
            class="status-msg"
            style:display=move || if affordances().status_visible { "block" } else { "none" }
        >
            {move || session.with(|s| s.progress().status.clone())}
        </p>
    }
}
