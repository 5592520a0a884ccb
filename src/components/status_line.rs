//! Status Line Component
//!
//! Loading / finished / error indicator with a manual retry.

use leptos::prelude::*;

use crate::context::GalleryContext;
use crate::loader::LoadPhase;

#[component]
pub fn StatusLine() -> impl IntoView {
    let ctx = use_context::<GalleryContext>().expect("GalleryContext should be provided");

    let phase = Memo::new(move |_| ctx.loader.with(|state| state.phase().clone()));
    let counts = move || ctx.loader.with(|state| (state.items().len(), state.total()));

    view! {
        <div class="status-line">
            {move || match phase.get() {
                LoadPhase::Loading => view! { <span class="status-loading">"Loading…"</span> }.into_any(),
                LoadPhase::Finished if counts().0 == 0 => {
                    view! { <span class="status-empty">"No items match"</span> }.into_any()
                }
                LoadPhase::Finished => view! { <span class="status-done">"All items loaded"</span> }.into_any(),
                LoadPhase::Error(message) => view! {
                    <span class="status-error">
                        {message}
                        <button class="retry-btn" on:click=move |_| ctx.load_more()>"Retry"</button>
                    </span>
                }.into_any(),
                LoadPhase::Idle | LoadPhase::Loaded => ().into_any(),
            }}
            <span class="status-count">
                {move || {
                    let (loaded, total) = counts();
                    format!("{} of {}", loaded, total)
                }}
            </span>
        </div>
    }
}
