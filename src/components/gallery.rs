//! Gallery Component
//!
//! Filter bar, item grid and the sentinel that pulls in further pages.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_scroll_trigger::use_scroll_trigger;

use crate::components::{FilterBar, ItemCard, StatusLine};
use crate::context::GalleryContext;

#[component]
pub fn Gallery() -> impl IntoView {
    let ctx = GalleryContext::new();
    provide_context(ctx);

    // Initial load, then a fresh start on every filter change
    Effect::new(move |_| {
        let filters = ctx.filters.get();
        ctx.reset(filters);
    });

    on_cleanup(move || ctx.retire());

    // Only re-observe when the tail actually moves
    let tail = Memo::new(move |_| ctx.loader.with(|state| state.tail()));
    let sentinel = NodeRef::<Div>::new();
    use_scroll_trigger(sentinel, move || tail.get(), move || ctx.load_more());

    view! {
        <section class="gallery">
            <h1>"Gallery"</h1>
            <FilterBar />
            <div class="item-grid">
                <For
                    each=move || ctx.loader.with(|state| state.items().to_vec())
                    key=|item| item.sequence
                    children=move |item| view! { <ItemCard item=item /> }
                />
            </div>
            <div class="scroll-sentinel" node_ref=sentinel></div>
            <StatusLine />
        </section>
    }
}
