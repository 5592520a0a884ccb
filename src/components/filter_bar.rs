//! Filter Bar Component
//!
//! Search box plus category and sort selects. Every edit replaces the
//! gallery's filters, which restarts loading from the first page.

use leptos::prelude::*;

use crate::context::GalleryContext;
use crate::models::{SortOrder, ALL_CATEGORIES};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_context::<GalleryContext>().expect("GalleryContext should be provided");
    let store = use_app_store();

    view! {
        <div class="filter-bar">
            <input
                type="search"
                class="filter-search"
                placeholder="Search items..."
                prop:value=move || ctx.filters.with(|f| f.search.clone())
                on:input=move |ev| {
                    let search = event_target_value(&ev);
                    ctx.filters.update(|f| f.search = search);
                }
            />

            <select
                class="filter-category"
                on:change=move |ev| {
                    let category = event_target_value(&ev);
                    ctx.filters.update(|f| f.category = category);
                }
            >
                <option value=ALL_CATEGORIES>"All categories"</option>
                <For
                    each=move || store.categories().get()
                    key=|category| category.clone()
                    children=move |category| {
                        let value = category.clone();
                        let current = category.clone();
                        let is_selected = move || ctx.filters.with(|f| f.category == current);
                        view! {
                            <option value=value selected=is_selected>{category}</option>
                        }
                    }
                />
            </select>

            <select
                class="filter-sort"
                on:change=move |ev| {
                    let sort = SortOrder::from_param(&event_target_value(&ev));
                    ctx.filters.update(|f| f.sort = sort);
                }
            >
                {SortOrder::ALL.into_iter().map(|sort| {
                    let is_selected = move || ctx.filters.with(|f| f.sort == sort);
                    view! {
                        <option value=sort.as_param() selected=is_selected>{sort.label()}</option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
