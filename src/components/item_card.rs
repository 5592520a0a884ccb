//! Item Card Component

use leptos::prelude::*;

use crate::models::Item;

#[component]
pub fn ItemCard(item: Item) -> impl IntoView {
    let alt = item.name.clone();
    view! {
        <div class="item-card">
            <img class="item-image" src=item.image_path alt=alt loading="lazy" />
            <div class="item-card-body">
                <h3 class="item-name">{item.name}</h3>
                <span class="item-category">{item.category}</span>
            </div>
        </div>
    }
}
