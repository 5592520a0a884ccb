//! Gallery Frontend App
//!
//! Nav bar over a single main view chosen from the store.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{Gallery, LoginForm, NavBar, SignupForm};
use crate::store::{AppState, AppStateStoreFields, View};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    // Categories for the filter select
    spawn_local(async move {
        match commands::fetch_categories().await {
            Ok(categories) => {
                web_sys::console::log_1(&format!("[Gallery] Loaded {} categories", categories.len()).into());
                store.categories().set(categories);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[Gallery] Failed to load categories: {}", e).into());
            }
        }
    });

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                {move || match store.view().get() {
                    View::Home => view! { <Gallery /> }.into_any(),
                    View::Login => view! { <LoginForm /> }.into_any(),
                    View::Signup => view! { <SignupForm /> }.into_any(),
                }}
            </main>
        </div>
    }
}
