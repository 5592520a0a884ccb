//! Nav Bar Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields, View};

#[component]
pub fn NavBar() -> impl IntoView {
    let store = use_app_store();

    let nav_button = move |target: View, label: &'static str| {
        let class = move || {
            if store.view().get() == target {
                "nav-btn active"
            } else {
                "nav-btn"
            }
        };
        view! {
            <button class=class on:click=move |_| store.view().set(target)>{label}</button>
        }
    };

    view! {
        <nav class="nav-bar">
            {nav_button(View::Home, "Home")}
            {move || match store.account().get() {
                Some(account) => view! {
                    <span class="nav-user">
                        {account.name}
                        <button class="nav-btn" on:click=move |_| store.account().set(None)>"Log out"</button>
                    </span>
                }.into_any(),
                None => view! {
                    <span class="nav-auth">
                        {nav_button(View::Login, "Login")}
                        {nav_button(View::Signup, "Sign up")}
                    </span>
                }.into_any(),
            }}
        </nav>
    }
}
