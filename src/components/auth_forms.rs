//! Login / Signup Forms
//!
//! On success the account is stored and the user is sent back home.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, LoginArgs, SignupArgs};
use crate::models::Account;
use crate::store::{use_app_store, AppStateStoreFields, AppStore, View};

fn signed_in(store: AppStore, account: Account) {
    web_sys::console::log_1(&format!("[Auth] Signed in as {}", account.email).into());
    store.account().set(Some(account));
    store.view().set(View::Home);
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let store = use_app_store();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (pending, set_pending) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        if email.trim().is_empty() || password.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }

        set_pending.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = commands::login(&LoginArgs {
                email: &email,
                password: &password,
            }).await;
            set_pending.set(false);
            match result {
                Ok(account) => signed_in(store, account),
                Err(e) => {
                    web_sys::console::error_1(&format!("[Auth] Login failed: {}", e).into());
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h2>"Log in"</h2>
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>"Log in"</button>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
            <p class="form-switch">
                "No account? "
                <a
                    href="#"
                    on:click=move |ev| {
                        ev.prevent_default();
                        store.view().set(View::Signup);
                    }
                >
                    "Sign up"
                </a>
            </p>
        </form>
    }
}

#[component]
pub fn SignupForm() -> impl IntoView {
    let store = use_app_store();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (pending, set_pending) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let name = name.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            set_error.set(Some("All fields are required".to_string()));
            return;
        }

        set_pending.set(true);
        set_error.set(None);
        spawn_local(async move {
            let args = SignupArgs {
                name: &name,
                email: &email,
                password: &password,
            };
            let result = commands::signup(&args).await;
            set_pending.set(false);
            match result {
                Ok(account) => signed_in(store, account),
                Err(e) => {
                    web_sys::console::error_1(&format!("[Auth] Signup failed: {}", e).into());
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h2>"Sign up"</h2>
            <input
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>"Create account"</button>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
            <p class="form-switch">
                "Already registered? "
                <a
                    href="#"
                    on:click=move |ev| {
                        ev.prevent_default();
                        store.view().set(View::Login);
                    }
                >
                    "Log in"
                </a>
            </p>
        </form>
    }
}
