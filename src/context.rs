//! Gallery Context
//!
//! Loader state shared by the gallery and its filter bar / status line.
//! Created by the `Gallery` component, so it is disposed with it.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::loader::{LoaderState, Merge, Ticket};
use crate::models::Filters;

/// Artificial delay before each page request, in milliseconds
fn load_delay() -> Duration {
    let ms = option_env!("GALLERY_LOAD_DELAY_MS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    Duration::from_millis(ms)
}

#[derive(Clone, Copy)]
pub struct GalleryContext {
    pub loader: RwSignal<LoaderState>,
    pub filters: RwSignal<Filters>,
}

impl GalleryContext {
    pub fn new() -> Self {
        Self {
            loader: RwSignal::new(LoaderState::default()),
            filters: RwSignal::new(Filters::default()),
        }
    }

    /// Start over from the first page with `filters`
    pub fn reset(&self, filters: Filters) {
        web_sys::console::log_1(&format!("[Loader] Reset with {:?}", filters).into());
        if let Some(ticket) = self.loader.try_update(|state| state.reset(filters)) {
            self.run(ticket);
        }
    }

    /// Ask for the next page; ignored while loading or once finished
    pub fn load_more(&self) {
        let ticket = self
            .loader
            .try_maybe_update(|state| {
                let ticket = state.request_next_page();
                (ticket.is_some(), ticket)
            })
            .flatten();
        if let Some(ticket) = ticket {
            self.run(ticket);
        }
    }

    /// Drop whatever is in flight, e.g. when the gallery unmounts
    pub fn retire(&self) {
        self.loader.try_update(|state| state.retire());
    }

    fn run(&self, ticket: Ticket) {
        let loader = self.loader;
        spawn_local(async move {
            let delay = load_delay();
            if !delay.is_zero() {
                gloo_timers::future::sleep(delay).await;
            }

            let request = &ticket.request;
            web_sys::console::log_1(&format!("[Api] GET items skip={} limit={}", request.skip, request.limit).into());
            let result = commands::fetch_items(request).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("[Loader] Page request failed: {}", e).into());
            }

            // None once the owning component is gone
            let merge = loader.try_maybe_update(|state| {
                let merge = state.complete(&ticket, result);
                (merge != Merge::Stale, merge)
            });
            match merge {
                Some(Merge::Stale) => {
                    web_sys::console::log_1(&"[Loader] Dropped stale response".into());
                }
                Some(Merge::Finished { .. }) => {
                    web_sys::console::log_1(&"[Loader] All items loaded".into());
                }
                _ => {}
            }
        });
    }
}
