//! Leptos Scroll Trigger
//!
//! Near-end detection for infinite lists using `IntersectionObserver`.
//! A trigger owns at most one observer; observing a new sentinel
//! disconnects the previous observer first.
//!
//! The signal is advisory. It does no deduplication or rate limiting, so
//! the callback must guard against redundant work itself.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// How far past the visible edge the sentinel counts as "near"
pub const DEFAULT_ROOT_MARGIN: &str = "200px";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

#[derive(Default)]
struct Active {
    observer: Option<IntersectionObserver>,
    // Must outlive the observer that calls it
    callback: Option<ObserverCallback>,
}

/// One observer per current sentinel
pub struct ScrollTrigger {
    root_margin: String,
    on_near_end: Rc<dyn Fn()>,
    active: RefCell<Active>,
}

impl ScrollTrigger {
    pub fn new(root_margin: &str, on_near_end: impl Fn() + 'static) -> Self {
        Self {
            root_margin: root_margin.to_string(),
            on_near_end: Rc::new(on_near_end),
            active: RefCell::new(Active::default()),
        }
    }

    /// Start watching `target`, tearing down any previous observer first
    pub fn observe(&self, target: &Element) {
        self.disconnect();

        let on_near_end = Rc::clone(&self.on_near_end);
        let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let near = entries
                .iter()
                .any(|entry| entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting());
            if near {
                on_near_end();
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&self.root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                observer.observe(target);
                let mut active = self.active.borrow_mut();
                active.observer = Some(observer);
                active.callback = Some(callback);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[ScrollTrigger] Failed to create observer: {:?}", e).into());
            }
        }
    }

    /// Stop observing; safe to call repeatedly
    pub fn disconnect(&self) {
        let mut active = self.active.borrow_mut();
        if let Some(observer) = active.observer.take() {
            observer.disconnect();
        }
        active.callback = None;
    }
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Watch `sentinel` and call `on_near_end` when it nears the viewport.
///
/// `tail` is tracked: whenever it changes, the sentinel is re-observed with
/// a fresh observer, which reports the current intersection immediately.
/// The observer is disconnected when the owning component unmounts.
pub fn use_scroll_trigger<T: 'static>(
    sentinel: NodeRef<leptos::html::Div>,
    tail: impl Fn() -> T + 'static,
    on_near_end: impl Fn() + 'static,
) {
    let trigger = StoredValue::new_local(ScrollTrigger::new(DEFAULT_ROOT_MARGIN, on_near_end));

    Effect::new(move |_| {
        let _ = tail();
        if let Some(el) = sentinel.get() {
            if let Some(element) = el.dyn_ref::<Element>() {
                trigger.with_value(|t| t.observe(element));
            }
        }
    });

    on_cleanup(move || {
        trigger.try_with_value(|t| t.disconnect());
    });
}
