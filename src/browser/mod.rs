//! `web-sys` adapters binding the controllers to the live page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only compiled with `hydrate`. Each submodule implements a controller's
//! capability trait over the real DOM and registers the page's event
//! listeners. Listener closures live as long as the page, so they are leaked
//! with `Closure::forget`. Request handling runs on the `wasm-bindgen-futures`
//! microtask queue; no Leptos runtime is mounted on these pages.

pub mod links;
pub mod theme;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Run `f` once the document has been parsed.
pub fn on_ready<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let cb = Closure::once_into_js(f);
    if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref()) {
        leptos::logging::error!("failed to wait for DOMContentLoaded: {e:?}");
    }
}

/// Add or remove `class` on `element`.
pub(crate) fn set_class(element: &web_sys::Element, class: &str, present: bool) {
    let classes = element.class_list();
    let result = if present {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        log::debug!("class update `{class}` failed: {e:?}");
    }
}

/// Register `handler` for `event` on `target` for the page's lifetime.
pub(crate) fn listen<H>(target: &web_sys::EventTarget, event: &str, handler: H)
where
    H: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    match target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        Ok(()) => cb.forget(),
        Err(e) => leptos::logging::error!("failed to bind `{event}` listener: {e:?}"),
    }
}
