//! # dunbud-ui
//!
//! WASM page controllers for the campaign pages: the helpful-links list
//! (AJAX add/delete) and the light/dark theme toggle.
//!
//! The controllers in [`controllers`] are plain handler functions over small
//! capability traits, so they build and test natively. With the `hydrate`
//! feature the [`browser`] adapters implement those traits over `web-sys` and
//! `gloo-net`, and [`hydrate`] attaches everything to the server-rendered page.

pub mod config;
pub mod controllers;
pub mod net;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod browser;

/// WASM entry point.
///
/// Applies the theme immediately, then binds both controllers once the
/// document is parsed.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }

    let config = config::UiConfig::load();
    browser::theme::apply_early(&config);
    browser::on_ready(|| {
        // Reload: the override block may sit below the loader script.
        let config = config::UiConfig::load();
        browser::theme::bind(&config);
        browser::links::bind(&config);
    });
}
