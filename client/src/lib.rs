//! # client
//!
//! Leptos + WASM frontend for the A Fleet Among Angels landing site.
//!
//! Holds the static pages, the sign-in and sign-up forms, the password policy
//! (shared with the server), and the session-gated views. The browser build
//! talks to the server's `/api/auth/*` endpoints through
//! `net::identity::HttpIdentityProvider`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
