//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON auth API and the Google OAuth popup endpoints,
//! and stitches them with Leptos SSR rendering under a single Axum router.

pub mod auth;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use client::net::api;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Auth API, OAuth popup endpoints, and the health check.
pub(crate) fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(api::GOOGLE_SIGN_IN_PATH, get(auth::google_redirect))
        .route(api::GOOGLE_CALLBACK_PATH, get(auth::google_callback))
        .route(api::CURRENT_USER_ENDPOINT, get(auth::me))
        .route(api::SIGN_IN_ENDPOINT, post(auth::sign_in))
        .route(api::SIGN_UP_ENDPOINT, post(auth::sign_up))
        .route(api::SIGN_OUT_ENDPOINT, post(auth::sign_out))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Leptos SSR frontend: API routes + Leptos SSR pages + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(client::app::shell))
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
