mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::services::identity::{IdentityBackend, IdentityToolkitClient};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() {
    // A missing .env is normal in production.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let gateway = config::GatewayConfig::from_env().expect("invalid gateway configuration");

    // Initialize identity backend (non-fatal: auth endpoints answer 503 if config missing).
    let identity: Option<Arc<dyn IdentityBackend>> =
        match config::IdentityConfig::from_env().map(|c| IdentityToolkitClient::new(&c)) {
            Ok(Ok(client)) => {
                tracing::info!("identity provider initialized");
                Some(Arc::new(client))
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "identity client build failed; sign-in disabled");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity provider not configured; sign-in disabled");
                None
            }
        };

    let google = services::google::GoogleConfig::from_env();
    if google.is_none() {
        tracing::warn!("GOOGLE_* not set; federated sign-in disabled");
    }

    let sessions = services::session::SessionStore::new(gateway.session_ttl);
    let _purge = services::session::spawn_purge_task(sessions.clone(), SESSION_PURGE_INTERVAL);

    let state = state::AppState::new(identity, google, sessions, gateway.cookie_secure);

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let port = gateway.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "afaa listening");
    axum::serve(listener, app).await.expect("server failed");
}
