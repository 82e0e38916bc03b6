//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/`Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as an `AuthError` so callers can map it to a
//! message and keep the form usable.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AuthError, Identity};
#[cfg(any(test, feature = "hydrate"))]
use super::types::{AuthErrorKind, ErrorEnvelope};

pub const SIGN_IN_ENDPOINT: &str = "/api/auth/sign-in";
pub const SIGN_UP_ENDPOINT: &str = "/api/auth/sign-up";
pub const SIGN_OUT_ENDPOINT: &str = "/api/auth/sign-out";
pub const CURRENT_USER_ENDPOINT: &str = "/api/auth/me";
pub const GOOGLE_SIGN_IN_PATH: &str = "/auth/google";
pub const GOOGLE_CALLBACK_PATH: &str = "/auth/google/callback";

/// Decode a non-2xx response body into an `AuthError`.
///
/// Falls back to `Unknown` carrying the status when the body is not the
/// server's error envelope (e.g. a proxy error page).
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn error_from_response(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error,
        Err(_) if status == 503 => AuthError::new(AuthErrorKind::Unavailable, "sign-in is temporarily unavailable"),
        Err(_) => AuthError::new(AuthErrorKind::Unknown, format!("request failed: {status}")),
    }
}

/// POST email + password to `endpoint` and decode the resulting identity.
///
/// # Errors
///
/// Returns the server's `AuthError`, or a `Network` error when the request
/// or response decoding fails.
pub async fn post_credentials(endpoint: &str, email: &str, password: &str) -> Result<Identity, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = super::types::CredentialsPayload { email: email.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post(endpoint)
            .json(&payload)
            .map_err(AuthError::network)?
            .send()
            .await
            .map_err(AuthError::network)?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }
        resp.json::<Identity>().await.map_err(AuthError::network)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (endpoint, email, password);
        Err(AuthError::unavailable())
    }
}

/// Fetch the currently authenticated identity from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_identity() -> Option<Identity> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CURRENT_USER_ENDPOINT)
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Identity>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// End the server session via `POST /api/auth/sign-out`.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects it.
pub async fn sign_out() -> Result<(), AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(SIGN_OUT_ENDPOINT)
            .send()
            .await
            .map_err(AuthError::network)?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(AuthError::unavailable())
    }
}
