//! Auth routes: email/password sign-in and sign-up, Google OAuth popup flow,
//! session cookie management.
//!
//! Every failure leaves as `{"error":{"kind","message"}}` with `kind` drawn
//! from the closed `AuthErrorKind` set the browser understands.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use client::net::types::{AuthError, AuthErrorKind, CredentialsPayload, ErrorEnvelope, Identity};
use client::util::password::check_password;
use serde::Deserialize;
use time::Duration;

use crate::services::google as google_svc;
use crate::services::identity::{IdentityBackend, IdentityError, normalize_email};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "afaa_session";
pub(crate) const OAUTH_STATE_COOKIE_NAME: &str = "afaa_oauth_state";

// =============================================================================
// ERROR RESPONSES
// =============================================================================

pub(crate) fn status_for(kind: AuthErrorKind) -> StatusCode {
    match kind {
        AuthErrorKind::UserNotFound | AuthErrorKind::WrongPassword | AuthErrorKind::InvalidCredential => {
            StatusCode::UNAUTHORIZED
        }
        AuthErrorKind::InvalidEmail | AuthErrorKind::WeakPassword | AuthErrorKind::PopupClosed => {
            StatusCode::BAD_REQUEST
        }
        AuthErrorKind::EmailInUse => StatusCode::CONFLICT,
        AuthErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        AuthErrorKind::Network | AuthErrorKind::Unknown => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(status: StatusCode, error: AuthError) -> Response {
    (status, Json(ErrorEnvelope { error })).into_response()
}

fn auth_error_response(error: AuthError) -> Response {
    error_response(status_for(error.kind), error)
}

fn identity_error_response(op: &'static str, err: &IdentityError) -> Response {
    match err {
        IdentityError::Rejected { .. } => tracing::info!(op, error = %err, "identity provider rejected request"),
        _ => tracing::error!(op, error = %err, "identity provider call failed"),
    }
    auth_error_response(err.to_auth_error())
}

fn not_configured() -> Response {
    auth_error_response(AuthError::new(AuthErrorKind::Unavailable, "identity provider not configured"))
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(token: String, state: &AppState) -> Cookie<'static> {
    let max_age = Duration::try_from(state.sessions.ttl()).unwrap_or(Duration::days(7));
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(max_age)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated identity extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub identity: Identity,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let unauthenticated =
            || error_response(StatusCode::UNAUTHORIZED, AuthError::new(AuthErrorKind::InvalidCredential, "not signed in"));

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(unauthenticated());
        }

        let app_state = AppState::from_ref(state);
        let identity = app_state
            .sessions
            .validate(token)
            .await
            .ok_or_else(unauthenticated)?;

        Ok(Self { identity })
    }
}

// =============================================================================
// EMAIL + PASSWORD
// =============================================================================

/// Resolve the backend and normalized email, or the response to send instead.
fn prepare(state: &AppState, email: &str) -> Result<(std::sync::Arc<dyn IdentityBackend>, String), Response> {
    let Some(backend) = state.identity.clone() else {
        return Err(not_configured());
    };
    let Some(email) = normalize_email(email) else {
        return Err(auth_error_response(AuthError::new(AuthErrorKind::InvalidEmail, "malformed email address")));
    };
    Ok((backend, email))
}

async fn start_session(state: &AppState, jar: CookieJar, identity: Identity, status: StatusCode) -> Response {
    let token = state.sessions.create(identity.clone()).await;
    let jar = jar.add(session_cookie(token, state));
    (status, jar, Json(identity)).into_response()
}

/// `POST /api/auth/sign-in`: verify credentials, start a session.
pub async fn sign_in(State(state): State<AppState>, jar: CookieJar, Json(body): Json<CredentialsPayload>) -> Response {
    let (backend, email) = match prepare(&state, &body.email) {
        Ok(ready) => ready,
        Err(response) => return response,
    };
    if body.password.is_empty() {
        return auth_error_response(AuthError::new(AuthErrorKind::InvalidCredential, "missing password"));
    }

    match backend.sign_in(&email, &body.password).await {
        Ok(identity) => {
            tracing::info!(uid = %identity.uid, "signed in");
            start_session(&state, jar, identity, StatusCode::OK).await
        }
        Err(e) => identity_error_response("sign-in", &e),
    }
}

/// `POST /api/auth/sign-up`: re-check the password policy, create the
/// account, start a session.
pub async fn sign_up(State(state): State<AppState>, jar: CookieJar, Json(body): Json<CredentialsPayload>) -> Response {
    let checks = check_password(&body.password);
    if !checks.is_accepted() {
        let unmet: Vec<&str> = checks.unmet().into_iter().map(|rule| rule.label()).collect();
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::new(AuthErrorKind::WeakPassword, format!("password policy not met: {}", unmet.join("; "))),
        );
    }
    let (backend, email) = match prepare(&state, &body.email) {
        Ok(ready) => ready,
        Err(response) => return response,
    };

    match backend.sign_up(&email, &body.password).await {
        Ok(identity) => {
            tracing::info!(uid = %identity.uid, "account created");
            start_session(&state, jar, identity, StatusCode::CREATED).await
        }
        Err(e) => identity_error_response("sign-up", &e),
    }
}

/// `GET /api/auth/me`: return the signed-in identity.
pub async fn me(auth: AuthUser) -> Json<Identity> {
    Json(auth.identity)
}

/// `POST /api/auth/sign-out`: delete the session (if any), clear the cookie.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|t| !t.is_empty()) {
        state.sessions.delete(token).await;
    }
    let jar = jar.add(expired_cookie(COOKIE_NAME, state.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

// =============================================================================
// GOOGLE OAUTH (POPUP)
// =============================================================================

/// Page rendered in the popup once the session cookie is set; the opener
/// notices the closed window and re-reads `/api/auth/me`.
const POPUP_DONE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Signed in</title></head>
<body>
<p>Signed in. You can close this window.</p>
<script>window.close();</script>
<noscript><a href="/Demo">Continue</a></noscript>
</body>
</html>"#;

/// `GET /auth/google`: redirect the popup to the Google consent page.
pub async fn google_redirect(State(state): State<AppState>) -> Response {
    let Some(config) = &state.google else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Google sign-in not configured").into_response();
    };

    let oauth_state = session::generate_token();
    let url = match config.authorize_url(&oauth_state) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "google authorize url build failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Google sign-in misconfigured").into_response();
        }
    };
    let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, oauth_state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(Duration::minutes(10));

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// `GET /auth/google/callback`: verify state, exchange the code, sign in to
/// the identity provider, set the session cookie, close the popup.
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(config) = &state.google else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Google sign-in not configured").into_response();
    };
    let Some(backend) = state.identity.clone() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "identity provider not configured").into_response();
    };

    if let Some(error) = params.error.as_deref() {
        tracing::info!(error, "google consent declined");
        return (StatusCode::BAD_REQUEST, "Google sign-in was cancelled").into_response();
    }

    // Verify OAuth CSRF state from cookie.
    let Some(callback_state) = params.state.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing oauth state").into_response();
    };
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        return (StatusCode::UNAUTHORIZED, "invalid oauth state").into_response();
    }
    let Some(code) = params.code.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing oauth code").into_response();
    };

    let id_token = match google_svc::exchange_code(config, code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "google code exchange failed");
            return (StatusCode::BAD_GATEWAY, "Google code exchange failed").into_response();
        }
    };

    let identity = match backend.sign_in_with_google(&id_token, &config.redirect_uri).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!(error = %e, "identity provider rejected google credential");
            return (StatusCode::BAD_GATEWAY, "Google sign-in failed").into_response();
        }
    };
    tracing::info!(uid = %identity.uid, "signed in with google");

    let token = state.sessions.create(identity).await;
    let jar = jar
        .add(session_cookie(token, &state))
        .add(expired_cookie(OAUTH_STATE_COOKIE_NAME, state.cookie_secure));
    (jar, Html(POPUP_DONE_PAGE)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
