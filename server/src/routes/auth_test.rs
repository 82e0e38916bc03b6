use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use client::net::api;
use client::net::types::ErrorEnvelope;
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::services::google::GoogleConfig;
use crate::state::test_helpers::{FakeIdentity, test_app_state, test_app_state_with_identity};

const EMAIL: &str = "pilot@fleet.test";
const PASSWORD: &str = "Abcdefg!";

fn json_request(uri: &str, email: &str, password: &str) -> Request<Body> {
    let body = serde_json::json!({ "email": email, "password": password });
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` of the first `Set-Cookie` header for `name`.
fn set_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{name}=")))
        .map(|v| v.split(';').next().unwrap_or_default().to_owned())
}

fn app_with_account() -> Router {
    api_routes(test_app_state_with_identity(Arc::new(FakeIdentity::with_account(EMAIL, PASSWORD))))
}

// =============================================================================
// status mapping
// =============================================================================

#[test]
fn credential_errors_are_unauthorized() {
    for kind in [AuthErrorKind::UserNotFound, AuthErrorKind::WrongPassword, AuthErrorKind::InvalidCredential] {
        assert_eq!(status_for(kind), StatusCode::UNAUTHORIZED);
    }
}

#[test]
fn upstream_failures_are_bad_gateway() {
    assert_eq!(status_for(AuthErrorKind::Network), StatusCode::BAD_GATEWAY);
    assert_eq!(status_for(AuthErrorKind::Unknown), StatusCode::BAD_GATEWAY);
    assert_eq!(status_for(AuthErrorKind::EmailInUse), StatusCode::CONFLICT);
    assert_eq!(status_for(AuthErrorKind::Unavailable), StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// sign-in
// =============================================================================

#[tokio::test]
async fn sign_in_sets_cookie_and_me_returns_identity() {
    let app = app_with_account();

    let response = app.clone().oneshot(json_request(api::SIGN_IN_ENDPOINT, EMAIL, PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response, COOKIE_NAME).expect("session cookie");
    let identity: Identity = body_json(response).await;
    assert_eq!(identity.email.as_deref(), Some(EMAIL));

    let me = app.oneshot(get_with_cookie(api::CURRENT_USER_ENDPOINT, Some(&cookie))).await.unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let current: Identity = body_json(me).await;
    assert_eq!(current, identity);
}

#[tokio::test]
async fn sign_in_normalizes_email() {
    let response = app_with_account()
        .oneshot(json_request(api::SIGN_IN_ENDPOINT, "  Pilot@Fleet.TEST ", PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn sign_in_wrong_password_is_401_without_cookie() {
    let response = app_with_account().oneshot(json_request(api::SIGN_IN_ENDPOINT, EMAIL, "nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response, COOKIE_NAME).is_none());
    let envelope: ErrorEnvelope = body_json(response).await;
    assert_eq!(envelope.error.kind, AuthErrorKind::WrongPassword);
}

#[tokio::test]
async fn sign_in_unknown_user_is_classified() {
    let response = app_with_account()
        .oneshot(json_request(api::SIGN_IN_ENDPOINT, "ghost@fleet.test", PASSWORD))
        .await
        .unwrap();
    let envelope: ErrorEnvelope = body_json(response).await;
    assert_eq!(envelope.error.kind, AuthErrorKind::UserNotFound);
}

#[tokio::test]
async fn sign_in_malformed_email_is_400() {
    let response = app_with_account().oneshot(json_request(api::SIGN_IN_ENDPOINT, "pilot", PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ErrorEnvelope = body_json(response).await;
    assert_eq!(envelope.error.kind, AuthErrorKind::InvalidEmail);
}

#[tokio::test]
async fn sign_in_without_backend_is_503() {
    let response = api_routes(test_app_state())
        .oneshot(json_request(api::SIGN_IN_ENDPOINT, EMAIL, PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let envelope: ErrorEnvelope = body_json(response).await;
    assert_eq!(envelope.error.kind, AuthErrorKind::Unavailable);
}

// =============================================================================
// sign-up
// =============================================================================

#[tokio::test]
async fn sign_up_rejects_policy_failure_before_backend() {
    let fake = Arc::new(FakeIdentity::default());
    let app = api_routes(test_app_state_with_identity(fake.clone()));

    let response = app.oneshot(json_request(api::SIGN_UP_ENDPOINT, EMAIL, "abcdefgh!")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let envelope: ErrorEnvelope = body_json(response).await;
    assert_eq!(envelope.error.kind, AuthErrorKind::WeakPassword);
    assert!(envelope.error.message.contains("uppercase"));
    assert_eq!(*fake.sign_up_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn sign_up_creates_account_and_session() {
    let fake = Arc::new(FakeIdentity::default());
    let response = api_routes(test_app_state_with_identity(fake.clone()))
        .oneshot(json_request(api::SIGN_UP_ENDPOINT, EMAIL, PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(set_cookie(&response, COOKIE_NAME).is_some());
    assert_eq!(*fake.sign_up_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn sign_up_existing_email_is_409() {
    let response = app_with_account().oneshot(json_request(api::SIGN_UP_ENDPOINT, EMAIL, PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let envelope: ErrorEnvelope = body_json(response).await;
    assert_eq!(envelope.error.kind, AuthErrorKind::EmailInUse);
}

// =============================================================================
// me / sign-out
// =============================================================================

#[tokio::test]
async fn me_without_cookie_is_401() {
    let response = app_with_account().oneshot(get_with_cookie(api::CURRENT_USER_ENDPOINT, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_unknown_token_is_401() {
    let cookie = format!("{COOKIE_NAME}=deadbeef");
    let response = app_with_account()
        .oneshot(get_with_cookie(api::CURRENT_USER_ENDPOINT, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_out_revokes_session_and_clears_cookie() {
    let app = app_with_account();
    let response = app.clone().oneshot(json_request(api::SIGN_IN_ENDPOINT, EMAIL, PASSWORD)).await.unwrap();
    let cookie = set_cookie(&response, COOKIE_NAME).unwrap();

    let sign_out = Request::builder()
        .method(Method::POST)
        .uri(api::SIGN_OUT_ENDPOINT)
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(sign_out).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(set_cookie(&response, COOKIE_NAME).as_deref(), Some(format!("{COOKIE_NAME}=").as_str()));

    let me = app.oneshot(get_with_cookie(api::CURRENT_USER_ENDPOINT, Some(&cookie))).await.unwrap();
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_out_without_session_is_still_204() {
    let request = Request::builder()
        .method(Method::POST)
        .uri(api::SIGN_OUT_ENDPOINT)
        .body(Body::empty())
        .unwrap();
    let response = api_routes(test_app_state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// google oauth
// =============================================================================

fn google_state() -> AppState {
    let mut state = test_app_state_with_identity(Arc::new(FakeIdentity::default()));
    state.google = Some(GoogleConfig::new(
        "client-1".to_owned(),
        "secret-1".to_owned(),
        "http://localhost:3000/auth/google/callback".to_owned(),
    ));
    state
}

#[tokio::test]
async fn google_redirect_without_config_is_503() {
    let response = api_routes(test_app_state())
        .oneshot(get_with_cookie(api::GOOGLE_SIGN_IN_PATH, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn google_redirect_sets_state_cookie_matching_url() {
    let response = api_routes(google_state())
        .oneshot(get_with_cookie(api::GOOGLE_SIGN_IN_PATH, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let state_cookie = set_cookie(&response, OAUTH_STATE_COOKIE_NAME).unwrap();
    let state_value = state_cookie.trim_start_matches(&format!("{OAUTH_STATE_COOKIE_NAME}="));
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with(google_svc::GOOGLE_AUTHORIZE_URL));
    assert!(location.contains(&format!("state={state_value}")));
}

#[tokio::test]
async fn google_callback_rejects_mismatched_state() {
    let cookie = format!("{OAUTH_STATE_COOKIE_NAME}=expected");
    let response = api_routes(google_state())
        .oneshot(get_with_cookie("/auth/google/callback?code=c&state=forged", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn google_callback_reports_cancelled_consent() {
    let response = api_routes(google_state())
        .oneshot(get_with_cookie("/auth/google/callback?error=access_denied", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn google_callback_success_sets_session_and_closes_popup() {
    let mut server = mockito::Server::new_async().await;
    let token_mock = server
        .mock("POST", "/token")
        .match_body(mockito::Matcher::UrlEncoded("code".into(), "the-code".into()))
        .with_status(200)
        .with_body(r#"{"access_token":"at","id_token":"gid"}"#)
        .create_async()
        .await;

    let mut state = google_state();
    if let Some(google) = state.google.as_mut() {
        google.token_endpoint = format!("{}/token", server.url());
    }
    let app = api_routes(state);

    let cookie = format!("{OAUTH_STATE_COOKIE_NAME}=abc123");
    let response = app
        .clone()
        .oneshot(get_with_cookie("/auth/google/callback?code=the-code&state=abc123", Some(&cookie)))
        .await
        .unwrap();

    token_mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    let session_cookie = set_cookie(&response, COOKIE_NAME).expect("session cookie");
    assert!(session_cookie.len() > format!("{COOKIE_NAME}=").len());
    assert_eq!(
        set_cookie(&response, OAUTH_STATE_COOKIE_NAME).as_deref(),
        Some(format!("{OAUTH_STATE_COOKIE_NAME}=").as_str())
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("window.close()"));

    let me = app.oneshot(get_with_cookie(api::CURRENT_USER_ENDPOINT, Some(&session_cookie))).await.unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let identity: Identity = body_json(me).await;
    assert_eq!(identity.provider, client::net::types::SignInMethod::Google);
}

#[tokio::test]
async fn google_callback_token_exchange_failure_is_502() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let mut state = google_state();
    if let Some(google) = state.google.as_mut() {
        google.token_endpoint = format!("{}/token", server.url());
    }

    let cookie = format!("{OAUTH_STATE_COOKIE_NAME}=abc123");
    let response = api_routes(state)
        .oneshot(get_with_cookie("/auth/google/callback?code=stale&state=abc123", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(set_cookie(&response, COOKIE_NAME).is_none());
}

#[tokio::test]
async fn cross_origin_requests_get_no_cors_grant() {
    let request = Request::builder()
        .method(Method::GET)
        .uri(api::CURRENT_USER_ENDPOINT)
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app_with_account().oneshot(request).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
