//! Identity Toolkit client: email/password and Google sign-in.
//!
//! ARCHITECTURE
//! ============
//! Routes talk to an `IdentityBackend`; the production implementation is a
//! thin HTTP wrapper over the Identity Toolkit REST API. Upstream error codes
//! are translated into the closed `AuthErrorKind` set here, so nothing past
//! this module matches on provider strings.

use std::time::Duration;

use client::net::types::{AuthError, AuthErrorKind, Identity, SignInMethod};
use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (timeout, DNS, TLS, ...).
    #[error("identity request failed: {0}")]
    Request(String),

    /// The provider answered with an error body.
    #[error("identity provider rejected request: {message}")]
    Rejected { kind: AuthErrorKind, message: String },

    #[error("identity response parse failed: {0}")]
    Parse(String),
}

impl IdentityError {
    /// Collapse into the wire error shown to the browser.
    #[must_use]
    pub fn to_auth_error(&self) -> AuthError {
        match self {
            Self::Rejected { kind, message } => AuthError::new(*kind, message.clone()),
            Self::Request(e) => AuthError::new(AuthErrorKind::Network, e.clone()),
            Self::HttpClientBuild(_) | Self::Parse(_) => AuthError::new(AuthErrorKind::Unknown, self.to_string()),
        }
    }
}

/// Map an upstream error message to the closed error vocabulary.
///
/// Messages look like `EMAIL_NOT_FOUND` or `WEAK_PASSWORD : Password should
/// be at least 6 characters`; only the code before ` : ` is matched.
#[must_use]
pub fn classify_provider_error(message: &str) -> AuthErrorKind {
    let code = message.split(" : ").next().unwrap_or_default().trim();
    match code {
        "EMAIL_NOT_FOUND" => AuthErrorKind::UserNotFound,
        "INVALID_PASSWORD" => AuthErrorKind::WrongPassword,
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" | "MISSING_PASSWORD" => AuthErrorKind::InvalidCredential,
        "INVALID_EMAIL" | "MISSING_EMAIL" => AuthErrorKind::InvalidEmail,
        "EMAIL_EXISTS" => AuthErrorKind::EmailInUse,
        "WEAK_PASSWORD" => AuthErrorKind::WeakPassword,
        _ => AuthErrorKind::Unknown,
    }
}

/// Trim + lowercase and require `local@domain` with both parts non-empty.
#[must_use]
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return None;
    }
    Some(email)
}

/// Upstream identity operations the routes depend on.
#[async_trait::async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;

    /// Exchange a Google ID token for a provider identity.
    async fn sign_in_with_google(&self, google_id_token: &str, request_uri: &str) -> Result<Identity, IdentityError>;
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn into_identity(account: AccountResponse, provider: SignInMethod) -> Identity {
    Identity {
        uid: account.local_id,
        email: account.email.filter(|e| !e.is_empty()),
        display_name: account.display_name.filter(|n| !n.is_empty()),
        provider,
    }
}

/// Decode an Identity Toolkit response body given its HTTP status.
pub(crate) fn parse_account_response(
    status: u16,
    body: &str,
    provider: SignInMethod,
) -> Result<Identity, IdentityError> {
    if (200..300).contains(&status) {
        let account: AccountResponse =
            serde_json::from_str(body).map_err(|e| IdentityError::Parse(format!("{e}: {body}")))?;
        return Ok(into_identity(account, provider));
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => Err(IdentityError::Rejected { kind: classify_provider_error(&err.error.message), message: err.error.message }),
        Err(_) => Err(IdentityError::Rejected { kind: AuthErrorKind::Unknown, message: format!("status {status}: {body}") }),
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct IdentityToolkitClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl IdentityToolkitClient {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key.clone(), base_url: config.base_url.clone() })
    }

    async fn call<B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
        provider: SignInMethod,
    ) -> Result<Identity, IdentityError> {
        let url = format!("{}/accounts:{method}", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let result = parse_account_response(status, &text, provider);
        if let Err(e) = &result {
            tracing::debug!(method, status, error = %e, "identity provider call failed");
        }
        result
    }
}

#[async_trait::async_trait]
impl IdentityBackend for IdentityToolkitClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let body = PasswordRequest { email, password, return_secure_token: true };
        self.call("signInWithPassword", &body, SignInMethod::Password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let body = PasswordRequest { email, password, return_secure_token: true };
        self.call("signUp", &body, SignInMethod::Password).await
    }

    async fn sign_in_with_google(&self, google_id_token: &str, request_uri: &str) -> Result<Identity, IdentityError> {
        let body = IdpRequest {
            post_body: format!("id_token={google_id_token}&providerId=google.com"),
            request_uri,
            return_secure_token: true,
            return_idp_credential: true,
        };
        self.call("signInWithIdp", &body, SignInMethod::Google).await
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
