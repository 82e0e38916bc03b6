//! Google OAuth service: consent redirect and code exchange.
//!
//! The exchanged Google ID token is handed to the identity backend
//! (`signInWithIdp`); this module never decides who the user is.

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google OAuth configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_endpoint: String,
    pub token_endpoint: String,
}

impl GoogleConfig {
    /// Load from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REDIRECT_URI`.
    /// Returns `None` if any are missing (federated sign-in will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("GOOGLE_CLIENT_ID").ok()?;
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").ok()?;
        let redirect_uri = std::env::var("GOOGLE_REDIRECT_URI").ok()?;
        Some(Self::new(client_id, client_secret, redirect_uri))
    }

    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            authorize_endpoint: GOOGLE_AUTHORIZE_URL.to_owned(),
            token_endpoint: GOOGLE_TOKEN_URL.to_owned(),
        }
    }

    /// Build the Google consent URL carrying the CSRF `state`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEndpoint` if the configured authorize endpoint is not a URL.
    pub fn authorize_url(&self, state: &str) -> Result<String, GoogleAuthError> {
        let url = reqwest::Url::parse_with_params(
            &self.authorize_endpoint,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
                ("prompt", "select_account"),
            ],
        )
        .map_err(|e| GoogleAuthError::InvalidEndpoint(e.to_string()))?;
        Ok(url.into())
    }
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GoogleAuthError {
    #[error("invalid oauth endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("google token exchange failed: {0}")]
    TokenExchange(String),
}

/// Exchange an OAuth code for a Google ID token.
///
/// # Errors
///
/// Returns `TokenExchange` on transport failure, a non-2xx answer, or a body
/// without an `id_token`.
pub async fn exchange_code(config: &GoogleConfig, code: &str) -> Result<String, GoogleAuthError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(&config.token_endpoint)
        .header("Accept", "application/json")
        .form(&[
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| GoogleAuthError::TokenExchange(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| GoogleAuthError::TokenExchange(e.to_string()))?;
    if !status.is_success() {
        return Err(GoogleAuthError::TokenExchange(format!("{status}: {body}")));
    }
    let token_resp: TokenResponse =
        serde_json::from_str(&body).map_err(|_| GoogleAuthError::TokenExchange(format!("unexpected response: {body}")))?;
    token_resp
        .id_token
        .ok_or_else(|| GoogleAuthError::TokenExchange("response carried no id_token".to_owned()))
}

#[cfg(test)]
#[path = "google_test.rs"]
mod tests;
