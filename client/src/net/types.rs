//! Shared wire-protocol DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The server translates upstream identity-provider codes into the closed
//! `AuthErrorKind` set before anything reaches the browser, so UI code never
//! matches on provider-specific strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// How the current identity signed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignInMethod {
    #[default]
    Password,
    Google,
}

/// Authenticated user as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque provider-assigned user id.
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub provider: SignInMethod,
}

impl Identity {
    /// Best label for the nav bar: display name, then email, then uid.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Closed set of failure categories surfaced to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthErrorKind {
    UserNotFound,
    WrongPassword,
    InvalidCredential,
    InvalidEmail,
    #[serde(rename = "email-already-in-use")]
    EmailInUse,
    WeakPassword,
    /// The federated sign-in window was closed or blocked before completing.
    PopupClosed,
    /// The identity backend is not configured or not reachable from here.
    Unavailable,
    /// The request never produced a usable response.
    Network,
    Unknown,
}

impl AuthErrorKind {
    /// Wire code, e.g. `"wrong-password"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::UserNotFound => "user-not-found",
            Self::WrongPassword => "wrong-password",
            Self::InvalidCredential => "invalid-credential",
            Self::InvalidEmail => "invalid-email",
            Self::EmailInUse => "email-already-in-use",
            Self::WeakPassword => "weak-password",
            Self::PopupClosed => "popup-closed",
            Self::Unavailable => "unavailable",
            Self::Network => "network",
            Self::Unknown => "unknown",
        }
    }
}

/// An identity-provider failure: category plus the raw provider text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    #[must_use]
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    #[must_use]
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::new(AuthErrorKind::Network, err.to_string())
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(AuthErrorKind::Unavailable, "not available on server")
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

impl std::error::Error for AuthError {}

/// JSON error body: `{"error": {"kind": "...", "message": "..."}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: AuthError,
}

/// Email + password request body for sign-in and sign-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}
