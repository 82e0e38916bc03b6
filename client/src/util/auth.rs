//! Auth flows and session-gating helpers shared by pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages own form state and spawn these flows; the flows own the provider
//! call, the session update, and the post-success redirect. Everything is
//! injected (provider, session sink, navigator) so the flows run in plain
//! unit tests without a browser.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::identity::IdentityProvider;
use crate::net::types::{AuthError, AuthErrorKind};
use crate::state::auth::Session;
use crate::state::credentials::Credentials;

/// Route every successful sign-in or sign-up lands on.
pub const AUTHENTICATED_ROUTE: &str = "/Demo";
pub const SIGN_IN_ROUTE: &str = "/SignIn";
pub const SIGN_UP_ROUTE: &str = "/SignUp";

/// Destination for session updates produced by the flows.
pub trait SessionSink {
    fn publish(&self, session: Session);
}

impl SessionSink for RwSignal<Session> {
    fn publish(&self, session: Session) {
        self.set(session);
    }
}

/// Which variant a session-gated view should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateVariant {
    Placeholder,
    Anonymous,
    Authenticated,
}

#[must_use]
pub fn gate_variant(session: &Session) -> GateVariant {
    match session {
        Session::Unknown => GateVariant::Placeholder,
        Session::Absent => GateVariant::Anonymous,
        Session::Present(_) => GateVariant::Authenticated,
    }
}

/// User-facing message for a failed email/password sign-in.
#[must_use]
pub fn sign_in_message(err: &AuthError) -> String {
    match err.kind {
        AuthErrorKind::UserNotFound => "No account found with this email.".to_owned(),
        AuthErrorKind::WrongPassword => "Incorrect password. Please try again.".to_owned(),
        AuthErrorKind::InvalidCredential => "Invalid email or password.".to_owned(),
        AuthErrorKind::InvalidEmail => "Enter a valid email address.".to_owned(),
        _ => format!("Failed to sign in: {}", err.message),
    }
}

/// User-facing message for a failed account creation.
#[must_use]
pub fn sign_up_message(err: &AuthError) -> String {
    match err.kind {
        AuthErrorKind::EmailInUse => "An account with this email already exists.".to_owned(),
        AuthErrorKind::InvalidEmail => "Enter a valid email address.".to_owned(),
        AuthErrorKind::WeakPassword => format!("Password was rejected: {}", err.message),
        _ => format!("Failed to sign up: {}", err.message),
    }
}

/// Ask the provider for its current session and publish it.
pub async fn observe_session<P, S>(provider: &P, session: &S)
where
    P: IdentityProvider,
    S: SessionSink,
{
    session.publish(provider.current_session().await);
}

/// Keep `session` in step with the provider for as long as the app runs.
///
/// Observes the provider, then awaits `pause`; stops once `pause` resolves to
/// `false`. Only changes are published, so an expired or revoked server
/// session flips the gates to anonymous on the next observation.
pub async fn watch_session<P, S, F, Fut>(provider: &P, session: &S, mut pause: F)
where
    P: IdentityProvider,
    S: SessionSink,
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let mut last: Option<Session> = None;
    loop {
        let current = provider.current_session().await;
        if last.as_ref() != Some(&current) {
            session.publish(current.clone());
            last = Some(current);
        }
        if !pause().await {
            break;
        }
    }
}

/// Email/password sign-in. On success the session becomes present and the
/// navigator is sent to `AUTHENTICATED_ROUTE`; on failure nothing changes.
///
/// # Errors
///
/// Returns the provider's error untouched.
pub async fn sign_in<P, S, N>(provider: &P, session: &S, navigate: N, credentials: &Credentials) -> Result<(), AuthError>
where
    P: IdentityProvider,
    S: SessionSink,
    N: Fn(&str),
{
    let identity = provider
        .sign_in_with_email_password(&credentials.email, &credentials.password)
        .await?;
    session.publish(Session::Present(identity));
    navigate(AUTHENTICATED_ROUTE);
    Ok(())
}

/// Account creation; same success handling as `sign_in`.
///
/// # Errors
///
/// Returns the provider's error untouched.
pub async fn sign_up<P, S, N>(provider: &P, session: &S, navigate: N, credentials: &Credentials) -> Result<(), AuthError>
where
    P: IdentityProvider,
    S: SessionSink,
    N: Fn(&str),
{
    let identity = provider
        .sign_up_with_email_password(&credentials.email, &credentials.password)
        .await?;
    session.publish(Session::Present(identity));
    navigate(AUTHENTICATED_ROUTE);
    Ok(())
}

/// Federated popup sign-in; same success handling as `sign_in`.
///
/// # Errors
///
/// Returns the provider's error; callers log it and leave the form visible.
pub async fn sign_in_federated<P, S, N>(provider: &P, session: &S, navigate: N) -> Result<(), AuthError>
where
    P: IdentityProvider,
    S: SessionSink,
    N: Fn(&str),
{
    let identity = provider.sign_in_with_federated_popup().await?;
    session.publish(Session::Present(identity));
    navigate(AUTHENTICATED_ROUTE);
    Ok(())
}

/// Sign out and publish an absent session.
///
/// # Errors
///
/// Returns the provider's error; the session is left as it was.
pub async fn sign_out<P, S>(provider: &P, session: &S) -> Result<(), AuthError>
where
    P: IdentityProvider,
    S: SessionSink,
{
    provider.sign_out().await?;
    session.publish(Session::Absent);
    Ok(())
}
