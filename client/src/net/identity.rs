//! Identity-provider seam used by the auth flows.
//!
//! DESIGN
//! ======
//! Flows are generic over `IdentityProvider` so tests can drive them with a
//! fake. The browser build uses `HttpIdentityProvider`, which talks to the
//! gateway's `/api/auth/*` endpoints; the gateway in turn owns the upstream
//! provider and its session cookie.

use super::api;
use super::types::{AuthError, Identity};
use crate::state::auth::Session;

/// Name of the federated sign-in window, reused if it is already open.
#[cfg(feature = "hydrate")]
const POPUP_TARGET: &str = "afaa-federated-sign-in";
#[cfg(feature = "hydrate")]
const POPUP_FEATURES: &str = "popup,width=500,height=640";
#[cfg(feature = "hydrate")]
const POPUP_POLL_MS: u64 = 400;
/// Give up waiting on the popup after ten minutes.
#[cfg(feature = "hydrate")]
const POPUP_MAX_POLLS: u32 = 1500;

/// Operations the UI consumes from the identity provider.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Authenticate with email + password.
    async fn sign_in_with_email_password(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create an account and sign it in.
    async fn sign_up_with_email_password(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Run the single-sign-on popup flow.
    async fn sign_in_with_federated_popup(&self) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// One observation of the provider's session.
    async fn current_session(&self) -> Session;
}

/// Identity provider backed by the gateway's HTTP API.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpIdentityProvider;

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in_with_email_password(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        api::post_credentials(api::SIGN_IN_ENDPOINT, email, password).await
    }

    async fn sign_up_with_email_password(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        api::post_credentials(api::SIGN_UP_ENDPOINT, email, password).await
    }

    async fn sign_in_with_federated_popup(&self) -> Result<Identity, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            use super::types::AuthErrorKind;

            let window = web_sys::window().ok_or_else(|| AuthError::new(AuthErrorKind::Unknown, "no browser window"))?;
            let popup = window
                .open_with_url_and_target_and_features(api::GOOGLE_SIGN_IN_PATH, POPUP_TARGET, POPUP_FEATURES)
                .ok()
                .flatten()
                .ok_or_else(|| AuthError::new(AuthErrorKind::PopupClosed, "sign-in popup was blocked"))?;

            // The callback page closes the popup once the gateway has set the
            // session cookie; the cookie is then visible to `/api/auth/me`.
            for _ in 0..POPUP_MAX_POLLS {
                gloo_timers::future::sleep(std::time::Duration::from_millis(POPUP_POLL_MS)).await;
                if popup.closed().unwrap_or(true) {
                    break;
                }
            }
            if !popup.closed().unwrap_or(true) {
                let _ = popup.close();
            }

            api::fetch_current_identity()
                .await
                .ok_or_else(|| AuthError::new(AuthErrorKind::PopupClosed, "sign-in window closed before completing"))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::unavailable())
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        api::sign_out().await
    }

    async fn current_session(&self) -> Session {
        Session::from_identity(api::fetch_current_identity().await)
    }
}
