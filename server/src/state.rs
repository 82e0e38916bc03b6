//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The identity backend and Google OAuth are optional: when unconfigured the
//! matching endpoints answer 503 and the rest of the site keeps working.

use std::sync::Arc;

use crate::services::google::GoogleConfig;
use crate::services::identity::IdentityBackend;
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Upstream identity provider. `None` if `IDENTITY_API_KEY` is not set.
    pub identity: Option<Arc<dyn IdentityBackend>>,
    /// Google OAuth client. `None` if the `GOOGLE_*` vars are not set.
    pub google: Option<GoogleConfig>,
    pub sessions: SessionStore,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(
        identity: Option<Arc<dyn IdentityBackend>>,
        google: Option<GoogleConfig>,
        sessions: SessionStore,
        cookie_secure: bool,
    ) -> Self {
        Self { identity, google, sessions, cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use client::net::types::{AuthErrorKind, Identity, SignInMethod};

    use super::*;
    use crate::services::identity::IdentityError;

    /// In-memory identity backend answering like the real provider.
    #[derive(Default)]
    pub struct FakeIdentity {
        accounts: Mutex<HashMap<String, String>>,
        pub sign_up_calls: Mutex<u32>,
    }

    impl FakeIdentity {
        #[must_use]
        pub fn with_account(email: &str, password: &str) -> Self {
            let fake = Self::default();
            fake.accounts.lock().unwrap().insert(email.to_owned(), password.to_owned());
            fake
        }
    }

    fn identity_for(email: &str, provider: SignInMethod) -> Identity {
        Identity {
            uid: format!("uid-{email}"),
            email: Some(email.to_owned()),
            display_name: None,
            provider,
        }
    }

    fn rejected(kind: AuthErrorKind, code: &str) -> IdentityError {
        IdentityError::Rejected { kind, message: code.to_owned() }
    }

    #[async_trait::async_trait]
    impl IdentityBackend for FakeIdentity {
        async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                None => Err(rejected(AuthErrorKind::UserNotFound, "EMAIL_NOT_FOUND")),
                Some(stored) if stored != password => Err(rejected(AuthErrorKind::WrongPassword, "INVALID_PASSWORD")),
                Some(_) => Ok(identity_for(email, SignInMethod::Password)),
            }
        }

        async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
            *self.sign_up_calls.lock().unwrap() += 1;
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(rejected(AuthErrorKind::EmailInUse, "EMAIL_EXISTS"));
            }
            accounts.insert(email.to_owned(), password.to_owned());
            Ok(identity_for(email, SignInMethod::Password))
        }

        async fn sign_in_with_google(&self, google_id_token: &str, _request_uri: &str) -> Result<Identity, IdentityError> {
            if google_id_token.is_empty() {
                return Err(rejected(AuthErrorKind::InvalidCredential, "INVALID_IDP_RESPONSE"));
            }
            Ok(identity_for("pilot@gmail.test", SignInMethod::Google))
        }
    }

    /// `AppState` with no identity backend or Google config.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(None, None, SessionStore::new(Duration::from_secs(60)), false)
    }

    /// `AppState` backed by the given fake identity provider.
    #[must_use]
    pub fn test_app_state_with_identity(identity: Arc<FakeIdentity>) -> AppState {
        AppState::new(Some(identity), None, SessionStore::new(Duration::from_secs(60)), false)
    }
}
