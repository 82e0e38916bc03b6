//! Credential drafts backing the sign-in and sign-up forms.
//!
//! DESIGN
//! ======
//! Drafts live in an `RwSignal` owned by the page. `begin_submit` is the only
//! way to obtain `Credentials` for a provider call: it returns `None` while a
//! submission is already in flight, which is what keeps a double click from
//! issuing two concurrent provider calls.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use crate::util::password::{PasswordChecks, check_password};

/// Validated input handed to the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Enter both email and password.";
pub(crate) const MISSING_EMAIL_MESSAGE: &str = "Enter an email first.";
pub(crate) const PASSWORD_POLICY_MESSAGE: &str = "Password does not meet the requirements.";

/// Trim the email and require both fields.
///
/// # Errors
///
/// Returns the message to show when either field is empty.
pub fn validate_sign_in_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Sign-in form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInDraft {
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl SignInDraft {
    /// Mark the form as submitting and return the credentials to send.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        match validate_sign_in_input(&self.email, &self.password) {
            Ok(credentials) => {
                self.submitting = true;
                self.error = None;
                Some(credentials)
            }
            Err(message) => {
                self.error = Some(message.to_owned());
                None
            }
        }
    }

    /// Clear the in-flight flag. The entered email is kept either way.
    pub fn finish_submit(&mut self, error: Option<String>) {
        self.submitting = false;
        self.error = error;
    }
}

/// Sign-up form state. The password is private so the policy checks can never
/// drift from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpDraft {
    pub email: String,
    password: String,
    checks: PasswordChecks,
    pub submitting: bool,
    pub error: Option<String>,
}

impl SignUpDraft {
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn checks(&self) -> PasswordChecks {
        self.checks
    }

    /// Replace the password and recompute the policy checks.
    pub fn set_password(&mut self, password: String) {
        self.checks = check_password(&password);
        self.password = password;
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.checks.is_accepted() && !self.submitting
    }

    /// The field is flagged once something is typed and the policy fails.
    #[must_use]
    pub fn shows_invalid(&self) -> bool {
        !self.password.is_empty() && !self.checks.is_accepted()
    }

    /// Mark the form as submitting and return the credentials to send.
    ///
    /// Returns `None` without touching the provider when the password policy
    /// fails, the email is empty, or a submission is already pending.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        if !self.checks.is_accepted() {
            self.error = Some(PASSWORD_POLICY_MESSAGE.to_owned());
            return None;
        }
        let email = self.email.trim();
        if email.is_empty() {
            self.error = Some(MISSING_EMAIL_MESSAGE.to_owned());
            return None;
        }
        let credentials = Credentials { email: email.to_owned(), password: self.password.clone() };
        self.submitting = true;
        self.error = None;
        Some(credentials)
    }

    pub fn finish_submit(&mut self, error: Option<String>) {
        self.submitting = false;
        self.error = error;
    }
}
