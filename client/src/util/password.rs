//! Password policy checks shared by the sign-up form and the server.
//!
//! DESIGN
//! ======
//! The three rules are evaluated independently so the form can show a
//! pass/fail indicator per rule. `check_password` is pure; callers recompute
//! on every keystroke instead of caching results.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use serde::{Deserialize, Serialize};

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARS: [char; 6] = ['_', '/', '-', '!', '?', '*'];
/// Minimum accepted length, inclusive.
pub const MIN_LEN: usize = 8;
/// Maximum accepted length, inclusive.
pub const MAX_LEN: usize = 20;

/// One rule of the password policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PasswordRule {
    Uppercase,
    Special,
    Length,
}

impl PasswordRule {
    /// All rules in display order.
    pub const ALL: [Self; 3] = [Self::Uppercase, Self::Special, Self::Length];

    /// Checklist label shown next to the indicator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Uppercase => "At least 1 uppercase letter",
            Self::Special => "At least 1 special character (_, /, -, !, ?, *)",
            Self::Length => "Between 8 and 20 characters",
        }
    }
}

/// Per-rule results for one candidate password.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordChecks {
    pub has_uppercase: bool,
    pub has_special: bool,
    pub has_valid_length: bool,
}

impl PasswordChecks {
    /// A password is accepted only when every rule passes.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self.has_uppercase && self.has_special && self.has_valid_length
    }

    #[must_use]
    pub fn passes(self, rule: PasswordRule) -> bool {
        match rule {
            PasswordRule::Uppercase => self.has_uppercase,
            PasswordRule::Special => self.has_special,
            PasswordRule::Length => self.has_valid_length,
        }
    }

    /// Rules that failed, in display order.
    #[must_use]
    pub fn unmet(self) -> Vec<PasswordRule> {
        PasswordRule::ALL
            .into_iter()
            .filter(|rule| !self.passes(*rule))
            .collect()
    }
}

/// Evaluate `password` against the policy.
///
/// Length is measured in UTF-16 code units, matching how browsers report the
/// length of an input value.
#[must_use]
pub fn check_password(password: &str) -> PasswordChecks {
    let len = password.encode_utf16().count();
    PasswordChecks {
        has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        has_special: password.chars().any(|c| SPECIAL_CHARS.contains(&c)),
        has_valid_length: (MIN_LEN..=MAX_LEN).contains(&len),
    }
}
