//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is owned by the identity provider. `App` provides it as an
//! `RwSignal<Session>` context; pages read it to choose what to render and
//! only the auth flows in `util::auth` write to it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Identity;

/// Authentication status as last reported by the identity provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    /// The provider has not reported yet.
    #[default]
    Unknown,
    /// Nobody is signed in.
    Absent,
    /// A user is signed in.
    Present(Identity),
}

impl Session {
    #[must_use]
    pub fn from_identity(identity: Option<Identity>) -> Self {
        identity.map_or(Self::Absent, Self::Present)
    }

    /// `true` once the provider has reported either way.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Present(identity) => Some(identity),
            Self::Unknown | Self::Absent => None,
        }
    }
}
