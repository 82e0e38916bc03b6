//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `password` is shared with the server for the sign-up re-check; `auth`
//! holds the flows pages spawn on submit.

pub mod auth;
pub mod password;
