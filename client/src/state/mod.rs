//! Client-side state held in Leptos signals.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` is app-wide and provided as context by `App`; `credentials` backs
//! the per-page form drafts.

pub mod auth;
pub mod credentials;
