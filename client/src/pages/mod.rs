//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped form state and delegates the provider calls to
//! `util::auth`.

pub mod about;
pub mod demo;
pub mod home;
pub mod progress;
pub mod sign_in;
pub mod sign_up;
