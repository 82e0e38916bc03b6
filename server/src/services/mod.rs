//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own upstream calls and session bookkeeping so route
//! handlers can stay focused on protocol translation and cookie plumbing.

pub mod google;
pub mod identity;
pub mod session;
