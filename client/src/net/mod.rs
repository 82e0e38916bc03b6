//! Networking modules for the gateway's auth API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `identity` wraps them behind the
//! `IdentityProvider` seam, and `types` defines the shared wire schema.

pub mod api;
pub mod identity;
pub mod types;
