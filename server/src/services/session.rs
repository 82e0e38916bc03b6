//! In-memory session registry.
//!
//! ARCHITECTURE
//! ============
//! The browser holds an opaque 32-byte hex token in an HttpOnly cookie; the
//! registry keys entries by the SHA-256 of that token, so a dump of the map
//! cannot be replayed as cookies. Entries expire after the configured TTL and
//! are swept by a background task.
//!
//! TRADE-OFFS
//! ==========
//! Sessions do not survive a restart; users sign in again.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use client::net::types::Identity;
use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

const FALLBACK_TTL_SECS: u64 = 365 * 24 * 60 * 60;

struct SessionEntry {
    identity: Identity,
    expires_at: Instant,
}

/// Cookie-token to identity map with TTL expiry. Cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// `now + ttl`, saturating at one year out when the sum overflows.
    fn expiry_from(&self, now: Instant) -> Instant {
        now.checked_add(self.ttl)
            .or_else(|| now.checked_add(Duration::from_secs(FALLBACK_TTL_SECS)))
            .unwrap_or(now)
    }

    /// Create a session for `identity`, returning the cookie token.
    pub async fn create(&self, identity: Identity) -> String {
        let token = generate_token();
        let entry = SessionEntry { identity, expires_at: self.expiry_from(Instant::now()) };
        self.entries.write().await.insert(hash_token(&token), entry);
        token
    }

    /// Return the identity bound to `token` if the session is still live.
    pub async fn validate(&self, token: &str) -> Option<Identity> {
        let entries = self.entries.read().await;
        let entry = entries.get(&hash_token(token))?;
        (entry.expires_at > Instant::now()).then(|| entry.identity.clone())
    }

    /// Delete a session by token. Unknown tokens are ignored.
    pub async fn delete(&self, token: &str) {
        self.entries.write().await.remove(&hash_token(token));
    }

    /// Drop expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Number of stored entries, expired or not.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Spawn the periodic sweep of expired sessions.
pub fn spawn_purge_task(store: SessionStore, interval: Duration) -> JoinHandle<()> {
    tracing::info!(interval_secs = interval.as_secs(), "session purge configured");
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                let remaining = store.entry_count().await;
                tracing::debug!(purged, remaining, "expired sessions purged");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
