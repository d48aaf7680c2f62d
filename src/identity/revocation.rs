//! Logout denylist over a TTL key-value store.
//!
//! The contract is deliberately tiny: `GET key` (absent means not revoked,
//! present means revoked regardless of value) and `SET key value EX ttl`.
//! Entries carry the token's remaining life as their TTL, so the denylist
//! never outgrows the set of still-live revoked tokens. An external store is
//! required for multi-instance deployments; an in-process set would silently
//! stop revoking across replicas.
//!
//! Any store error or timeout surfaces as `StoreUnavailable`; the gate fails
//! closed on it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tracing::error;

use crate::error::{AuthError, AuthResult};

const REVOKED_MARKER: &str = "revoked";

#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn is_revoked(&self, token: &str) -> AuthResult<bool>;

    /// Record `token` as revoked for `ttl_secs` seconds. Overwriting an
    /// existing entry is harmless: a re-revocation always carries the same or
    /// a smaller remaining TTL.
    async fn revoke(&self, token: &str, ttl_secs: u64) -> AuthResult<()>;
}

/// Redis-backed denylist shared by every service instance.
#[derive(Clone)]
pub struct RedisRevocationStore {
    connection: ConnectionManager,
}

impl RedisRevocationStore {
    /// Connect with bounded timeouts. A slow or absent Redis must show up as
    /// `StoreUnavailable` within the request that hit it, not hang the gate.
    pub async fn connect(redis_url: &str) -> AuthResult<Self> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(500))
            .set_response_timeout(Duration::from_millis(500));

        let client = Client::open(redis_url).map_err(|e| {
            error!("invalid redis url: {e}");
            AuthError::StoreUnavailable
        })?;
        let connection = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(|e| {
                error!("redis connection failed: {e}");
                AuthError::StoreUnavailable
            })?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn is_revoked(&self, token: &str) -> AuthResult<bool> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(token).await.map_err(|e| {
            error!("revocation lookup failed: {e}");
            AuthError::StoreUnavailable
        })?;
        Ok(value.is_some())
    }

    async fn revoke(&self, token: &str, ttl_secs: u64) -> AuthResult<()> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(token, REVOKED_MARKER, ttl_secs)
            .await
            .map_err(|e| {
                error!("revocation write failed: {e}");
                AuthError::StoreUnavailable
            })
    }
}

/// In-process denylist with the same expiry semantics, for tests and
/// single-process embeddings only.
#[derive(Default)]
pub struct MemoryRevocationStore {
    deadlines: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Expiry deadline of a live entry, if any. Test introspection aid.
    pub fn deadline_of(&self, token: &str) -> Option<DateTime<Utc>> {
        self.deadlines.read().get(token).copied()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn is_revoked(&self, token: &str) -> AuthResult<bool> {
        let now = Utc::now();
        let mut map = self.deadlines.write();
        match map.get(token) {
            Some(deadline) if *deadline > now => Ok(true),
            Some(_) => {
                // Lazy expiry, standing in for the store-enforced TTL.
                map.remove(token);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn revoke(&self, token: &str, ttl_secs: u64) -> AuthResult<()> {
        let deadline = Utc::now() + chrono::Duration::seconds(ttl_secs as i64);
        self.deadlines.write().insert(token.to_string(), deadline);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absence_means_not_revoked() {
        let store = MemoryRevocationStore::new();
        assert!(!store.is_revoked("never-seen").await.unwrap());
    }

    #[tokio::test]
    async fn entries_expire_with_their_ttl() {
        let store = MemoryRevocationStore::new();
        store.revoke("t1", 3600).await.unwrap();
        assert!(store.is_revoked("t1").await.unwrap());

        // Zero TTL: already past its deadline, so absent on the next read.
        store.revoke("t2", 0).await.unwrap();
        assert!(!store.is_revoked("t2").await.unwrap());
    }

    #[tokio::test]
    async fn rewrite_with_smaller_ttl_shrinks_the_deadline() {
        let store = MemoryRevocationStore::new();
        store.revoke("t", 3600).await.unwrap();
        let first = store.deadline_of("t").unwrap();
        store.revoke("t", 60).await.unwrap();
        let second = store.deadline_of("t").unwrap();
        assert!(second < first);
    }
}
