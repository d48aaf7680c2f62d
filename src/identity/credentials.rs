//! Credential store seam.
//!
//! The real store of record (the rating application's SQL database) lives
//! outside this core. Login only ever needs one narrow, idempotent lookup,
//! so that lookup is the whole trait. `MemoryCredentialStore` backs tests and
//! single-process embeddings.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::AuthResult;
use super::principal::Principal;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a principal by login identifier (email in the original
    /// application). `Ok(None)` means no such principal; the caller folds
    /// that into a generic `Unauthorized`. `Err(StoreUnavailable)` means the
    /// store itself could not answer.
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Principal>>;
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    by_identifier: RwLock<HashMap<String, Principal>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, identifier: &str, principal: Principal) {
        self.by_identifier
            .write()
            .insert(identifier.to_string(), principal);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Principal>> {
        Ok(self.by_identifier.read().get(identifier).cloned())
    }
}
