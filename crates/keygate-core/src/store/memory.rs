use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use super::CredentialStore;
use crate::error::{AuthorizerError, AuthorizerResult};

/// In-process token set, for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keys: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: RwLock::new(keys.into_iter().map(Into::into).collect()),
        }
    }

    /// Provision a record. Returns false if it already existed.
    pub fn insert(&self, key: impl Into<String>) -> AuthorizerResult<bool> {
        let mut keys = self.keys.write().map_err(|_| poisoned())?;
        Ok(keys.insert(key.into()))
    }

    /// Delete a record. Returns false if it did not exist.
    pub fn remove(&self, key: &str) -> AuthorizerResult<bool> {
        let mut keys = self.keys.write().map_err(|_| poisoned())?;
        Ok(keys.remove(key))
    }
}

fn poisoned() -> AuthorizerError {
    AuthorizerError::StoreUnavailable {
        message: "memory store lock poisoned".to_string(),
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn contains(&self, key: &str) -> AuthorizerResult<bool> {
        let keys = self.keys.read().map_err(|_| poisoned())?;
        Ok(keys.contains(key))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
