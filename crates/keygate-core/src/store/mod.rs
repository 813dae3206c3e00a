//! Backing key-value store for authorization records.
//!
//! A record's existence is the whole signal: the authorizer only ever asks
//! "is there a record for this key" and never writes.

use async_trait::async_trait;

use crate::error::AuthorizerResult;

mod dynamo;
mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Point lookup against the store holding valid tokens.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Whether a record keyed by `key` exists.
    ///
    /// Transport, permission or throttling failures are returned as
    /// [`AuthorizerError::StoreUnavailable`](crate::AuthorizerError::StoreUnavailable).
    async fn contains(&self, key: &str) -> AuthorizerResult<bool>;

    /// Short name for log lines.
    fn name(&self) -> &str;
}
