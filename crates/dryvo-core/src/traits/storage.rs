//! Key-value storage trait.

use async_trait::async_trait;

use crate::Result;

/// A persistent string key-value store.
///
/// Keys arrive already namespaced; implementations store them verbatim.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Read the value under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
