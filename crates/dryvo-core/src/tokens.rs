//! Credential types and their persistence.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::Result;
use crate::traits::KeyValueStore;

/// Namespace prepended to every key the client stores.
pub const STORAGE_PREFIX: &str = "Dryvo_";

/// Storage key of the access token.
pub const TOKEN_KEY: &str = "login_token";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// An access token for authenticated API requests.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token issued alongside an access token.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The access/refresh token pair identifying an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

impl CredentialPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: AccessToken::new(access),
            refresh: RefreshToken::new(refresh),
        }
    }
}

/// Persists the credential pair in a namespaced key-value store.
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the namespaced form of `key`.
    pub fn namespaced(key: &str) -> String {
        format!("{}{}", STORAGE_PREFIX, key)
    }

    /// Write both tokens, access first.
    ///
    /// If either write fails, both keys are removed before the error is
    /// returned so that a half-written pair is never left behind.
    pub async fn set_tokens(&self, pair: &CredentialPair) -> Result<()> {
        if let Err(e) = self.write_pair(pair).await {
            warn!(error = %e, "Failed to persist credential pair");
            if let Err(cleanup) = self.clear().await {
                warn!(error = %cleanup, "Failed to discard partially written credentials");
            }
            return Err(e);
        }

        debug!("Credential pair stored");
        Ok(())
    }

    async fn write_pair(&self, pair: &CredentialPair) -> Result<()> {
        self.store
            .write(&Self::namespaced(TOKEN_KEY), pair.access.as_str())
            .await?;
        self.store
            .write(&Self::namespaced(REFRESH_TOKEN_KEY), pair.refresh.as_str())
            .await
    }

    /// Returns the stored pair, or `None` unless both tokens are present.
    pub async fn tokens(&self) -> Result<Option<CredentialPair>> {
        let access = self.store.read(&Self::namespaced(TOKEN_KEY)).await?;
        let refresh = self.store.read(&Self::namespaced(REFRESH_TOKEN_KEY)).await?;
        Ok(match (access, refresh) {
            (Some(access), Some(refresh)) => Some(CredentialPair::new(access, refresh)),
            _ => None,
        })
    }

    /// Returns the stored access token, if any.
    pub async fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self
            .store
            .read(&Self::namespaced(TOKEN_KEY))
            .await?
            .map(AccessToken::new))
    }

    /// Remove both tokens.
    ///
    /// Both removals are attempted; the first error is returned.
    pub async fn clear(&self) -> Result<()> {
        let access = self.store.remove(&Self::namespaced(TOKEN_KEY)).await;
        let refresh = self
            .store
            .remove(&Self::namespaced(REFRESH_TOKEN_KEY))
            .await;
        access.and(refresh)
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn refresh_token_hides_value_in_debug() {
        let token = RefreshToken::new("refresh_token_value_here");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("refresh_token_value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn set_tokens_writes_namespaced_keys() {
        let memory = Arc::new(MemoryStore::new());
        let tokens = TokenStore::new(memory.clone());

        tokens
            .set_tokens(&CredentialPair::new("auth-test", "refresh-test"))
            .await
            .unwrap();

        assert_eq!(
            memory.read("Dryvo_login_token").await.unwrap().as_deref(),
            Some("auth-test")
        );
        assert_eq!(
            memory.read("Dryvo_refresh_token").await.unwrap().as_deref(),
            Some("refresh-test")
        );
        assert_eq!(
            tokens.tokens().await.unwrap(),
            Some(CredentialPair::new("auth-test", "refresh-test"))
        );
    }

    #[tokio::test]
    async fn half_pair_reads_as_absent() {
        let memory = Arc::new(MemoryStore::new());
        memory.write("Dryvo_login_token", "lonely").await.unwrap();
        let tokens = TokenStore::new(memory);

        assert_eq!(tokens.tokens().await.unwrap(), None);
        assert_eq!(
            tokens.access_token().await.unwrap(),
            Some(AccessToken::new("lonely"))
        );
    }

    #[tokio::test]
    async fn failed_write_leaves_no_tokens() {
        let memory = Arc::new(MemoryStore::new());
        memory.write("Dryvo_login_token", "old").await.unwrap();
        memory.fail_writes_for("Dryvo_refresh_token");
        let tokens = TokenStore::new(memory.clone());

        let result = tokens
            .set_tokens(&CredentialPair::new("new-access", "new-refresh"))
            .await;

        assert!(result.is_err());
        assert_eq!(memory.read("Dryvo_login_token").await.unwrap(), None);
        assert_eq!(memory.read("Dryvo_refresh_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        tokens
            .set_tokens(&CredentialPair::new("a", "r"))
            .await
            .unwrap();

        tokens.clear().await.unwrap();
        tokens.clear().await.unwrap();

        assert_eq!(tokens.tokens().await.unwrap(), None);
        assert_eq!(tokens.access_token().await.unwrap(), None);
    }
}
