//! HTTP client configuration.

use std::time::Duration;

use dryvo_core::ApiUrl;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The API origin every endpoint path is resolved against.
    pub api: ApiUrl,
    /// Per-request timeout covering connect, send and body read.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api: ApiUrl) -> Self {
        Self {
            api,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ApiUrl::default())
    }
}
