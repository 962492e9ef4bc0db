//! API HTTP client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use dryvo_core::error::{InvalidInputError, ProtocolError, TransportError};
use dryvo_core::{ApiUrl, Error, ErrorChannel, Method, Result, TokenStore, Transport};

use crate::config::ClientConfig;

/// Error body shape returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the Dryvo API.
///
/// Reads the access token from the [`TokenStore`] on every request, so
/// credentials written by a login are picked up by the next call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api: ApiUrl,
    timeout: Duration,
    tokens: TokenStore,
}

impl ApiClient {
    /// Create a client for the given configuration.
    pub fn new(config: ClientConfig, tokens: TokenStore) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dryvo/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| map_reqwest(e, config.timeout))?;

        Ok(Self {
            client,
            api: config.api,
            timeout: config.timeout,
            tokens,
        })
    }

    /// Returns the API origin this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Returns the token store credentials are read from.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Create authorization headers from the stored access token, if any.
    async fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        match self.tokens.access_token().await {
            Ok(Some(token)) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|_| InvalidInputError::Other {
                        message: "access token contains invalid header characters".to_string(),
                    })?;
                headers.insert(AUTHORIZATION, value);
            }
            Ok(None) => trace!("No stored access token, sending unauthenticated"),
            Err(e) => warn!(error = %e, "Failed to read access token, sending unauthenticated"),
        }
        Ok(headers)
    }

    /// Handle an API response, parsing the body or error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| map_reqwest(e, self.timeout))?;
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_slice(&bytes).map_err(|e| {
                Error::Transport(TransportError::Decode {
                    message: e.to_string(),
                })
            })
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Parse an API error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.message.or(body.error)),
            Err(_) => ProtocolError::new(status, None),
        }
    }
}

#[async_trait]
impl Transport for ApiClient {
    #[instrument(skip(self, body), fields(api = %self.api))]
    async fn request(&self, path: &str, method: Method, body: Option<&Value>) -> Result<Value> {
        let url = self.api.endpoint(path);
        debug!(%method, path, "API request");

        let builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = builder.headers(self.auth_headers().await?);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| map_reqwest(e, self.timeout))?;

        self.handle_response(response).await
    }
}

/// Perform a request, reporting any failure on `errors` when `report` is set.
///
/// Returns `None` on failure instead of an error.
pub async fn fetch_or_error(
    transport: &dyn Transport,
    errors: &dyn ErrorChannel,
    path: &str,
    method: Method,
    body: Option<&Value>,
    report: bool,
) -> Option<Value> {
    match transport.request(path, method, body).await {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, path, "Request failed");
            if report {
                errors.reported(&e.user_message().unwrap_or_default());
            }
            None
        }
    }
}

fn map_reqwest(err: reqwest::Error, timeout: Duration) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use dryvo_core::MemoryStore;

    #[test]
    fn client_creation() {
        let api = ApiUrl::new("https://dryvo.herokuapp.com").unwrap();
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        let client = ApiClient::new(ClientConfig::new(api.clone()), tokens).unwrap();
        assert_eq!(client.api(), &api);
    }
}
