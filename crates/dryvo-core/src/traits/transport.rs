//! HTTP transport trait.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues requests against the API origin and returns the decoded JSON body.
///
/// Implementations attach the stored credentials themselves; callers pass
/// only the endpoint path.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request to `path` with an optional JSON body.
    async fn request(&self, path: &str, method: Method, body: Option<&Value>) -> Result<Value>;

    /// Send a GET request.
    async fn get(&self, path: &str) -> Result<Value> {
        self.request(path, Method::Get, None).await
    }

    /// Send a POST request with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(path, Method::Post, Some(body)).await
    }
}
