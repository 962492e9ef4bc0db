//! Authenticated user record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The authenticated identity returned by the API.
///
/// The record is opaque to the session layer: it is passed through unmodified
/// from the response body to observers and callers. Accessors read the
/// well-known fields when they are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionUser(Value);

impl SessionUser {
    /// Wrap a raw user record.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the numeric user id, if present.
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    /// Returns the display name, if present.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Returns the email address, if present.
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    /// Consume the wrapper and return the JSON record.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for SessionUser {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
