//! Error types for the Dryvo client toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, storage, and input validation errors, plus the
//! user-facing [`Failure`] that session operations resolve with.

use std::fmt;
use thiserror::Error;

/// The unified error type for Dryvo client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The key-value store could not complete a read, write, or removal.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (malformed URL, unexpected response shape).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the human-readable message to show a user, if any.
    ///
    /// Protocol errors yield the server's own message and nothing when the
    /// server sent none. Every other variant yields its display text.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Error::Protocol(err) => err.message.clone(),
            Error::Transport(err) => Some(err.to_string()),
            Error::Storage(err) => Some(err.to_string()),
            Error::InvalidInput(err) => Some(err.to_string()),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The response body could not be decoded.
    #[error("malformed response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the API.
#[derive(Debug, Clone)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable message from the response body, if present.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

/// Key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error on {key}: {message}")]
    Io { key: String, message: String },

    /// Stored data could not be parsed.
    #[error("corrupt store: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API URL format.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A response was missing a field the operation depends on.
    #[error("response missing field '{field}'")]
    MissingField { field: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Generic message reported when the cause of a failure is not shown.
pub const DEFAULT_ERROR: &str = "Something went wrong, please try again later.";

/// A reportable failure of a session operation.
///
/// Carries the message that was sent to the error channel. An empty message
/// means the underlying error had nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

impl Failure {
    /// Create a failure carrying a user-facing message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build a failure from an error, falling back to an empty message.
    pub fn from_error(err: &Error) -> Self {
        Self::new(err.user_message().unwrap_or_default())
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
