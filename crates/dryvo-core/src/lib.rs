//! dryvo-core - Core types and collaborator traits for the Dryvo client.
//!
//! The session layer is written against the traits in [`traits`]; this crate
//! also provides the credential types, the namespaced [`TokenStore`] and an
//! in-memory [`KeyValueStore`] implementation.

pub mod error;
pub mod memory;
pub mod tokens;
pub mod traits;
pub mod types;

pub use error::{DEFAULT_ERROR, Error, Failure};
pub use memory::MemoryStore;
pub use tokens::{AccessToken, CredentialPair, RefreshToken, TokenStore};
pub use traits::{ErrorChannel, KeyValueStore, Method, SessionObserver, Transport, UrlOpener};
pub use types::{ApiUrl, DEFAULT_API_URL, SessionUser};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
