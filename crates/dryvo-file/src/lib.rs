//! dryvo-file - File-backed key-value store.
//!
//! Stores namespaced credential entries in a single JSON file readable only
//! by the current user.

mod store;

pub use store::FileStore;
