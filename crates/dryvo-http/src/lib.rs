//! dryvo-http - reqwest-backed API transport.
//!
//! [`ApiClient`] implements [`dryvo_core::Transport`] against the API origin,
//! attaching the stored access token to every request.

mod client;
mod config;

pub use client::{ApiClient, fetch_or_error};
pub use config::ClientConfig;
