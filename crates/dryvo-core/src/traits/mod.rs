//! Collaborator traits the session layer is built against.

mod observer;
mod storage;
mod transport;

pub use observer::{ErrorChannel, SessionObserver, UrlOpener};
pub use storage::KeyValueStore;
pub use transport::{Method, Transport};
