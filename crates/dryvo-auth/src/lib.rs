//! dryvo-auth - Session lifecycle for the Dryvo client.
//!
//! [`SessionManager`] coordinates the operations that create, revalidate and
//! end a session. It is built from injected collaborators and holds no global
//! state:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dryvo_auth::{ErrorLog, SessionManager, SessionState};
//! use dryvo_core::{ApiUrl, MemoryStore, TokenStore, Transport, UrlOpener};
//!
//! # struct Browser;
//! # impl UrlOpener for Browser { fn open(&self, _: &str) {} }
//! # async fn example(transport: Arc<dyn Transport>) {
//! let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
//! let state = Arc::new(SessionState::new());
//! let errors = Arc::new(ErrorLog::new());
//!
//! let manager = SessionManager::new(
//!     ApiUrl::default(),
//!     transport,
//!     tokens,
//!     state.clone(),
//!     errors.clone(),
//!     Arc::new(Browser),
//! );
//!
//! match manager.direct_login("t@t.com", "secret").await {
//!     Ok(user) => println!("hello {:?}", user.name()),
//!     Err(_) => println!("{:?}", errors.pop_latest()),
//! }
//! # }
//! ```

pub mod agenda;
mod endpoints;
mod external;
mod manager;
pub mod state;

pub use agenda::Agenda;
pub use endpoints::{CURRENT_USER, DIRECT_LOGIN, EXCHANGE_TOKEN, EXTERNAL_LOGIN, REGISTER};
pub use external::external_auth_url;
pub use manager::SessionManager;
pub use state::{ErrorLog, SessionState};
