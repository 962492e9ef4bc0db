//! Notification sinks for session state, errors, and external links.

use crate::types::SessionUser;

/// Records the current authentication state.
pub trait SessionObserver: Send + Sync {
    /// A user has authenticated or their session was revalidated.
    fn session_started(&self, user: &SessionUser);

    /// The session has ended.
    fn session_ended(&self);
}

/// Receives user-facing error messages.
pub trait ErrorChannel: Send + Sync {
    fn reported(&self, message: &str);
}

/// Opens a URL outside the application, such as in a browser.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str);
}
