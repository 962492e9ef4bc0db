//! In-process sinks for session state and user-facing errors.

use parking_lot::{Mutex, RwLock};

use dryvo_core::{ErrorChannel, SessionObserver, SessionUser};

/// Holds the currently authenticated user.
#[derive(Debug, Default)]
pub struct SessionState {
    user: RwLock<Option<SessionUser>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current user, if a session is active.
    pub fn current(&self) -> Option<SessionUser> {
        self.user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }
}

impl SessionObserver for SessionState {
    fn session_started(&self, user: &SessionUser) {
        *self.user.write() = Some(user.clone());
    }

    fn session_ended(&self) {
        *self.user.write() = None;
    }
}

/// Collects reported error messages, newest last.
#[derive(Debug, Default)]
pub struct ErrorLog {
    messages: Mutex<Vec<String>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the most recently reported message.
    pub fn pop_latest(&self) -> Option<String> {
        self.messages.lock().pop()
    }

    /// Returns every pending message, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl ErrorChannel for ErrorLog {
    fn reported(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
