use std::sync::{Arc, Mutex};

use tracing::info;

use subdesk_types::models::{Role, Session};

/// In-process analog of the browser's session storage.
///
/// One store per application, handed to views by clone. Created empty,
/// signed in exactly on a successful login, cleared on logout; views only
/// ever read snapshots, never hold a reference into the store.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful login. Replaces any previous session.
    pub fn sign_in(&self, session: Session) {
        info!(username = %session.username, role = %session.role, "session created");
        *self.inner.lock().unwrap() = Some(session);
    }

    /// Clear the session. Returns the identity that was signed in, if any.
    pub fn sign_out(&self) -> Option<Session> {
        let previous = self.inner.lock().unwrap().take();
        if let Some(ref session) = previous {
            info!(username = %session.username, "session destroyed");
        }
        previous
    }

    /// Read-only snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.inner.lock().unwrap().clone()
    }

    /// The signed-in username, if any.
    pub fn username(&self) -> Option<String> {
        self.current().map(|s| s.username)
    }

    /// Whether someone is signed in under the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.current().is_some_and(|s| s.role == role)
    }
}
