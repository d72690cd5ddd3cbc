use tracing::{debug, warn};

use crate::model::AuthUser;
use crate::service::{SessionError, SessionService};

impl SessionService {
    /// Restore the persisted session snapshot, if any.
    ///
    /// A present, parseable snapshot becomes the current session without
    /// re-validating credentials. An unreadable snapshot is discarded and
    /// treated as "no session" rather than failing construction.
    pub(crate) fn restore(&self) -> Result<(), SessionError> {
        match self.read_json::<AuthUser>(&self.config.session_key) {
            Ok(Some(user)) => {
                debug!(user_id = %user.id, "restored session snapshot");
                *self.current.write().unwrap() = Some(user);
            }
            Ok(None) => {}
            Err(SessionError::Serialization(e)) => {
                warn!(error = %e, "discarding unreadable session snapshot");
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// The current session, if one is active. Returns a cloned snapshot;
    /// the stored value only changes through login/signup/logout.
    pub fn current(&self) -> Option<AuthUser> {
        self.current.read().unwrap().clone()
    }

    /// Whether a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap().is_some()
    }

    /// Clear the current session and delete the persisted snapshot.
    /// Idempotent — calling with no active session is a no-op.
    pub fn logout(&self) -> Result<(), SessionError> {
        *self.current.write().unwrap() = None;
        self.kv.delete(&self.config.session_key)?;
        Ok(())
    }

    /// Persist `user` as the session snapshot (overwriting any prior
    /// one), then make it the current session. On persistence failure
    /// the in-memory session is left unchanged.
    pub(crate) fn establish(&self, user: AuthUser) -> Result<(), SessionError> {
        self.write_json(&self.config.session_key, &user)?;
        *self.current.write().unwrap() = Some(user);
        Ok(())
    }
}
