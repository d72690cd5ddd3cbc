pub mod login;
pub mod session;
pub mod signup;

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use cardcraft_kv::{KVError, KVStore};

use crate::model::AuthUser;
use crate::notify::{ChangeHandler, ChangeListeners, SubscriptionId};
use crate::verify::{PasswordVerifier, PlaintextVerifier};

/// Session service error type.
///
/// Recoverable outcomes (credentials did not match, email already
/// registered) are reported as `Ok(false)` by the operations, never as
/// errors. These variants cover configuration mistakes and backend
/// failures only.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("config: {0}")]
    Config(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("serialization: {0}")]
    Serialization(String),
}

impl From<KVError> for SessionError {
    fn from(e: KVError) -> Self {
        match e {
            KVError::Storage(m) => SessionError::Storage(m),
            KVError::Serialization(m) => SessionError::Serialization(m),
        }
    }
}

impl From<SessionError> for cardcraft_core::ServiceError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Config(m) => cardcraft_core::ServiceError::Validation(m),
            SessionError::Storage(m) => cardcraft_core::ServiceError::Storage(m),
            SessionError::Serialization(m) => cardcraft_core::ServiceError::Internal(m),
        }
    }
}

/// Configuration for the session service.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Key holding the serialized session snapshot. Owned exclusively
    /// by this module.
    pub session_key: String,

    /// Key holding the users directory (shared with other components).
    pub users_key: String,

    /// Key holding the admin directory (read-only here).
    pub admins_key: String,

    /// The one credential pair that yields a superadmin session.
    pub root_email: String,

    /// Root password, compared through the configured verifier.
    pub root_password: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_key: "cardcraft_user".to_string(),
            users_key: "cardcraft_users".to_string(),
            admins_key: "cardcraft_admin_members".to_string(),
            root_email: "admin@gmail.com".to_string(),
            root_password: "PASSWORD".to_string(),
        }
    }
}

impl SessionConfig {
    /// Reject configurations that cannot work: empty or colliding keys,
    /// empty root credentials. A violation is a programming error in the
    /// host wiring, surfaced at construction rather than first use.
    pub(crate) fn validate(&self) -> Result<(), SessionError> {
        let keys = [
            ("session_key", &self.session_key),
            ("users_key", &self.users_key),
            ("admins_key", &self.admins_key),
        ];
        for (name, key) in &keys {
            if key.is_empty() {
                return Err(SessionError::Config(format!("{name} must not be empty")));
            }
        }
        for i in 0..keys.len() {
            for (other_name, other_key) in &keys[i + 1..] {
                let (name, key) = keys[i];
                if key == *other_key {
                    return Err(SessionError::Config(format!(
                        "{name} and {other_name} both use key '{key}'"
                    )));
                }
            }
        }
        if self.root_email.is_empty() || self.root_password.is_empty() {
            return Err(SessionError::Config(
                "root credentials must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The session service. Holds the storage backend, configuration, the
/// credential verifier, and the in-memory current session.
pub struct SessionService {
    pub(crate) kv: Arc<dyn KVStore>,
    pub(crate) config: SessionConfig,
    pub(crate) verifier: Box<dyn PasswordVerifier>,
    pub(crate) current: RwLock<Option<AuthUser>>,
    pub(crate) listeners: ChangeListeners,
}

impl SessionService {
    /// Create a new SessionService with plaintext exact-match credential
    /// comparison, restoring any persisted session snapshot.
    pub fn new(
        kv: Arc<dyn KVStore>,
        config: SessionConfig,
    ) -> Result<Arc<Self>, SessionError> {
        Self::with_verifier(kv, config, Box::new(PlaintextVerifier))
    }

    /// Create a new SessionService with a custom credential verifier.
    pub fn with_verifier(
        kv: Arc<dyn KVStore>,
        config: SessionConfig,
        verifier: Box<dyn PasswordVerifier>,
    ) -> Result<Arc<Self>, SessionError> {
        config.validate()?;
        let svc = Self {
            kv,
            config,
            verifier,
            current: RwLock::new(None),
            listeners: ChangeListeners::new(),
        };
        svc.restore()?;
        Ok(Arc::new(svc))
    }

    /// Register a handler invoked after each successful signup, once the
    /// users directory has been rewritten.
    pub fn subscribe_users_changed(&self, handler: ChangeHandler) -> SubscriptionId {
        self.listeners.subscribe(handler)
    }

    /// Remove a users-changed handler. Returns false for unknown ids.
    pub fn unsubscribe_users_changed(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ── Generic KV-JSON helpers ──

    /// Read a key and deserialize its JSON value. Absent key = None.
    pub(crate) fn read_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, SessionError> {
        let Some(bytes) = self.kv.get(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| SessionError::Serialization(e.to_string()))
    }

    /// Serialize a value as JSON and write it under a key.
    pub(crate) fn write_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), SessionError> {
        let json = serde_json::to_vec(value)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.kv.set(key, &json)?;
        Ok(())
    }

    /// Load a directory key as an ordered record list. An absent key is
    /// an empty directory; malformed JSON is an error, not an empty
    /// directory (treating it as empty would let the next signup
    /// overwrite the corrupted data).
    pub(crate) fn read_directory<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Vec<T>, SessionError> {
        Ok(self.read_json(key)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardcraft_core::ServiceError;
    use cardcraft_kv::MemoryStore;

    fn test_kv() -> Arc<dyn KVStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_empty_key_rejected() {
        let config = SessionConfig {
            session_key: String::new(),
            ..Default::default()
        };
        let result = SessionService::new(test_kv(), config);
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_colliding_keys_rejected() {
        let config = SessionConfig {
            users_key: "cardcraft_user".to_string(),
            ..Default::default()
        };
        let result = SessionService::new(test_kv(), config);
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_empty_root_credentials_rejected() {
        let config = SessionConfig {
            root_password: String::new(),
            ..Default::default()
        };
        let result = SessionService::new(test_kv(), config);
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SessionService::new(test_kv(), SessionConfig::default()).is_ok());
    }

    #[test]
    fn test_service_error_conversion() {
        let e: ServiceError = SessionError::Config("bad".into()).into();
        assert_eq!(e.error_code(), "VALIDATION_FAILED");

        let e: ServiceError = SessionError::Storage("io".into()).into();
        assert_eq!(e.error_code(), "STORAGE_ERROR");

        let e: ServiceError = SessionError::Serialization("json".into()).into();
        assert_eq!(e.error_code(), "INTERNAL");
    }
}
