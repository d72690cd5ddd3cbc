use cardcraft_core::{new_id, now_rfc3339};

use crate::model::{AuthUser, Role, UserRecord};
use crate::service::{SessionError, SessionService};

/// Plan assigned to every new signup.
pub(crate) const DEFAULT_PLAN: &str = "Free";
/// Status assigned to every new signup.
pub(crate) const DEFAULT_STATUS: &str = "Active";

impl SessionService {
    /// Register a new user and sign them in.
    ///
    /// Returns `Ok(false)` without any state change if the email is
    /// already present in the users directory (case-sensitive exact
    /// match). Otherwise appends the new record, notifies users-changed
    /// subscribers, establishes an individual session for the new user,
    /// and returns `Ok(true)`.
    pub fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<bool, SessionError> {
        let mut users: Vec<UserRecord> = self.read_directory(&self.config.users_key)?;
        if users.iter().any(|u| u.email == email) {
            return Ok(false);
        }

        // Ids are random; collisions are not checked for.
        let record = UserRecord {
            id: new_id(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            plan: DEFAULT_PLAN.to_string(),
            status: DEFAULT_STATUS.to_string(),
            created_at: now_rfc3339(),
        };
        let user = AuthUser {
            id: record.id.clone(),
            email: record.email.clone(),
            name: record.name.clone(),
            role: Role::Individual,
        };

        users.push(record);
        self.write_json(&self.config.users_key, &users)?;

        // Other components cache the directory; tell them it moved
        // before the new user's session appears.
        self.listeners.notify();

        self.establish(user)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use cardcraft_kv::{KVStore, MemoryStore};

    use crate::model::{Role, UserRecord};
    use crate::service::{SessionConfig, SessionService};

    fn test_kv() -> Arc<dyn KVStore> {
        Arc::new(MemoryStore::new())
    }

    fn test_service(kv: &Arc<dyn KVStore>) -> Arc<SessionService> {
        SessionService::new(Arc::clone(kv), SessionConfig::default()).unwrap()
    }

    fn stored_users(kv: &Arc<dyn KVStore>) -> Vec<UserRecord> {
        serde_json::from_slice(&kv.get("cardcraft_users").unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_signup_establishes_individual_session() {
        let kv = test_kv();
        let svc = test_service(&kv);

        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());
        assert!(svc.is_authenticated());

        let user = svc.current().unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.role, Role::Individual);
        assert_eq!(user.id.len(), 32);
    }

    #[test]
    fn test_signup_record_defaults() {
        let kv = test_kv();
        let svc = test_service(&kv);
        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());

        let users = stored_users(&kv);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].plan, "Free");
        assert_eq!(users[0].status, "Active");
        assert_eq!(users[0].password, "pw");
        assert!(users[0].created_at.contains('T'));
    }

    #[test]
    fn test_signup_directory_wire_format() {
        let kv = test_kv();
        let svc = test_service(&kv);
        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());

        // Other components read this key; the timestamp field keeps its
        // camelCase wire spelling.
        let raw: serde_json::Value =
            serde_json::from_slice(&kv.get("cardcraft_users").unwrap().unwrap()).unwrap();
        assert!(raw[0].get("createdAt").is_some());
        assert!(raw[0].get("created_at").is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let kv = test_kv();
        let svc = test_service(&kv);

        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());
        svc.logout().unwrap();

        // Same email, different everything else.
        assert!(!svc.signup("a@x.com", "pw2", "Alice2").unwrap());
        assert_eq!(stored_users(&kv).len(), 1);
        assert!(!svc.is_authenticated());
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let kv = test_kv();
        let svc = test_service(&kv);

        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());
        assert!(svc.signup("A@x.com", "pw", "Alice").unwrap());
        assert_eq!(stored_users(&kv).len(), 2);
    }

    #[test]
    fn test_signup_appends_in_order() {
        let kv = test_kv();
        let svc = test_service(&kv);

        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());
        assert!(svc.signup("b@x.com", "pw", "Bob").unwrap());

        let users = stored_users(&kv);
        assert_eq!(users[0].email, "a@x.com");
        assert_eq!(users[1].email, "b@x.com");
    }

    #[test]
    fn test_signup_notifies_subscribers_once() {
        let kv = test_kv();
        let svc = test_service(&kv);

        let count = Arc::new(AtomicUsize::new(0));
        let count2 = Arc::clone(&count);
        svc.subscribe_users_changed(Arc::new(move || {
            count2.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // A rejected signup must not broadcast.
        assert!(!svc.signup("a@x.com", "pw2", "Alice2").unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribed_handler_not_called() {
        let kv = test_kv();
        let svc = test_service(&kv);

        let count = Arc::new(AtomicUsize::new(0));
        let count2 = Arc::clone(&count);
        let id = svc.subscribe_users_changed(Arc::new(move || {
            count2.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(svc.unsubscribe_users_changed(id));

        assert!(svc.signup("a@x.com", "pw", "Alice").unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
