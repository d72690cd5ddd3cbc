use crate::model::{AdminRecord, AuthUser, LoginIntent, Role, UserRecord};
use crate::service::{SessionError, SessionService};

/// Fixed identity granted to the configured root credential pair.
pub(crate) const ROOT_USER_ID: &str = "admin-1";
pub(crate) const ROOT_USER_NAME: &str = "Super Admin";

impl SessionService {
    /// Attempt to authenticate as `intent`.
    ///
    /// Returns `Ok(true)` and establishes a session iff a matching
    /// credential pair exists for that intent; `Ok(false)` leaves any
    /// prior session untouched. Email matching is case-sensitive exact
    /// equality; when a directory holds duplicate emails the first
    /// record in storage order wins.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        intent: LoginIntent,
    ) -> Result<bool, SessionError> {
        match intent {
            LoginIntent::Superadmin => self.login_superadmin(email, password),
            LoginIntent::Individual => self.login_individual(email, password),
        }
    }

    fn login_superadmin(&self, email: &str, password: &str) -> Result<bool, SessionError> {
        // The configured root pair is the only path to a superadmin
        // session.
        if email == self.config.root_email
            && self.verifier.verify(password, &self.config.root_password)
        {
            self.establish(AuthUser {
                id: ROOT_USER_ID.to_string(),
                email: email.to_string(),
                name: ROOT_USER_NAME.to_string(),
                role: Role::Superadmin,
            })?;
            return Ok(true);
        }

        // Admin members authenticate through the same intent but are
        // granted the admin role, not superadmin.
        let admins: Vec<AdminRecord> = self.read_directory(&self.config.admins_key)?;
        if let Some(found) = admins
            .iter()
            .find(|a| a.email == email && self.verifier.verify(password, &a.password))
        {
            self.establish(AuthUser {
                id: found.id.clone(),
                email: found.email.clone(),
                name: found.name.clone(),
                role: Role::Admin,
            })?;
            return Ok(true);
        }

        Ok(false)
    }

    fn login_individual(&self, email: &str, password: &str) -> Result<bool, SessionError> {
        let users: Vec<UserRecord> = self.read_directory(&self.config.users_key)?;
        if let Some(found) = users
            .iter()
            .find(|u| u.email == email && self.verifier.verify(password, &u.password))
        {
            // The password never enters the session object.
            self.establish(AuthUser {
                id: found.id.clone(),
                email: found.email.clone(),
                name: found.name.clone(),
                role: Role::Individual,
            })?;
            return Ok(true);
        }

        Ok(false)
    }
}
