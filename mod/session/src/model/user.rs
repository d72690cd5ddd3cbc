use serde::{Deserialize, Serialize};

/// Role carried by a session.
///
/// `Business` is never produced by any login path in this module, but
/// snapshots written by other components may carry it, so it stays a
/// legal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Individual,
    Business,
    Superadmin,
    Admin,
}

/// The role a caller is attempting to authenticate as.
///
/// Individual logins check the users directory; superadmin logins check
/// the configured root pair, then the admin directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginIntent {
    Individual,
    Superadmin,
}

/// The currently signed-in identity.
///
/// Created on successful login/signup, replaced on re-login, cleared on
/// logout. Serialized as the session snapshot; never contains a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Unique identifier. Copied from the matched record, or the fixed
    /// root id for the configured superadmin pair.
    pub id: String,

    /// Email address as entered at login/signup.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Role granted by the login path that produced this session.
    pub role: Role,
}

/// A signup record in the users directory.
///
/// The password is stored as entered; comparison semantics live behind
/// [`crate::verify::PasswordVerifier`]. Field names follow the directory's
/// wire format (`createdAt`), which other components read and write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Email address. Unique within the directory.
    pub email: String,

    /// Credential, stored as entered.
    pub password: String,

    /// Display name.
    pub name: String,

    /// Subscription plan. New signups start on `"Free"`.
    pub plan: String,

    /// Account status. New signups start as `"Active"`.
    pub status: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}
