use serde::{Deserialize, Serialize};

/// An admin credential record in the admin directory.
///
/// Read-only from this module's perspective; the directory is managed
/// elsewhere. A matching record authenticates with role `Admin`, never
/// `Superadmin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    /// Unique identifier.
    pub id: String,

    /// Email address.
    pub email: String,

    /// Credential, stored as entered.
    pub password: String,

    /// Display name.
    pub name: String,
}
