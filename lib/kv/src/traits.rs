use crate::error::KVError;

/// KVStore provides the key-value storage interface the application's
/// components persist through.
///
/// Keys are well-known names owned by individual components
/// (`cardcraft_user`, `cardcraft_users`, ...); values are opaque bytes,
/// JSON text in practice. A key is either present or absent — there is
/// no distinction between "set to empty" and "never set".
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, creating or overwriting.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<(), KVError>;
}
