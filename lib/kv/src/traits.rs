use crate::error::KVError;

/// KVStore provides an ordered key-value storage interface.
///
/// Keys follow a namespaced convention: `car:{id}`, etc. Values are opaque
/// bytes; serialization is the caller's concern.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, overwriting any existing value.
    /// Returns the previous value if the key was already present.
    fn set(&self, key: &str, value: &[u8]) -> Result<Option<Vec<u8>>, KVError>;

    /// Scan all keys matching a prefix. Returns (key, value) pairs in key order.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}
