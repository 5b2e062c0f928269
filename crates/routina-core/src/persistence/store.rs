//! Durable string key-value storage trait.

use crate::error::Result;

/// A durable, string-keyed store holding string values.
///
/// Stands in for the browser's origin-scoped local storage. Implementations
/// live in `routina-infrastructure`.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
