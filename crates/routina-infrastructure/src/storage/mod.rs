//! Storage layer: atomic files, key-value stores, config file.

mod atomic_json;
mod config_storage;
mod key_value;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use config_storage::ConfigStorage;
pub use key_value::{InMemoryKeyValueStore, JsonFileKeyValueStore};
