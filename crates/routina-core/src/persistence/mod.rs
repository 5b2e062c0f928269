//! Persistence boundary: key-value storage and the adapters built on it.

pub mod adapter;
pub mod store;

pub use adapter::{
    DIRECTION_KEY, DisplayDirection, PreferencePersistence, SELECTION_KEY, SelectionPersistence,
};
pub use store::KeyValueStore;
