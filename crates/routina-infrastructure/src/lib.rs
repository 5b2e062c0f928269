pub mod catalog_source;
pub mod paths;
pub mod storage;

pub use crate::catalog_source::{FileCatalogSource, HttpCatalogSource, catalog_source_for};
pub use crate::paths::{PathError, RoutinaPaths};
pub use crate::storage::{ConfigStorage, InMemoryKeyValueStore, JsonFileKeyValueStore};
