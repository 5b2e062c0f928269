pub mod config;
pub mod conversation;
pub mod error;
pub mod filter;
pub mod persistence;
pub mod product;
pub mod selection;

// Re-export common error type
pub use error::{Result, RoutinaError};

pub use conversation::{ChatMessage, ChatRelay, ChatRole, RelayError, RequestId, Transcript};
pub use filter::FilterCriteria;
pub use persistence::{DisplayDirection, KeyValueStore, PreferencePersistence, SelectionPersistence};
pub use product::{Catalog, CatalogSource, CatalogState, CatalogStore, Product, ProductId};
pub use selection::{SelectionChange, SelectionSet};
