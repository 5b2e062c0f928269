//! Product catalog domain.

pub mod catalog;
pub mod model;
pub mod source;

pub use catalog::{Catalog, CatalogPayload, CatalogState, CatalogStore};
pub use model::{NO_DESCRIPTION, Product, ProductDetails, ProductId};
pub use source::CatalogSource;
