//! Catalog source trait.

use async_trait::async_trait;

use super::catalog::CatalogPayload;
use crate::error::Result;

/// Where a catalog is fetched from.
///
/// A single fetch per call, no retry. Implementations live in
/// `routina-infrastructure` (file and HTTP).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches and parses the catalog resource.
    async fn fetch(&self) -> Result<CatalogPayload>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}
