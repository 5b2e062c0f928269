//! Catalog sources: local JSON file and HTTP resource.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use routina_core::error::{Result, RoutinaError};
use routina_core::product::{CatalogPayload, CatalogSource};
use tracing::debug;

/// Reads the catalog from a JSON file on disk.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<CatalogPayload> {
        debug!(path = %self.path.display(), "reading catalog file");
        let body = tokio::fs::read_to_string(&self.path).await?;
        CatalogPayload::from_json(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the catalog with a single GET request.
///
/// The status code is not inspected: whatever body comes back must parse as
/// a catalog document or the fetch fails.
#[derive(Clone)]
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<CatalogPayload> {
        debug!(url = %self.url, "fetching catalog");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RoutinaError::io(format!("catalog request failed: {e}")))?;
        let body = response
            .text()
            .await
            .map_err(|e| RoutinaError::io(format!("failed to read catalog body: {e}")))?;
        CatalogPayload::from_json(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks the source kind from the location: `http://` / `https://` URLs are
/// fetched over HTTP, anything else is a file path.
pub fn catalog_source_for(location: &str) -> Arc<dyn CatalogSource> {
    let trimmed = location.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Arc::new(HttpCatalogSource::new(trimmed))
    } else {
        Arc::new(FileCatalogSource::new(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_source_reads_payload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"products":[{"id":1,"name":"Cleanser","brand":"X","category":"cleanser","image":"c.png"}]}"#,
        )
        .unwrap();

        let payload = FileCatalogSource::new(&path).fetch().await.unwrap();
        assert_eq!(payload.products.len(), 1);
        assert_eq!(payload.products[0].name, "Cleanser");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileCatalogSource::new(temp_dir.path().join("absent.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_source_selection_by_scheme() {
        assert!(catalog_source_for("https://cdn.example.com/products.json")
            .describe()
            .starts_with("https://"));
        assert_eq!(catalog_source_for("products.json").describe(), "products.json");
    }
}
