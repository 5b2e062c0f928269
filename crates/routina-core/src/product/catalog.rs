//! Catalog and the store that holds it for a session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::model::{Product, ProductId};
use super::source::CatalogSource;
use crate::error::{Result, RoutinaError};
use crate::filter::{self, FilterCriteria};

/// Wire shape of a catalog resource: `{ "products": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPayload {
    pub products: Vec<Product>,
}

impl CatalogPayload {
    /// Parses a catalog document.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// An ordered sequence of products with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(RoutinaError::validation(format!(
                    "duplicate product id '{}' in catalog",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up a user-typed id: an exact match first, then a product whose
    /// id prints the same (typed `7` finds `"7"`).
    pub fn resolve(&self, typed: &ProductId) -> Option<&Product> {
        self.get(typed)
            .or_else(|| self.products.iter().find(|p| p.id.reads_as(typed)))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Products passing `criteria`, in catalog order.
    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        filter::filter(&self.products, criteria)
    }
}

impl TryFrom<CatalogPayload> for Catalog {
    type Error = RoutinaError;

    fn try_from(payload: CatalogPayload) -> Result<Self> {
        Catalog::new(payload.products)
    }
}

/// Load status of the catalog held by a [`CatalogStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogState {
    /// No load has completed yet.
    NotLoaded,
    /// The last load succeeded (the catalog may still be empty).
    Loaded,
    /// The last load failed; the catalog is empty.
    Failed,
}

/// Holds the session's catalog.
///
/// Every `load` replaces the previous content. A failed load leaves the
/// store empty and is reported through `tracing`, never to the caller.
#[derive(Debug)]
pub struct CatalogStore {
    catalog: Catalog,
    state: CatalogState,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::empty(),
            state: CatalogState::NotLoaded,
        }
    }

    /// Fetches the catalog from `source` and replaces the current content.
    ///
    /// Returns the new load state.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> CatalogState {
        let fetched = source
            .fetch()
            .await
            .and_then(Catalog::try_from);

        match fetched {
            Ok(catalog) => {
                info!(
                    source = %source.describe(),
                    count = catalog.len(),
                    "catalog loaded"
                );
                self.catalog = catalog;
                self.state = CatalogState::Loaded;
            }
            Err(e) => {
                error!(source = %source.describe(), error = %e, "Error loading products");
                self.catalog = Catalog::empty();
                self.state = CatalogState::Failed;
            }
        }
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSource(Result<CatalogPayload>);

    #[async_trait]
    impl CatalogSource for StaticSource {
        async fn fetch(&self) -> Result<CatalogPayload> {
            self.0.clone()
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new(1, "Cleanser", "X", "cleanser"),
            Product::new(2, "Serum", "Y", "serum"),
            Product::new(3, "Night Serum", "Z", "serum"),
        ]
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut products = sample();
        products.push(Product::new(2, "Copy", "Y", "serum"));
        let err = Catalog::new(products).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let catalog = Catalog::new(sample()).unwrap();
        assert_eq!(catalog.categories(), vec!["cleanser", "serum"]);
    }

    #[test]
    fn test_payload_parsing() {
        let payload = CatalogPayload::from_json(
            r#"{"products":[{"id":1,"name":"Cleanser","brand":"X","category":"cleanser","image":"c.png"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.products.len(), 1);
        assert!(CatalogPayload::from_json(r#"{"items":[]}"#).is_err());
    }

    #[test]
    fn test_unusual_numeric_ids_still_load() {
        let payload = CatalogPayload::from_json(
            r#"{"products":[
                {"id":1.5,"name":"Toner","brand":"Q","category":"toner","image":""},
                {"id":18446744073709551615,"name":"Mask","brand":"Q","category":"mask","image":""},
                {"id":-4,"name":"Balm","brand":"Q","category":"balm","image":""}
            ]}"#,
        )
        .unwrap();
        let catalog = Catalog::try_from(payload).unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(&ProductId::parse("1.5")));
        assert!(catalog.contains(&ProductId::parse("18446744073709551615")));
        assert!(catalog.contains(&ProductId::from(-4)));
    }

    #[test]
    fn test_resolve_matches_text_ids_typed_as_numbers() {
        let catalog = Catalog::new(vec![
            Product::new("007", "Agent Serum", "Bond", "serum"),
            Product::new("12", "Eye Cream", "Y", "moisturizer"),
            Product::new(3, "Cleanser", "X", "cleanser"),
        ])
        .unwrap();

        assert_eq!(catalog.resolve(&ProductId::parse("007")).unwrap().name, "Agent Serum");
        assert_eq!(catalog.resolve(&ProductId::parse("12")).unwrap().name, "Eye Cream");
        assert_eq!(catalog.resolve(&ProductId::parse("3")).unwrap().name, "Cleanser");
        assert!(catalog.resolve(&ProductId::parse("7")).is_none());
    }

    #[test]
    fn test_resolve_prefers_exact_match() {
        let catalog = Catalog::new(vec![
            Product::new("5", "Text Five", "A", "x"),
            Product::new(5, "Number Five", "B", "x"),
        ])
        .unwrap();
        assert_eq!(catalog.resolve(&ProductId::from(5)).unwrap().name, "Number Five");
        assert_eq!(catalog.resolve(&ProductId::from("5")).unwrap().name, "Text Five");
    }

    #[tokio::test]
    async fn test_load_replaces_content() {
        let mut store = CatalogStore::new();
        assert_eq!(store.state(), CatalogState::NotLoaded);

        let first = StaticSource(Ok(CatalogPayload { products: sample() }));
        assert_eq!(store.load(&first).await, CatalogState::Loaded);
        assert_eq!(store.catalog().len(), 3);

        let second = StaticSource(Ok(CatalogPayload {
            products: vec![Product::new(9, "Toner", "Q", "toner")],
        }));
        store.load(&second).await;
        assert_eq!(store.catalog().len(), 1);
        assert!(store.catalog().contains(&ProductId::from(9)));
    }

    #[tokio::test]
    async fn test_failed_load_leaves_empty_catalog() {
        let mut store = CatalogStore::new();
        store
            .load(&StaticSource(Ok(CatalogPayload { products: sample() })))
            .await;

        let broken = StaticSource(Err(RoutinaError::io("connection refused")));
        assert_eq!(store.load(&broken).await, CatalogState::Failed);
        assert!(store.catalog().is_empty());
        assert_eq!(store.state(), CatalogState::Failed);
    }
}
