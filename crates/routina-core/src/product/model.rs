//! Product domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Stable product identifier as it appears in the catalog payload.
///
/// Catalog sources emit either numeric or string ids. Any JSON number is
/// accepted (floats and integers beyond `i64` included) and the original
/// form is kept so a persisted selection serializes back to exactly what was
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(Number),
    Text(String),
}

impl ProductId {
    /// Parses user-typed input. Input that reads as a JSON number becomes a
    /// numeric id; anything else (`"007"` included) stays text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match serde_json::from_str::<Number>(trimmed) {
            Ok(n) => ProductId::Number(n),
            Err(_) => ProductId::Text(trimmed.to_string()),
        }
    }

    /// Whether both ids print the same, e.g. a typed `7` and a catalog `"7"`.
    pub fn reads_as(&self, other: &ProductId) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        ProductId::Number(Number::from(value))
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        ProductId::Number(Number::from(value))
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        ProductId::Text(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        ProductId::Text(value)
    }
}

/// An immutable catalog record.
///
/// Only the display fields are typed. Any other field present in the source
/// record is carried in `extra` so that a selected copy is a full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a product with the required display fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            image: String::new(),
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Text shown for a product without a description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// The "More Info" view of a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    pub name: String,
    pub brand: String,
    pub description: String,
}

impl From<&Product> for ProductDetails {
    fn from(product: &Product) -> Self {
        let description = product
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            description,
        }
    }
}
