//! The user's working set of selected products.
//!
//! A selection holds full product copies (not ids) in the order the user
//! picked them. Entries are snapshots taken at selection time: reloading the
//! catalog never touches them.

use std::collections::HashSet;

use tracing::{error, warn};

use crate::error::Result;
use crate::product::{Product, ProductId};

/// What a mutating call did to the selection.
///
/// Every mutation returns exactly one of these; callers use it to drive one
/// persistence write and one render request.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    /// The product was appended to the end.
    Added(ProductId),
    /// The product with this id was removed.
    Removed(ProductId),
    /// All entries were dropped.
    Cleared { removed: usize },
}

/// Order-preserving set of products keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    entries: Vec<Product>,
    revision: u64,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == id)
    }

    /// Removes the member with `product.id` if present, otherwise appends a
    /// copy of `product`.
    pub fn toggle(&mut self, product: &Product) -> SelectionChange {
        let change = match self.position(&product.id) {
            Some(index) => {
                self.entries.remove(index);
                SelectionChange::Removed(product.id.clone())
            }
            None => {
                self.entries.push(product.clone());
                SelectionChange::Added(product.id.clone())
            }
        };
        self.revision += 1;
        change
    }

    /// Removes the member with `id`. Returns `None` when it was not selected.
    pub fn remove(&mut self, id: &ProductId) -> Option<SelectionChange> {
        let index = self.position(id)?;
        self.entries.remove(index);
        self.revision += 1;
        Some(SelectionChange::Removed(id.clone()))
    }

    pub fn clear(&mut self) -> SelectionChange {
        let removed = self.entries.len();
        self.entries.clear();
        self.revision += 1;
        SelectionChange::Cleared { removed }
    }

    /// Replaces the content with a previously serialized selection.
    ///
    /// On a parse failure the selection is left empty, the error is logged,
    /// and returned for callers that want to inspect it.
    pub fn restore(&mut self, serialized: &str) -> Result<()> {
        self.revision += 1;
        match serde_json::from_str::<Vec<Product>>(serialized) {
            Ok(products) => {
                self.entries = dedup_by_id(products);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error loading saved products");
                self.entries.clear();
                Err(e.into())
            }
        }
    }

    /// Serializes to the JSON array form accepted by [`SelectionSet::restore`].
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn products(&self) -> &[Product] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<&ProductId> {
        self.entries.iter().map(|p| &p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Incremented on every mutation, including restores.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|p| &p.id == id)
    }
}

fn dedup_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    let total = products.len();
    let unique: Vec<Product> = products
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "saved selection contained duplicate ids"
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64) -> Product {
        Product::new(id, format!("Product {id}"), "Brand", "serum")
    }

    fn ids(set: &SelectionSet) -> Vec<i64> {
        set.products()
            .iter()
            .map(|p| match &p.id {
                ProductId::Number(n) => n.as_i64().unwrap(),
                ProductId::Text(_) => panic!("unexpected text id"),
            })
            .collect()
    }

    #[test]
    fn test_toggle_appends_in_first_toggle_order() {
        let mut set = SelectionSet::new();
        set.toggle(&product(3));
        set.toggle(&product(1));
        set.toggle(&product(2));
        assert_eq!(ids(&set), vec![3, 1, 2]);
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut set = SelectionSet::new();
        set.toggle(&product(1));
        set.toggle(&product(2));
        let before = set.products().to_vec();

        assert_eq!(set.toggle(&product(5)), SelectionChange::Added(5.into()));
        assert_eq!(set.toggle(&product(5)), SelectionChange::Removed(5.into()));
        assert_eq!(set.products(), before.as_slice());
    }

    #[test]
    fn test_toggle_removes_by_id_and_keeps_order() {
        let mut set = SelectionSet::new();
        set.toggle(&product(1));
        set.toggle(&product(2));

        // a different copy with the same id still removes the member
        let stale_copy = Product::new(1, "Renamed", "Other", "other");
        assert_eq!(set.toggle(&stale_copy), SelectionChange::Removed(1.into()));
        assert_eq!(ids(&set), vec![2]);
    }

    #[test]
    fn test_odd_toggles_stay_selected() {
        let mut set = SelectionSet::new();
        let sequence = [1, 2, 3, 1, 4, 2, 1, 5, 3, 3];
        for id in sequence {
            set.toggle(&product(id));
        }
        // 1 x3, 2 x2, 3 x3, 4 x1, 5 x1; 1 re-added after its second toggle
        assert_eq!(ids(&set), vec![4, 1, 5, 3]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut set = SelectionSet::new();
        set.toggle(&product(1));
        set.toggle(&product(2));

        assert_eq!(set.remove(&99.into()), None);
        assert_eq!(set.remove(&1.into()), Some(SelectionChange::Removed(1.into())));
        assert_eq!(set.clear(), SelectionChange::Cleared { removed: 1 });
        assert!(set.is_empty());
        assert_eq!(set.clear(), SelectionChange::Cleared { removed: 0 });
    }

    #[test]
    fn test_revision_counts_mutations() {
        let mut set = SelectionSet::new();
        assert_eq!(set.revision(), 0);
        set.toggle(&product(1));
        set.toggle(&product(1));
        set.clear();
        assert_eq!(set.revision(), 3);
        set.remove(&product(1).id);
        assert_eq!(set.revision(), 3);
    }

    #[test]
    fn test_serialize_restore_round_trip() {
        let mut set = SelectionSet::new();
        set.toggle(&product(2).with_description("Vitamin C"));
        set.toggle(&product(1));

        let serialized = set.serialize().unwrap();
        let mut restored = SelectionSet::new();
        restored.restore(&serialized).unwrap();
        assert_eq!(restored.products(), set.products());
    }

    #[test]
    fn test_restore_malformed_leaves_empty() {
        let mut set = SelectionSet::new();
        set.toggle(&product(1));

        let err = set.restore("[{\"id\":").unwrap_err();
        assert!(err.is_serialization());
        assert!(set.is_empty());

        assert!(set.restore("{\"not\":\"an array\"}").is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_restore_drops_duplicate_ids() {
        let serialized = serde_json::to_string(&vec![product(1), product(2), product(1)]).unwrap();
        let mut set = SelectionSet::new();
        set.restore(&serialized).unwrap();
        assert_eq!(ids(&set), vec![1, 2]);
    }
}
