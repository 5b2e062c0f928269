//! Catalog filtering by category and free-text search.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Transient filter input. Empty strings mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact, case-sensitive category match.
    pub category: String,
    /// Case-insensitive substring over name, brand and description.
    pub search_term: String,
}

impl FilterCriteria {
    pub fn new(category: impl Into<String>, search_term: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search_term: search_term.into(),
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self::new(category, "")
    }

    pub fn search(search_term: impl Into<String>) -> Self {
        Self::new("", search_term)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category.is_empty() || product.category == self.category
    }

    fn matches_search(&self, needle: &str, product: &Product) -> bool {
        if needle.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(needle)
            || product.brand.to_lowercase().contains(needle)
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Returns the products passing `criteria`, preserving input order.
pub fn filter<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let needle = criteria.search_term.to_lowercase();
    products
        .iter()
        .filter(|p| criteria.matches_category(p) && criteria.matches_search(&needle, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Cleanser", "X", "cleanser"),
            Product::new(2, "Serum", "Y", "serum"),
            Product::new(3, "Moisturizer", "CeraVe", "moisturizer")
                .with_description("Daily lotion with ceramides"),
            Product::new(4, "Eye Cream", "Y", "moisturizer"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_unconstrained_filter_is_identity() {
        let products = catalog();
        let result = filter(&products, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_category_is_exact_and_case_sensitive() {
        let products = catalog();
        let result = filter(&products, &FilterCriteria::category("serum"));
        assert_eq!(ids(&result), vec!["2"]);

        let result = filter(&products, &FilterCriteria::category("Serum"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_on_name_is_case_insensitive() {
        let products = catalog();
        for term in ["serum", "SERUM", "SeRuM"] {
            let result = filter(&products, &FilterCriteria::search(term));
            assert_eq!(ids(&result), vec!["2"], "term {term}");
        }
    }

    #[test]
    fn test_search_is_plain_substring() {
        // "Cleanser" ends in "ser", so both names match
        let products = catalog();
        let result = filter(&products, &FilterCriteria::search("SER"));
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn test_search_covers_brand_and_description() {
        let products = catalog();
        let by_brand = filter(&products, &FilterCriteria::search("y"));
        // brand "Y" on 2, "Eye" on 4, "Daily" in the description of 3
        assert_eq!(ids(&by_brand), vec!["2", "3", "4"]);

        let by_description = filter(&products, &FilterCriteria::search("ceramides"));
        assert_eq!(ids(&by_description), vec!["3"]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let products = catalog();
        let result = filter(&products, &FilterCriteria::new("moisturizer", "eye"));
        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_refiltering_output_is_stable() {
        let products = catalog();
        let criteria = FilterCriteria::new("moisturizer", "e");
        let once: Vec<Product> = filter(&products, &criteria).into_iter().cloned().collect();
        let twice: Vec<Product> = filter(&once, &criteria).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_match_is_empty() {
        let products = catalog();
        assert!(filter(&products, &FilterCriteria::search("sunscreen")).is_empty());
    }
}
