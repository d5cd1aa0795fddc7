use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::Product;

/// Active filter criteria. Every field is optional; an absent or empty value
/// means "match all" for that predicate.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against the product name
    #[serde(default)]
    pub search: Option<String>,
    /// Case-sensitive exact match against the product brand
    #[serde(default)]
    pub brand: Option<String>,
    /// Case-sensitive exact match against the product category
    #[serde(default)]
    pub category: Option<String>,
}

impl FilterCriteria {
    /// A product is included iff ALL active predicates hold (conjunction, no
    /// ranking).
    pub fn matches(&self, product: &Product) -> bool {
        let search_ok = match self.search.as_deref() {
            None | Some("") => true,
            Some(search) => product
                .name
                .to_lowercase()
                .contains(&search.to_lowercase()),
        };
        let brand_ok = match self.brand.as_deref() {
            None | Some("") => true,
            Some(brand) => product.brand == brand,
        };
        let category_ok = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => product.category == category,
        };

        search_ok && brand_ok && category_ok
    }
}

/// The filtered projection of the collection. Stable: output preserves the
/// order of the underlying collection. Never errors; empty input or all-empty
/// criteria are well-defined.
pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

/// Distinct brands present in the *full* collection, first-seen order. Derived
/// from the full collection (not the filtered subset) so choosing a brand
/// never removes other brand options from the filter controls.
pub fn distinct_brands(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.brand.as_str()))
}

/// Distinct categories present in the full collection, first-seen order.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.category.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
