use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog entry. Identity lives in `id`; `brand` and `category` are the
/// exact-match filter keys, `name` is the free-text search target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique within the collection; assigned by the store, never by callers.
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Red Shoe")]
    pub name: String,
    #[schema(example = "Acme")]
    pub brand: String,
    #[schema(example = "Footwear")]
    pub category: String,
    #[schema(example = "Red")]
    pub color: String,
    /// Non-negative; serialized as a plain JSON number in the catalog document.
    #[schema(example = 100)]
    pub price: Decimal,
    /// URI/path reference; resolution is the presentation layer's concern.
    #[schema(example = "https://cdn.example.com/products/red-shoe.jpg")]
    pub image: String,
}

/// A product value not yet committed to the collection. The store turns a
/// draft into a [`Product`] by assigning the next free id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub color: String,
    pub price: Decimal,
    pub image: String,
}

impl ProductDraft {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            color: self.color,
            price: self.price,
            image: self.image,
        }
    }
}

/// Persisted layout: a single document holding the one named collection.
/// Whole-document read on load, whole-document overwrite on every mutation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub products: Vec<Product>,
}

/// Next id for a created product: greater than every existing id at
/// assignment time, `1` for an empty collection. Callers must not assume
/// density beyond that.
pub fn next_product_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("Item {id}"),
            brand: "Acme".into(),
            category: "Footwear".into(),
            color: "Red".into(),
            price: dec!(100),
            image: String::new(),
        }
    }

    #[test]
    fn next_id_on_empty_collection_is_one() {
        assert_eq!(next_product_id(&[]), 1);
    }

    #[test]
    fn next_id_exceeds_every_existing_id() {
        let products = vec![product(3), product(1), product(5)];
        assert_eq!(next_product_id(&products), 6);
    }

    #[test]
    fn next_id_ignores_gaps() {
        let products = vec![product(2), product(9)];
        assert_eq!(next_product_id(&products), 10);
    }
}
