//! Property-based tests for the catalog core.
//!
//! These exercise the pure pieces (id assignment, filter predicates) across a
//! wide range of generated collections, catching edge cases the example-based
//! tests miss.

use proptest::prelude::*;
use rust_decimal::Decimal;

use catalog_api::models::{next_product_id, Product};
use catalog_api::services::filter::{
    distinct_brands, filter_products, FilterCriteria,
};

fn brand_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Acme".to_string()),
        Just("Zenith".to_string()),
        Just("Norte".to_string()),
    ]
}

fn category_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Footwear".to_string()),
        Just("Accessories".to_string()),
        Just("Apparel".to_string()),
    ]
}

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        1i64..10_000,
        "[A-Za-z ]{0,16}",
        brand_strategy(),
        category_strategy(),
        0u32..1_000_000,
    )
        .prop_map(|(id, name, brand, category, cents)| Product {
            id,
            name,
            brand,
            category,
            color: "Red".to_string(),
            price: Decimal::new(cents as i64, 2),
            image: String::new(),
        })
}

fn collection_strategy() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(product_strategy(), 0..24).prop_map(|mut products| {
        // The store invariant: ids are unique within the collection
        products.sort_by_key(|p| p.id);
        products.dedup_by_key(|p| p.id);
        products
    })
}

proptest! {
    #[test]
    fn assigned_id_exceeds_every_existing_id(products in collection_strategy()) {
        let id = next_product_id(&products);
        prop_assert!(products.iter().all(|p| p.id < id));
    }

    #[test]
    fn assigning_then_inserting_preserves_uniqueness(products in collection_strategy()) {
        let mut products = products;
        let id = next_product_id(&products);
        products.push(Product {
            id,
            name: "New Item".to_string(),
            brand: "Acme".to_string(),
            category: "Footwear".to_string(),
            color: "Red".to_string(),
            price: Decimal::ZERO,
            image: String::new(),
        });

        let mut ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), products.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn filter_is_a_conjunction_of_the_three_predicates(
        products in collection_strategy(),
        search in "[A-Za-z]{0,4}",
        brand in brand_strategy(),
        category in category_strategy(),
    ) {
        let criteria = FilterCriteria {
            search: Some(search.clone()),
            brand: Some(brand.clone()),
            category: Some(category.clone()),
        };
        let filtered = filter_products(&products, &criteria);

        for product in &products {
            let expected = product.name.to_lowercase().contains(&search.to_lowercase())
                && product.brand == brand
                && product.category == category;
            let included = filtered.iter().any(|p| p.id == product.id);
            prop_assert_eq!(included, expected, "product {} inclusion mismatch", product.id);
        }
    }

    #[test]
    fn empty_criteria_return_the_collection_unchanged(products in collection_strategy()) {
        let filtered = filter_products(&products, &FilterCriteria::default());
        prop_assert_eq!(filtered, products);
    }

    #[test]
    fn filtered_output_preserves_collection_order(
        products in collection_strategy(),
        brand in brand_strategy(),
    ) {
        let criteria = FilterCriteria { brand: Some(brand), ..Default::default() };
        let filtered = filter_products(&products, &criteria);

        let positions: Vec<usize> = filtered
            .iter()
            .map(|f| products.iter().position(|p| p.id == f.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn distinct_brands_is_exactly_the_brand_set(products in collection_strategy()) {
        let brands = distinct_brands(&products);

        // No duplicates
        let mut sorted = brands.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), brands.len());

        // Same membership as the collection's brands
        for product in &products {
            prop_assert!(brands.contains(&product.brand));
        }
        for brand in &brands {
            prop_assert!(products.iter().any(|p| &p.brand == brand));
        }
    }
}
