pub mod product;

pub use product::{next_product_id, CatalogDocument, Product, ProductDraft};
