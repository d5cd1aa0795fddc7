use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::{
    errors::ServiceError,
    models::{next_product_id, CatalogDocument, Product, ProductDraft},
};

/// The catalog store: owns the authoritative in-memory product collection and
/// mediates all mutation. The collection is loaded once at startup; every
/// create, update or delete replaces the in-memory state and writes the full
/// document back to disk.
///
/// The mutex is held across the whole mutate-then-persist span, so a second
/// mutation can never interleave with an outstanding persist and write a
/// stale or mixed snapshot.
#[derive(Clone)]
pub struct CatalogStore {
    path: Arc<PathBuf>,
    products: Arc<Mutex<Vec<Product>>>,
}

impl CatalogStore {
    /// Loads the catalog document from `path`. A missing or unreadable file
    /// is not fatal: the store starts with an empty collection so the
    /// application stays usable for building a catalog from scratch.
    #[instrument]
    pub async fn load(path: impl Into<PathBuf> + std::fmt::Debug) -> Self {
        let path = path.into();
        let products = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<CatalogDocument>(&bytes) {
                Ok(document) => {
                    info!(
                        path = %path.display(),
                        count = document.products.len(),
                        "Catalog loaded"
                    );
                    document.products
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "Catalog document is malformed; starting with an empty collection"
                    );
                    Vec::new()
                }
            },
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Catalog document unavailable; starting with an empty collection"
                );
                Vec::new()
            }
        };

        Self {
            path: Arc::new(path),
            products: Arc::new(Mutex::new(products)),
        }
    }

    /// Read-only snapshot of the current collection, in stored order.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.lock().await.clone()
    }

    /// Fetch a single product by id.
    pub async fn get(&self, id: i64) -> Option<Product> {
        self.products.lock().await.iter().find(|p| p.id == id).cloned()
    }

    /// Create a new product from a draft. The store assigns an id greater
    /// than every existing id, appends, and persists the full collection.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let mut products = self.products.lock().await;

        let product = draft.into_product(next_product_id(&products));
        products.push(product.clone());
        self.persist(&products).await?;

        info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replace the entry whose id matches `product`, preserving its ordinal
    /// position so listings do not reshuffle. Fails with `NotFound` if no
    /// entry has that id.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn update(&self, product: Product) -> Result<Product, ServiceError> {
        let mut products = self.products.lock().await;

        let position = products
            .iter()
            .position(|p| p.id == product.id)
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product with id {} not found", product.id))
            })?;

        products[position] = product.clone();
        self.persist(&products).await?;

        info!(product_id = product.id, "Product updated");
        Ok(product)
    }

    /// Remove the entry with `id` if present. Deleting a nonexistent id is a
    /// no-op, not an error; nothing is rewritten in that case.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut products = self.products.lock().await;

        let Some(position) = products.iter().position(|p| p.id == id) else {
            info!(product_id = id, "Delete of unknown product ignored");
            return Ok(());
        };

        products.remove(position);
        self.persist(&products).await?;

        info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// Serialize the full collection to disk, overwriting any previous
    /// content. This is the only write path. A failure is surfaced to the
    /// caller; the in-memory mutation already applied is NOT rolled back, so
    /// memory and disk may diverge until the next successful persist.
    async fn persist(&self, products: &[Product]) -> Result<(), ServiceError> {
        let document = CatalogDocument {
            products: products.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&document).map_err(|err| {
            error!(error = %err, "Failed to serialize catalog document");
            ServiceError::InternalError(format!("failed to serialize catalog: {err}"))
        })?;

        tokio::fs::write(self.path.as_ref(), bytes).await.map_err(|err| {
            error!(
                path = %self.path.display(),
                error = %err,
                "Failed to persist catalog document"
            );
            ServiceError::StorageUnavailable(format!(
                "failed to write {}: {err}",
                self.path.display()
            ))
        })
    }
}
