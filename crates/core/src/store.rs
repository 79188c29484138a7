//! Document store abstraction shared by the Postgres and in-memory backends.
//!
//! A backend owns three flat collections: `products` and `categories`
//! keyed by document id, and `settings` keyed by a string key. The only
//! multi-document primitive is [`CatalogStore::commit`], which must apply a
//! [`WriteBatch`] atomically: every operation lands or none does.

use async_trait::async_trait;
use serde_json::Value;

use crate::category::Category;
use crate::product::{Product, ProductOrder};

/// Errors reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or a read/write failed.
    #[error("store backend unavailable: {0}")]
    Unavailable(String),

    /// An atomic batch was rejected; none of its operations were applied.
    #[error("batch commit rejected: {0}")]
    Commit(String),
}

/// A single mutation inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    DeleteProduct(String),
    UpsertProduct(Product),
}

/// Ordered list of product mutations committed as one unit.
///
/// Operations apply in insertion order, so a delete followed by an upsert of
/// the same id leaves the upserted document in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_product(&mut self, id: impl Into<String>) {
        self.ops.push(WriteOp::DeleteProduct(id.into()));
    }

    pub fn upsert_product(&mut self, product: Product) {
        self.ops.push(WriteOp::UpsertProduct(product));
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Backend operations the catalog adapter is built on.
///
/// Point lookups return `Ok(None)` for missing documents. Deletes of missing
/// documents succeed.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Cheap round-trip used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn list_products(&self, order: ProductOrder) -> Result<Vec<Product>, StoreError>;

    async fn find_product(&self, id: &str) -> Result<Option<Product>, StoreError>;

    /// Products whose `category` equals `category`, ordered by name.
    async fn list_products_by_category(&self, category: &str)
        -> Result<Vec<Product>, StoreError>;

    /// Ids of every persisted product (the replace-all snapshot).
    async fn product_ids(&self) -> Result<Vec<String>, StoreError>;

    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError>;

    async fn delete_product(&self, id: &str) -> Result<(), StoreError>;

    /// Apply every operation of `batch` atomically.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn find_category(&self, id: &str) -> Result<Option<Category>, StoreError>;

    async fn upsert_category(&self, category: &Category) -> Result<(), StoreError>;

    async fn delete_category(&self, id: &str) -> Result<(), StoreError>;

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn put_setting(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}
