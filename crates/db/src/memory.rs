//! In-memory [`CatalogStore`] for tests and database-less local runs.
//!
//! Batches are applied to a staged copy of the product map which replaces
//! the live map only once every operation succeeded, so a failed commit
//! leaves nothing behind.
//!
//! ## Limitations
//!
//! - **Single-process only**: nothing is shared across processes
//! - **No persistence**: all documents are lost when the process exits

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use vitrine_core::category::Category;
use vitrine_core::product::{Product, ProductOrder};
use vitrine_core::store::{CatalogStore, StoreError, WriteBatch, WriteOp};

#[derive(Debug, Default)]
struct Collections {
    products: BTreeMap<String, Product>,
    categories: BTreeMap<String, Category>,
    settings: BTreeMap<String, Value>,
    /// Fail the next commit once this many operations have been staged.
    commit_fault: Option<usize>,
}

#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    collections: RwLock<Collections>,
    unavailable: AtomicBool,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next [`CatalogStore::commit`] fail after staging `ops`
    /// operations. The fault is consumed by that commit.
    pub async fn fail_next_commit_after(&self, ops: usize) {
        self.collections.write().await.commit_fault = Some(ops);
    }

    /// Simulate a lost backend connection: every call fails until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn list_products(&self, order: ProductOrder) -> Result<Vec<Product>, StoreError> {
        self.check_available()?;
        let mut products: Vec<Product> = self
            .collections
            .read()
            .await
            .products
            .values()
            .cloned()
            .collect();
        order.sort(&mut products);
        Ok(products)
    }

    async fn find_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        self.check_available()?;
        Ok(self.collections.read().await.products.get(id).cloned())
    }

    async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, StoreError> {
        self.check_available()?;
        let mut products: Vec<Product> = self
            .collections
            .read()
            .await
            .products
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        ProductOrder::Name.sort(&mut products);
        Ok(products)
    }

    async fn product_ids(&self) -> Result<Vec<String>, StoreError> {
        self.check_available()?;
        Ok(self
            .collections
            .read()
            .await
            .products
            .keys()
            .cloned()
            .collect())
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
        self.check_available()?;
        self.collections
            .write()
            .await
            .products
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        self.check_available()?;
        self.collections.write().await.products.remove(id);
        Ok(())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let fault = collections.commit_fault.take();

        let mut staged = collections.products.clone();
        for (applied, op) in batch.into_ops().into_iter().enumerate() {
            if fault == Some(applied) {
                return Err(StoreError::Commit(format!(
                    "injected fault after {applied} operations"
                )));
            }
            match op {
                WriteOp::DeleteProduct(id) => {
                    staged.remove(&id);
                }
                WriteOp::UpsertProduct(product) => {
                    staged.insert(product.id.clone(), product);
                }
            }
        }

        collections.products = staged;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.check_available()?;
        let mut categories: Vec<Category> = self
            .collections
            .read()
            .await
            .categories
            .values()
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn find_category(&self, id: &str) -> Result<Option<Category>, StoreError> {
        self.check_available()?;
        Ok(self.collections.read().await.categories.get(id).cloned())
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), StoreError> {
        self.check_available()?;
        self.collections
            .write()
            .await
            .categories
            .insert(category.id.clone(), category.clone());
        Ok(())
    }

    async fn delete_category(&self, id: &str) -> Result<(), StoreError> {
        self.check_available()?;
        self.collections.write().await.categories.remove(id);
        Ok(())
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.check_available()?;
        Ok(self.collections.read().await.settings.get(key).cloned())
    }

    async fn put_setting(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.check_available()?;
        self.collections
            .write()
            .await
            .settings
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
