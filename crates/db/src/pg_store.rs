//! Postgres-backed [`CatalogStore`].

use async_trait::async_trait;
use serde_json::Value;
use vitrine_core::category::Category;
use vitrine_core::product::{Product, ProductOrder};
use vitrine_core::store::{CatalogStore, StoreError, WriteBatch};

use crate::repositories::{CategoryRepo, ProductRepo, SettingRepo};
use crate::DbPool;

/// Store backed by the `products`, `categories` and `settings` tables.
///
/// The pool is created by the process entry point and handed in; closing it
/// is the caller's job too.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Database error");
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(unavailable)
    }

    async fn list_products(&self, order: ProductOrder) -> Result<Vec<Product>, StoreError> {
        ProductRepo::list(&self.pool, order).await.map_err(unavailable)
    }

    async fn find_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        ProductRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)
    }

    async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, StoreError> {
        ProductRepo::list_by_category(&self.pool, category)
            .await
            .map_err(unavailable)
    }

    async fn product_ids(&self) -> Result<Vec<String>, StoreError> {
        ProductRepo::ids(&self.pool).await.map_err(unavailable)
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
        ProductRepo::upsert(&self.pool, product)
            .await
            .map_err(unavailable)
    }

    async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        ProductRepo::delete(&self.pool, id)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        ProductRepo::apply_batch(&self.pool, &batch)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, ops = batch.len(), "Batch commit rolled back");
                StoreError::Commit(err.to_string())
            })
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        CategoryRepo::list(&self.pool).await.map_err(unavailable)
    }

    async fn find_category(&self, id: &str) -> Result<Option<Category>, StoreError> {
        CategoryRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), StoreError> {
        CategoryRepo::upsert(&self.pool, category)
            .await
            .map_err(unavailable)
    }

    async fn delete_category(&self, id: &str) -> Result<(), StoreError> {
        CategoryRepo::delete(&self.pool, id)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, StoreError> {
        SettingRepo::get(&self.pool, key).await.map_err(unavailable)
    }

    async fn put_setting(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        SettingRepo::put(&self.pool, key, value)
            .await
            .map_err(unavailable)
    }
}
