//! Cached storefront listing.
//!
//! `GET /products` serves the full name-ordered catalog from memory. The
//! cache is registered as a [`CommitHook`] on the catalog, so every
//! committed write drops it and the next read reloads from the store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrine_core::catalog::{Catalog, CommitHook};
use vitrine_core::error::CoreError;
use vitrine_core::product::{Product, ProductOrder};

#[derive(Debug, Default)]
pub struct CatalogCache {
    products: RwLock<Option<Arc<Vec<Product>>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached listing, loading it from `catalog` on a miss.
    pub async fn products(&self, catalog: &Catalog) -> Result<Arc<Vec<Product>>, CoreError> {
        if let Some(products) = self.products.read().await.as_ref() {
            return Ok(Arc::clone(products));
        }

        let mut slot = self.products.write().await;
        if let Some(products) = slot.as_ref() {
            return Ok(Arc::clone(products));
        }
        let products = Arc::new(catalog.list_all(ProductOrder::Name).await?);
        tracing::debug!(count = products.len(), "Catalog cache loaded");
        *slot = Some(Arc::clone(&products));
        Ok(products)
    }

    pub async fn invalidate(&self) {
        *self.products.write().await = None;
    }

    pub async fn is_warm(&self) -> bool {
        self.products.read().await.is_some()
    }
}

#[async_trait]
impl CommitHook for CatalogCache {
    async fn catalog_committed(&self) {
        self.invalidate().await;
        tracing::debug!("Catalog cache invalidated");
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::auth::{AdminPolicy, Identity};
    use vitrine_db::MemoryCatalogStore;

    use super::*;

    #[tokio::test]
    async fn commit_drops_the_cached_listing() {
        let cache = Arc::new(CatalogCache::new());
        let catalog =
            Catalog::new(Arc::new(MemoryCatalogStore::new())).with_hook(cache.clone());
        let admin = AdminPolicy::new("owner@boutique.sn")
            .authorize(Identity {
                subject: "uid-admin".into(),
                email: Some("owner@boutique.sn".into()),
            })
            .unwrap();

        assert!(cache.products(&catalog).await.unwrap().is_empty());
        assert!(cache.is_warm().await);

        catalog
            .replace_all(&admin, &serde_json::json!([{"id": "1", "name": "Sac"}]))
            .await
            .unwrap();
        assert!(!cache.is_warm().await);

        assert_eq!(cache.products(&catalog).await.unwrap().len(), 1);
    }
}
