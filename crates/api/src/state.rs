use std::sync::Arc;

use vitrine_core::auth::AdminPolicy;
use vitrine_core::catalog::Catalog;
use vitrine_core::store::CatalogStore;

use crate::cache::CatalogCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog adapter over the configured store.
    pub catalog: Catalog,
    /// Storefront listing cache, invalidated by catalog commits.
    pub cache: Arc<CatalogCache>,
    /// Single-administrator allow-list.
    pub admin_policy: Arc<AdminPolicy>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the catalog, its cache hook and the admin policy around `store`.
    pub fn new(store: Arc<dyn CatalogStore>, config: ServerConfig) -> Self {
        let cache = Arc::new(CatalogCache::new());
        let catalog = Catalog::new(store).with_hook(cache.clone());
        let admin_policy = Arc::new(AdminPolicy::new(config.auth.admin_email.clone()));

        Self {
            catalog,
            cache,
            admin_policy,
            config: Arc::new(config),
        }
    }
}
