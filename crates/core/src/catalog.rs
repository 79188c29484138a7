//! Catalog store adapter.
//!
//! [`Catalog`] is the single entry point for product, category and setting
//! reads and writes. It wraps an explicitly constructed store handle and
//! adds no business rules beyond error mapping; write operations require a
//! [`VerifiedAdmin`] and fire the registered [`CommitHook`]s once the store
//! has accepted the change.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::auth::VerifiedAdmin;
use crate::category::{Category, CategoryInput, UNCATEGORIZED};
use crate::error::CoreError;
use crate::ids;
use crate::product::{Product, ProductDraft, ProductOrder};
use crate::settings::{validate_setting_key, validate_setting_value};
use crate::store::CatalogStore;
use crate::sync::{self, ReplaceOutcome};

/// Callback run after a catalog write commits, e.g. to drop cached views.
#[async_trait]
pub trait CommitHook: Send + Sync {
    async fn catalog_committed(&self);
}

/// Products listed under one category slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub slug: String,
    pub name: String,
    pub products: Vec<Product>,
}

#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
    hooks: Vec<Arc<dyn CommitHook>>,
}

impl Catalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            hooks: Vec::new(),
        }
    }

    /// Register a hook fired after every committed write.
    pub fn with_hook(mut self, hook: Arc<dyn CommitHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    async fn committed(&self) {
        for hook in &self.hooks {
            hook.catalog_committed().await;
        }
    }

    // -----------------------------------------------------------------------
    // Products
    // -----------------------------------------------------------------------

    pub async fn list_all(&self, order: ProductOrder) -> Result<Vec<Product>, CoreError> {
        Ok(self.store.list_products(order).await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Product>, CoreError> {
        Ok(self.store.find_product(id).await?)
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CoreError> {
        Ok(self.store.list_products_by_category(category).await?)
    }

    /// Overwrite (or create) the document with `product.id`.
    pub async fn upsert_one(
        &self,
        admin: &VerifiedAdmin,
        product: Product,
    ) -> Result<Product, CoreError> {
        self.store.upsert_product(&product).await?;
        tracing::info!(
            product_id = %product.id,
            admin = %admin.identity().subject,
            "Product saved"
        );
        self.committed().await;
        Ok(product)
    }

    /// Validate a per-row editor draft and save it under `id`.
    pub async fn save_product(
        &self,
        admin: &VerifiedAdmin,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, CoreError> {
        let product = draft.into_product(Some(id))?;
        self.upsert_one(admin, product).await
    }

    /// Save a new product, assigning a `prod_<ms>` id when none was given.
    pub async fn create_product(
        &self,
        admin: &VerifiedAdmin,
        draft: ProductDraft,
    ) -> Result<Product, CoreError> {
        let product = draft.into_product(None)?;
        self.upsert_one(admin, product).await
    }

    /// Physically delete a product. Missing ids are a no-op.
    pub async fn delete_one(&self, admin: &VerifiedAdmin, id: &str) -> Result<(), CoreError> {
        self.store.delete_product(id).await?;
        tracing::info!(product_id = %id, admin = %admin.identity().subject, "Product deleted");
        self.committed().await;
        Ok(())
    }

    /// Replace the whole product collection. See [`sync::replace_all`].
    pub async fn replace_all(
        &self,
        admin: &VerifiedAdmin,
        candidates: &Value,
    ) -> Result<ReplaceOutcome, CoreError> {
        tracing::info!(admin = %admin.identity().subject, "Replacing product catalog");
        let outcome = sync::replace_all(self.store.as_ref(), candidates).await?;
        self.committed().await;
        Ok(outcome)
    }

    /// Products grouped per category, with unmatched products last under
    /// [`UNCATEGORIZED`].
    pub async fn grouped(&self) -> Result<Vec<CategoryGroup>, CoreError> {
        let categories = self.store.list_categories().await?;
        let products = self.store.list_products(ProductOrder::Name).await?;
        Ok(group_by_category(&categories, products))
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.store.list_categories().await?)
    }

    pub async fn get_category(&self, id: &str) -> Result<Option<Category>, CoreError> {
        Ok(self.store.find_category(id).await?)
    }

    pub async fn create_category(
        &self,
        admin: &VerifiedAdmin,
        input: CategoryInput,
    ) -> Result<Category, CoreError> {
        let category = Category::new(ids::new_category_id(), input.into_name()?);
        self.store.upsert_category(&category).await?;
        tracing::info!(
            category_id = %category.id,
            slug = %category.slug,
            admin = %admin.identity().subject,
            "Category created"
        );
        self.committed().await;
        Ok(category)
    }

    /// Rename a category and re-derive its slug. Returns `None` if the id
    /// does not exist. Products pointing at the old slug are left as they are.
    pub async fn rename_category(
        &self,
        admin: &VerifiedAdmin,
        id: &str,
        input: CategoryInput,
    ) -> Result<Option<Category>, CoreError> {
        let name = input.into_name()?;
        if self.store.find_category(id).await?.is_none() {
            return Ok(None);
        }
        let category = Category::new(id, name);
        self.store.upsert_category(&category).await?;
        tracing::info!(
            category_id = %category.id,
            slug = %category.slug,
            admin = %admin.identity().subject,
            "Category renamed"
        );
        self.committed().await;
        Ok(Some(category))
    }

    pub async fn delete_category(&self, admin: &VerifiedAdmin, id: &str) -> Result<(), CoreError> {
        self.store.delete_category(id).await?;
        tracing::info!(category_id = %id, admin = %admin.identity().subject, "Category deleted");
        self.committed().await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub async fn get_setting(&self, key: &str) -> Result<Option<Value>, CoreError> {
        validate_setting_key(key)?;
        Ok(self.store.get_setting(key).await?)
    }

    pub async fn put_setting(
        &self,
        admin: &VerifiedAdmin,
        key: &str,
        value: &Value,
    ) -> Result<(), CoreError> {
        validate_setting_key(key)?;
        validate_setting_value(value)?;
        self.store.put_setting(key, value).await?;
        tracing::info!(key, admin = %admin.identity().subject, "Setting updated");
        self.committed().await;
        Ok(())
    }
}

/// Bucket `products` under every category whose slug matches their
/// `category` field. Categories sharing a slug each list the same products.
pub fn group_by_category(categories: &[Category], products: Vec<Product>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = categories
        .iter()
        .map(|category| CategoryGroup {
            slug: category.slug.clone(),
            name: category.name.clone(),
            products: products
                .iter()
                .filter(|p| p.category == category.slug)
                .cloned()
                .collect(),
        })
        .collect();

    let orphans: Vec<Product> = products
        .into_iter()
        .filter(|p| !categories.iter().any(|c| c.slug == p.category))
        .collect();
    if !orphans.is_empty() {
        groups.push(CategoryGroup {
            slug: UNCATEGORIZED.to_string(),
            name: UNCATEGORIZED.to_string(),
            products: orphans,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            price: 0,
            description: String::new(),
            category: category.into(),
            image_url: String::new(),
            hint: String::new(),
        }
    }

    #[test]
    fn dangling_categories_land_in_uncategorized() {
        let categories = vec![Category::new("cat_1", "Montres")];
        let groups = group_by_category(
            &categories,
            vec![product("a", "montres"), product("b", "sacs"), product("c", "")],
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].slug, "montres");
        assert_eq!(groups[0].products.len(), 1);
        assert_eq!(groups[1].slug, UNCATEGORIZED);
        let orphan_ids: Vec<_> = groups[1].products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(orphan_ids, ["b", "c"]);
    }

    #[test]
    fn no_uncategorized_group_when_everything_matches() {
        let categories = vec![Category::new("cat_1", "Sacs")];
        let groups = group_by_category(&categories, vec![product("a", "sacs")]);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn colliding_slugs_share_products() {
        let categories = vec![
            Category::new("cat_1", "Sacs"),
            Category::new("cat_2", "SACS!"),
        ];
        let groups = group_by_category(&categories, vec![product("a", "sacs")]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].products, groups[1].products);
    }
}
