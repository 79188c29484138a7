//! Repository for the `products` table.

use sqlx::{PgExecutor, PgPool};
use vitrine_core::product::{Product, ProductOrder};
use vitrine_core::store::{WriteBatch, WriteOp};

use crate::models::product::ProductRow;

/// Column list for the `products` table.
const COLUMNS: &str = "id, name, price, description, category, image_url, hint";

/// Provides reads, upserts, deletes and atomic batches for products.
pub struct ProductRepo;

impl ProductRepo {
    /// List every product ordered by `order`, ties broken by id.
    pub async fn list(pool: &PgPool, order: ProductOrder) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products ORDER BY {}, id",
            order.column()
        );
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Product::from))
    }

    /// Server-side equality filter on `category` (uses `idx_products_category`).
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE category = $1 ORDER BY name, id");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(category)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Ids of every product.
    pub async fn ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT id FROM products ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Insert or fully overwrite the product with `product.id`.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        product: &Product,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO products (id, name, price, description, category, image_url, hint) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                price = EXCLUDED.price, \
                description = EXCLUDED.description, \
                category = EXCLUDED.category, \
                image_url = EXCLUDED.image_url, \
                hint = EXCLUDED.hint, \
                updated_at = now()",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(&product.hint)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Delete a product. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply every operation of `batch` inside one transaction.
    ///
    /// Any failing statement rolls the whole batch back when the transaction
    /// is dropped without commit.
    pub async fn apply_batch(pool: &PgPool, batch: &WriteBatch) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for op in batch.ops() {
            match op {
                WriteOp::DeleteProduct(id) => {
                    Self::delete(&mut *tx, id).await?;
                }
                WriteOp::UpsertProduct(product) => {
                    Self::upsert(&mut *tx, product).await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
