//! Repository for the `categories` table.

use sqlx::PgPool;
use vitrine_core::category::Category;

use crate::models::category::CategoryRow;

const COLUMNS: &str = "id, name, slug";

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name, id");
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Category::from))
    }

    /// Insert or overwrite the category with `category.id`.
    pub async fn upsert(pool: &PgPool, category: &Category) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO categories (id, name, slug) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                slug = EXCLUDED.slug, \
                updated_at = now()",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
