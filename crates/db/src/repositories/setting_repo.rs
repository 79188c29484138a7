//! Repository for the `settings` key/value documents.

use serde_json::Value;
use sqlx::PgPool;

pub struct SettingRepo;

impl SettingRepo {
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<Value>, sqlx::Error> {
        sqlx::query_scalar::<_, Value>("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Replace the whole document stored under `key`.
    pub async fn put(pool: &PgPool, key: &str, value: &Value) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }
}
