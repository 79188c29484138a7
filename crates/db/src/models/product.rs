use sqlx::FromRow;
use vitrine_core::product::Product;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub hint: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            category: row.category,
            image_url: row.image_url,
            hint: row.hint,
        }
    }
}
