//! Shared query parameter types for API handlers.

use serde::Deserialize;
use vitrine_core::product::ProductOrder;

/// Query parameters for `GET /products` (`?category=&order=`).
#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub category: Option<String>,
    #[serde(default)]
    pub order: ProductOrder,
}
