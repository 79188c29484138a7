//! Product documents and the per-row editor DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::ids;

/// Image shown for products that have no uploaded picture yet.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png";

/// A document from the `products` collection.
///
/// `price` is in the smallest currency unit (FCFA has no subunit) and is
/// never negative. `category` is a category slug by convention only; it is
/// not checked against the `categories` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub hint: String,
}

/// Sort key for full catalog listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductOrder {
    #[default]
    Name,
    Price,
    Id,
}

impl ProductOrder {
    /// Column name used by SQL backends.
    pub fn column(self) -> &'static str {
        match self {
            ProductOrder::Name => "name",
            ProductOrder::Price => "price",
            ProductOrder::Id => "id",
        }
    }

    /// Sort an already-materialized list the same way a backend would.
    pub fn sort(self, products: &mut [Product]) {
        match self {
            ProductOrder::Name => {
                products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)))
            }
            ProductOrder::Price => {
                products.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)))
            }
            ProductOrder::Id => products.sort_by(|a, b| a.id.cmp(&b.id)),
        }
    }
}

/// Body of the per-row product editor.
///
/// `id` is optional: when absent on creation a `prod_<ms>` id is assigned.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ProductDraft {
    /// Validate and turn the draft into a full document.
    ///
    /// `path_id` wins over any id carried in the body; with neither, a new
    /// product id is generated.
    pub fn into_product(self, path_id: Option<&str>) -> Result<Product, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("name must not be blank".into()));
        }

        let id = match path_id {
            Some(id) => id.trim().to_string(),
            None => self
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map_or_else(ids::new_product_id, str::to_string),
        };
        if id.is_empty() {
            return Err(CoreError::Validation("id must not be empty".into()));
        }

        let text_fields = [
            id.as_str(),
            name,
            self.description.as_str(),
            self.category.as_str(),
            self.image_url.as_deref().unwrap_or_default(),
            self.hint.as_deref().unwrap_or_default(),
        ];
        if text_fields.iter().any(|s| s.contains('\0')) {
            return Err(CoreError::Validation(
                "text fields must not contain NUL characters".into(),
            ));
        }
        let name = name.to_string();

        Ok(Product {
            id,
            name,
            price: self.price,
            description: self.description,
            category: self.category,
            image_url: self
                .image_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            hint: self.hint.unwrap_or_default(),
        })
    }
}
