//! Category documents.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::slug::create_slug;

/// Bucket used for products whose category matches no known slug.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A document from the `categories` collection.
///
/// Slugs are derived from the name and are not unique: two categories whose
/// names normalize to the same slug can coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Category {
    /// Build a category, deriving its slug from `name`.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = create_slug(&name);
        Self {
            id: id.into(),
            name,
            slug,
        }
    }
}

/// Body for creating or renaming a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

impl CategoryInput {
    /// Validated, trimmed display name.
    pub fn into_name(self) -> Result<String, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("name must not be blank".into()));
        }
        if name.contains('\0') {
            return Err(CoreError::Validation(
                "name must not contain NUL characters".into(),
            ));
        }
        Ok(name.to_string())
    }
}
