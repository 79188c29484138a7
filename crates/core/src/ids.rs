//! Timestamp-based document ids (`prod_<ms>`, `cat_<ms>`).
//!
//! Ids are assigned by the admin surface before a document is first written,
//! so a product id exists before its image is uploaded. Millisecond resolution
//! is enough for a single writer.

use chrono::{DateTime, Utc};

pub const PRODUCT_ID_PREFIX: &str = "prod_";
pub const CATEGORY_ID_PREFIX: &str = "cat_";

/// New product id from the current time.
pub fn new_product_id() -> String {
    product_id_at(Utc::now())
}

/// New category id from the current time.
pub fn new_category_id() -> String {
    category_id_at(Utc::now())
}

pub fn product_id_at(at: DateTime<Utc>) -> String {
    format!("{PRODUCT_ID_PREFIX}{}", at.timestamp_millis())
}

pub fn category_id_at(at: DateTime<Utc>) -> String {
    format!("{CATEGORY_ID_PREFIX}{}", at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_use_millisecond_timestamps() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(product_id_at(at), "prod_1700000000123");
        assert_eq!(category_id_at(at), "cat_1700000000123");
    }

    #[test]
    fn generated_ids_carry_prefix() {
        assert!(new_product_id().starts_with(PRODUCT_ID_PREFIX));
        assert!(new_category_id().starts_with(CATEGORY_ID_PREFIX));
    }
}
