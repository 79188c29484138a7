//! Keys of the `settings` collection.
//!
//! Settings are singleton JSON documents (home-page layout, payment methods,
//! about text). Their contents are opaque to the catalog.

use serde_json::Value;

use crate::error::CoreError;

pub const SETTING_HOMEPAGE: &str = "homepage";
pub const SETTING_PAYMENT_METHODS: &str = "payment_methods";
pub const SETTING_ABOUT: &str = "about";

pub const KNOWN_SETTINGS: &[&str] = &[SETTING_HOMEPAGE, SETTING_PAYMENT_METHODS, SETTING_ABOUT];

/// Accept only the known setting keys.
pub fn validate_setting_key(key: &str) -> Result<(), CoreError> {
    if !KNOWN_SETTINGS.contains(&key) {
        return Err(CoreError::Validation(format!(
            "Unknown setting '{}'. Valid settings: {}",
            key,
            KNOWN_SETTINGS.join(", ")
        )));
    }
    Ok(())
}

/// Reject documents holding a NUL character in any key or string;
/// Postgres `jsonb` cannot store one.
pub fn validate_setting_value(value: &Value) -> Result<(), CoreError> {
    if contains_nul(value) {
        return Err(CoreError::Validation(
            "setting values must not contain NUL characters".into(),
        ));
    }
    Ok(())
}

fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(map) => map
            .iter()
            .any(|(key, item)| key.contains('\0') || contains_nul(item)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_pass() {
        for key in KNOWN_SETTINGS {
            assert!(validate_setting_key(key).is_ok());
        }
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(validate_setting_key("theme").is_err());
    }

    #[test]
    fn nul_anywhere_in_value_rejected() {
        use serde_json::json;

        assert!(validate_setting_value(&json!({"methods": ["wave", "cash"]})).is_ok());
        assert!(validate_setting_value(&json!({"text": "a\0b"})).is_err());
        assert!(validate_setting_value(&json!([["x\0"]])).is_err());
        assert!(validate_setting_value(&json!({"k\0": 1})).is_err());
    }
}
