//! Category slug derivation.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of anything outside `[a-z0-9]`, matched after lowercasing.
static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Derive a URL-safe slug from a category name.
///
/// Lowercases the name, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, and trims leading/trailing hyphens.
/// Non-ASCII letters are treated as separators, so `"Été"` becomes `"t"`.
///
/// ```
/// use vitrine_core::slug::create_slug;
///
/// assert_eq!(create_slug("Montres de Luxe!"), "montres-de-luxe");
/// ```
pub fn create_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
