//! Replace-all synchronization of the product collection.
//!
//! A client submits its complete catalog; afterwards the `products`
//! collection holds exactly the valid candidates. The whole change is one
//! [`WriteBatch`]: delete every id from a snapshot of the current
//! collection, then upsert each valid candidate. Candidates that cannot
//! become a [`Product`] are skipped and reported in the outcome, never
//! failing the call.
//!
//! There is no locking around snapshot-then-commit. Two concurrent
//! replace-all calls resolve as last commit wins.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::product::{Product, PLACEHOLDER_IMAGE_URL};
use crate::store::{CatalogStore, WriteBatch};

/// Why a candidate record was left out of a replace-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotAnObject,
    MissingId,
    MissingName,
}

/// A dropped candidate, by position in the submitted array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: SkipReason,
}

/// Result of a committed replace-all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaceOutcome {
    /// Products persisted before the call.
    pub previous: usize,
    /// Previously persisted products absent from the new set.
    pub removed: usize,
    /// Products persisted after the call.
    pub written: usize,
    pub skipped: Vec<SkippedRecord>,
    /// Indexes of kept records whose `price` was unusable and stored as 0.
    pub price_defaulted: Vec<usize>,
}

/// The batch to commit together with the outcome it will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacePlan {
    pub batch: WriteBatch,
    pub outcome: ReplaceOutcome,
}

/// Convert one submitted record into a product, filling defaults.
///
/// `id` and `name` must be non-empty strings; both are stored trimmed.
/// NUL characters are stripped from every text field. `price` is read from
/// a number or a numeric string (digit-group spaces allowed) and rounded to
/// a whole unit; anything else, negatives included, becomes 0. Other
/// fields fall back to empty strings, and `imageUrl` to the placeholder.
pub fn parse_candidate(value: &Value) -> Result<Product, SkipReason> {
    parse_record(value).map(|(product, _)| product)
}

/// Like [`parse_candidate`], also telling whether the price was defaulted.
fn parse_record(value: &Value) -> Result<(Product, bool), SkipReason> {
    let record = value.as_object().ok_or(SkipReason::NotAnObject)?;

    let id = required_text(record, "id").ok_or(SkipReason::MissingId)?;
    let name = required_text(record, "name").ok_or(SkipReason::MissingName)?;
    let (price, price_defaulted) = match parse_price(record.get("price")) {
        Some(price) => (price, false),
        None => (0, true),
    };

    let product = Product {
        id,
        name,
        price,
        description: text_or_default(record, "description"),
        category: text_or_default(record, "category"),
        image_url: required_text(record, "imageUrl")
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
        hint: text_or_default(record, "hint"),
    };
    Ok((product, price_defaulted))
}

/// Build the atomic batch that replaces `snapshot` with `candidates`.
///
/// When several valid candidates share an id, the last one wins.
pub fn plan_replace(snapshot: &[String], candidates: &[Value]) -> ReplacePlan {
    let mut products: Vec<Product> = Vec::with_capacity(candidates.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut skipped = Vec::new();
    let mut price_defaulted = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        match parse_record(candidate) {
            Ok((product, defaulted)) => {
                if defaulted {
                    price_defaulted.push(index);
                }
                match positions.get(&product.id) {
                    Some(&pos) => products[pos] = product,
                    None => {
                        positions.insert(product.id.clone(), products.len());
                        products.push(product);
                    }
                }
            }
            Err(reason) => skipped.push(SkippedRecord { index, reason }),
        }
    }

    let removed = snapshot
        .iter()
        .filter(|id| !positions.contains_key(id.as_str()))
        .count();

    let mut batch = WriteBatch::new();
    for id in snapshot {
        batch.delete_product(id.clone());
    }
    let written = products.len();
    for product in products {
        batch.upsert_product(product);
    }

    ReplacePlan {
        batch,
        outcome: ReplaceOutcome {
            previous: snapshot.len(),
            removed,
            written,
            skipped,
            price_defaulted,
        },
    }
}

/// Replace the whole product collection with `candidates`.
///
/// `candidates` must be a JSON array; anything else fails with
/// [`CoreError::InvalidInput`] before the store is touched. Snapshot and
/// commit failures surface as [`CoreError::ReplaceFailed`] and leave the
/// collection as it was. No retry is attempted.
pub async fn replace_all(
    store: &dyn CatalogStore,
    candidates: &Value,
) -> Result<ReplaceOutcome, CoreError> {
    let candidates = candidates
        .as_array()
        .ok_or_else(|| CoreError::InvalidInput("`products` must be an array".into()))?;

    let snapshot = store
        .product_ids()
        .await
        .map_err(CoreError::ReplaceFailed)?;

    let ReplacePlan { batch, outcome } = plan_replace(&snapshot, candidates);

    for skipped in &outcome.skipped {
        tracing::warn!(
            index = skipped.index,
            reason = ?skipped.reason,
            "Skipping malformed product record"
        );
    }
    for index in &outcome.price_defaulted {
        tracing::warn!(index, "Unusable product price stored as 0");
    }

    store.commit(batch).await.map_err(CoreError::ReplaceFailed)?;

    tracing::info!(
        previous = outcome.previous,
        removed = outcome.removed,
        written = outcome.written,
        skipped = outcome.skipped.len(),
        price_defaulted = outcome.price_defaulted.len(),
        "Product catalog replaced"
    );

    Ok(outcome)
}

/// Postgres `TEXT` cannot hold U+0000.
fn strip_nul(s: &str) -> String {
    s.replace('\0', "")
}

/// Trimmed, NUL-free string value; `None` when absent or blank.
fn required_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(|s| strip_nul(s).trim().to_string())
        .filter(|s| !s.is_empty())
}

fn text_or_default(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(strip_nul)
        .unwrap_or_default()
}

/// Read a price; `None` means the value is unusable and must default to 0.
fn parse_price(value: Option<&Value>) -> Option<i64> {
    let amount = match value {
        None | Some(Value::Null) => return Some(0),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(whole) => return (whole >= 0).then_some(whole),
            None => n.as_f64()?,
        },
        Some(Value::String(s)) => {
            // Digit-group separators: "12 500", "12\u{a0}500", "12\u{202f}500".
            let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            if digits.is_empty() {
                return Some(0);
            }
            digits.parse::<f64>().ok()?
        }
        Some(_) => return None,
    };

    if !amount.is_finite() || amount < 0.0 || amount > i64::MAX as f64 {
        return None;
    }
    Some(amount.round() as i64)
}
