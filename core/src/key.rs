//! Key normalization.
//!
//! RULE: every map lookup and every membership comparison in the engine goes
//! through `fund_key`. Blank-after-trim means "no key": such rows are never
//! inserted into a lookup and never classified.

use crate::types::FundKey;

/// Trim leading and trailing whitespace.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_string()
}

/// Canonical comparison form of a key, or `None` when the key is blank.
pub fn fund_key(raw: &str) -> Option<FundKey> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
