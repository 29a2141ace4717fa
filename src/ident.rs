//! Identifier normalization
//!
//! Turns a display label such as `"Company ID"` into a stable field key
//! (`"company_id"`). Distinct labels may collapse to the same key; callers
//! that care about collisions must check for them.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("valid regex"));
static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid regex"));

/// Lowercase `label` and replace every character outside `[a-z0-9]` with `_`
pub fn normalize_identifier(label: &str) -> String {
    NON_IDENT.replace_all(&label.to_lowercase(), "_").into_owned()
}

/// Check whether `s` is already a normalized identifier
pub fn is_normalized(s: &str) -> bool {
    IDENT.is_match(s)
}
