//! Key normalization.
//!
//! v6 keys were hyphenated and a couple of them were renamed in v7. The
//! renames match the whole key (after hyphen folding), which keeps the mapping
//! idempotent: `search_algorithm` is already canonical and stays untouched.

/// Map a legacy key spelling to its canonical v7 spelling.
pub(crate) fn normalize_key(key: &str) -> String {
    let key = key.replace('-', "_");
    match key.as_str() {
        "maxspan" => "span_limit".to_string(),
        "search" => "search_algorithm".to_string(),
        _ => key,
    }
}
