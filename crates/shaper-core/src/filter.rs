//! Key filtering before materialization

use crate::tree::FlatMap;

/// Keep only the entries whose key contains `pattern`.
///
/// Plain substring match on the full `/`-joined key; an empty pattern keeps
/// everything.
pub fn filter_keys(flat: FlatMap, pattern: &str) -> FlatMap {
    let before = flat.len();
    let kept: FlatMap = flat
        .into_iter()
        .filter(|(key, _)| key.contains(pattern))
        .collect();
    tracing::debug!(pattern, kept = kept.len(), dropped = before - kept.len(), "filtered keys");
    kept
}
