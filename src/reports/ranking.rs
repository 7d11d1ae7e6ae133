use serde::Serialize;

use crate::reports::Bucket;

/// One entry of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub total: i64,
}

/// Selects the `n` largest totals from a bucket.
///
/// Sorted descending by total; ties keep the keys' first-occurrence order in
/// the source records. Keys are free-text memos, so they are never compared
/// with each other. Fewer than `n` entries are returned when the bucket has
/// fewer distinct keys.
pub fn top_n(bucket: &Bucket, n: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = bucket
        .iter()
        .map(|(key, total)| RankedEntry {
            key: key.to_string(),
            total,
        })
        .collect();
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.total));
    entries.truncate(n);
    entries
}
