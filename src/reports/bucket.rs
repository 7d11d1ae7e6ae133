use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::SpendingRecord;
use crate::reports::week::weekday_index;

/// A mapping from a grouping key to an accumulated total.
///
/// Keys remember the order in which they first appeared so that rankings over
/// free-text keys (memos) can break ties deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    totals: HashMap<String, i64>,
    order: Vec<String>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` under `key`, initializing absent keys at zero.
    pub fn add(&mut self, key: impl Into<String>, amount: i64) {
        let key = key.into();
        match self.totals.get_mut(&key) {
            Some(total) => *total += amount,
            None => {
                self.totals.insert(key.clone(), amount);
                self.order.push(key);
            }
        }
    }

    /// The accumulated total for `key`, or zero if the key never appeared.
    pub fn get(&self, key: &str) -> i64 {
        self.totals.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.totals.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all key totals.
    pub fn total(&self) -> i64 {
        self.totals.values().sum()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.order.iter().map(|key| (key.as_str(), self.totals[key]))
    }

    pub fn entries(&self) -> Vec<(String, i64)> {
        self.iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (key, total) in self.iter() {
            map.serialize_entry(key, &total)?;
        }
        map.end()
    }
}

/// Groups records into sums keyed by `key_fn`. No record is excluded for
/// having a novel key; the sum of the bucket equals the sum of the inputs.
pub fn aggregate<K: Into<String>>(
    records: &[SpendingRecord],
    key_fn: impl Fn(&SpendingRecord) -> K,
) -> Bucket {
    let mut bucket = Bucket::new();
    for record in records {
        bucket.add(key_fn(record), record.amount);
    }
    bucket
}

/// Like [`aggregate`], but `key_fn` may yield several keys per record, each
/// receiving the full amount (used for tags).
pub fn aggregate_each<'a, K, I>(
    records: &'a [SpendingRecord],
    key_fn: impl Fn(&'a SpendingRecord) -> I,
) -> Bucket
where
    K: Into<String>,
    I: IntoIterator<Item = K>,
{
    let mut bucket = Bucket::new();
    for record in records {
        for key in key_fn(record) {
            bucket.add(key, record.amount);
        }
    }
    bucket
}

/// Totals per category, absent categories normalized to the shared sentinel.
pub fn category_totals(records: &[SpendingRecord]) -> Bucket {
    aggregate(records, |r| r.category_label().to_string())
}

/// Totals per memo, in first-occurrence order.
pub fn memo_totals(records: &[SpendingRecord]) -> Bucket {
    aggregate(records, |r| r.memo.clone())
}

/// Totals per tag; a record contributes its amount once per tag it carries.
pub fn tag_totals(records: &[SpendingRecord]) -> Bucket {
    aggregate_each(records, |r| r.tags.iter().cloned())
}

/// Totals per weekday, Monday-first. All seven slots are always present.
pub fn weekday_totals(records: &[SpendingRecord]) -> [i64; 7] {
    let mut totals = [0i64; 7];
    for record in records {
        totals[weekday_index(record.spent_at)] += record.amount;
    }
    totals
}
