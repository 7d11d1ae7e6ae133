//! In-memory store for tests: reference semantics for append/replace-day.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::models::{BulkReceipt, BulkWriteIntent, SpendingRecord, WriteMode};

use super::SpendingStore;

/// Day-keyed per-user record map, mirroring the service's daily documents.
pub struct MemoryStore {
    days: Mutex<HashMap<String, BTreeMap<NaiveDate, Vec<SpendingRecord>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            days: Mutex::new(HashMap::new()),
        }
    }

    /// Seeds records directly, bypassing the bulk-write path.
    pub async fn seed(&self, user_id: &str, records: Vec<SpendingRecord>) {
        let mut days = self.days.lock().await;
        let user_days = days.entry(user_id.to_string()).or_default();
        for record in records {
            user_days.entry(record.spent_at).or_default().push(record);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpendingStore for MemoryStore {
    async fn list_spendings(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SpendingRecord>> {
        let days = self.days.lock().await;
        let Some(user_days) = days.get(user_id) else {
            return Ok(Vec::new());
        };
        Ok(user_days
            .range(from..=to)
            .flat_map(|(_, records)| records.iter().cloned())
            .collect())
    }

    async fn submit_bulk(&self, user_id: &str, intent: &BulkWriteIntent) -> Result<BulkReceipt> {
        let mut days = self.days.lock().await;
        let user_days = days.entry(user_id.to_string()).or_default();

        let records: Vec<SpendingRecord> = intent
            .items
            .iter()
            .map(|item| SpendingRecord::new(item.memo.clone(), item.amount, intent.date))
            .collect();

        match intent.mode {
            WriteMode::Append => {
                user_days.entry(intent.date).or_default().extend(records);
            }
            WriteMode::ReplaceDay => {
                if records.is_empty() {
                    user_days.remove(&intent.date);
                } else {
                    user_days.insert(intent.date, records);
                }
            }
        }

        Ok(BulkReceipt {
            saved: intent.items.len(),
            daily_id: Some(format!("{user_id}:{}", intent.date)),
            date: intent.date,
        })
    }
}
