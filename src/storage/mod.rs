mod http;
mod memory;

pub use http::HttpSpendingStore;
pub use memory::MemoryStore;

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{BulkReceipt, BulkWriteIntent, SpendingRecord};

/// Boundary to the remote spending service, the system of record.
///
/// The core holds no durable state of its own; reports are rebuilt from each
/// query response. Errors from either method are transport failures and are
/// propagated unmodified - the core does not know how to recover them.
#[async_trait::async_trait]
pub trait SpendingStore: Send + Sync {
    /// Records whose `spent_at` falls in the inclusive range. Order is
    /// unspecified; consumers sort or group defensively.
    async fn list_spendings(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SpendingRecord>>;

    /// Submits one bulk write. Append leaves existing records for the date
    /// untouched; replace-day supersedes them, and an empty replace-day item
    /// list clears the date.
    async fn submit_bulk(&self, user_id: &str, intent: &BulkWriteIntent) -> Result<BulkReceipt>;
}
