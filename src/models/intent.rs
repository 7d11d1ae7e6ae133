use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One validated row of a bulk submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub memo: String,
    /// Whole won.
    pub amount: i64,
}

impl LineItem {
    pub fn new(memo: impl Into<String>, amount: i64) -> Self {
        Self {
            memo: memo.into(),
            amount,
        }
    }
}

/// How a bulk submission relates to records already stored for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Add the items; existing records for the date are untouched.
    Append,
    /// The items become the complete record set for the date. An empty item
    /// list clears the day.
    ReplaceDay,
}

/// A single outbound write, constructed once at submission time and never
/// mutated after it is sent. The remote service is the system of record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkWriteIntent {
    pub mode: WriteMode,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
}

impl BulkWriteIntent {
    pub fn append(date: NaiveDate, items: Vec<LineItem>) -> Self {
        Self {
            mode: WriteMode::Append,
            date,
            items,
        }
    }

    pub fn replace_day(date: NaiveDate, items: Vec<LineItem>) -> Self {
        Self {
            mode: WriteMode::ReplaceDay,
            date,
            items,
        }
    }

    /// True for a replace-day intent with no items, i.e. "clear the day".
    pub fn clears_day(&self) -> bool {
        self.mode == WriteMode::ReplaceDay && self.items.is_empty()
    }
}

/// The service's acknowledgement of a bulk write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReceipt {
    /// Number of items the service saved.
    pub saved: usize,
    /// Identity of the affected day document, when the service reports one.
    pub daily_id: Option<String>,
    /// The date the write landed on.
    pub date: NaiveDate,
}
