use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel category for records the remote analyzer left uncategorized.
///
/// Applied only when a record enters an aggregator, never at storage time, so
/// every report view agrees on the default.
pub const OTHER_CATEGORY: &str = "기타";

/// One logged expense, as returned by the spending service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingRecord {
    pub memo: String,
    /// Whole won; positive means an expense.
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "spentAt")]
    pub spent_at: NaiveDate,
}

impl SpendingRecord {
    pub fn new(memo: impl Into<String>, amount: i64, spent_at: NaiveDate) -> Self {
        Self {
            memo: memo.into(),
            amount,
            category: None,
            tags: Vec::new(),
            spent_at,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// The category to aggregate under, with absent or blank categories
    /// normalized to [`OTHER_CATEGORY`].
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => OTHER_CATEGORY,
        }
    }
}
