//! Bulk edit reconciliation: turning user-edited rows into write intents.

mod session;

pub use session::{EditSession, SessionState};

use chrono::{Datelike, NaiveDate};

use crate::clock::Clock;
use crate::models::{BulkWriteIntent, LineItem, WriteMode};

/// One raw row of a bulk input form. Both fields are free text; validation
/// happens at submission time, not while the user types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRow {
    pub memo: String,
    pub amount: String,
}

impl EditRow {
    pub fn new(memo: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            memo: memo.into(),
            amount: amount.into(),
        }
    }
}

/// Typed, recoverable outcomes of the edit-session boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Every submitted row failed validation; nothing would be written.
    #[error("no rows survived validation; nothing to save")]
    EmptySubmission,
    /// A save is already in flight for this session.
    #[error("a save is already in flight")]
    SaveInFlight,
}

/// Parses an amount field into whole won.
///
/// Accepts any finite numeric text and truncates toward zero, mirroring the
/// service's integer coercion of submitted amounts.
fn parse_amount(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Normalizes a user-entered submission date.
///
/// Accepts `YYYY-MM-DD`, or `MM-DD` completed with the current year. Blank,
/// missing, or unparseable input falls back to today, matching the service's
/// own lenient date handling.
pub fn normalize_date(input: Option<&str>, clock: &dyn Clock) -> NaiveDate {
    let raw = match input {
        Some(raw) => raw.trim(),
        None => return clock.today(),
    };
    if raw.is_empty() {
        return clock.today();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date;
    }
    let today = clock.today();
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-{raw}", today.year()), "%Y-%m-%d") {
        return date;
    }
    today
}

/// Best-effort row sanitation: trims memos, drops rows with a blank memo or a
/// non-numeric amount. Dropped rows are silent; the caller only hears about
/// them when the whole submission empties out.
pub fn validate_rows(rows: &[EditRow]) -> Vec<LineItem> {
    let mut items = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in rows {
        let memo = row.memo.trim();
        match (memo.is_empty(), parse_amount(&row.amount)) {
            (false, Some(amount)) => items.push(LineItem::new(memo, amount)),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, kept = items.len(), "dropped invalid bulk rows");
    }
    items
}

/// Builds the write intent for a set of edited rows.
///
/// `EmptySubmission` is raised only when a nonzero row set validates down to
/// nothing. An intentionally empty row set is a legal replace-day submission
/// ("clear the day"); in append mode it is still `EmptySubmission`, since the
/// service rejects an append of nothing.
pub fn reconcile_bulk_edit(
    rows: &[EditRow],
    mode: WriteMode,
    date: NaiveDate,
) -> Result<BulkWriteIntent, EditError> {
    let items = validate_rows(rows);
    if items.is_empty() {
        match mode {
            WriteMode::ReplaceDay if rows.is_empty() => {}
            _ => return Err(EditError::EmptySubmission),
        }
    }
    Ok(match mode {
        WriteMode::Append => BulkWriteIntent::append(date, items),
        WriteMode::ReplaceDay => BulkWriteIntent::replace_day(date, items),
    })
}
