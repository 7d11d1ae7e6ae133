//! Orchestration over the spending store: fetch, compose, save.
//!
//! Every report here is recomputed from a fresh `list_spendings` call; after
//! a successful save nothing is patched incrementally, callers simply ask
//! again.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};

use crate::edit::{EditError, EditSession};
use crate::models::BulkReceipt;
use crate::reports::{
    build_calendar_summary, build_daily_report, build_monthly_report, build_weekly_report,
    monday_of, month_bounds, previous_month, CalendarSummary, DailyReport, MonthlyReport,
    WeeklyReport,
};
use crate::storage::SpendingStore;

/// Result of driving an edit session through one save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(BulkReceipt),
    /// Every row failed validation; no write was issued and the session is
    /// still in `Editing` so the caller can warn the user.
    NothingToSave,
}

/// Date-keyed totals for one month's calendar grid.
pub async fn calendar_summary(
    store: &dyn SpendingStore,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<CalendarSummary> {
    let (first, last) =
        month_bounds(year, month).with_context(|| format!("Invalid month: {year}-{month:02}"))?;
    let records = store.list_spendings(user_id, first, last).await?;
    build_calendar_summary(&records, year, month)
}

/// Total and category breakdown for a single date.
pub async fn daily_report(
    store: &dyn SpendingStore,
    user_id: &str,
    date: NaiveDate,
) -> Result<DailyReport> {
    let records = store.list_spendings(user_id, date, date).await?;
    Ok(build_daily_report(&records, date))
}

/// Weekly report for the week containing `date`, with a delta against the
/// previous week. `date` is snapped to its Monday.
pub async fn weekly_report(
    store: &dyn SpendingStore,
    user_id: &str,
    date: NaiveDate,
) -> Result<WeeklyReport> {
    let week_start = monday_of(date);
    let week_end = week_start + Days::new(6);
    let prev_start = week_start - Days::new(7);
    let prev_end = week_start - Days::new(1);

    let current = store.list_spendings(user_id, week_start, week_end).await?;
    let previous = store.list_spendings(user_id, prev_start, prev_end).await?;
    Ok(build_weekly_report(&current, &previous, week_start))
}

/// Monthly report with a delta against the previous calendar month.
pub async fn monthly_report(
    store: &dyn SpendingStore,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<MonthlyReport> {
    let (first, last) =
        month_bounds(year, month).with_context(|| format!("Invalid month: {year}-{month:02}"))?;
    let (prev_year, prev_month) = previous_month(year, month);
    let (prev_first, prev_last) = month_bounds(prev_year, prev_month)
        .with_context(|| format!("Invalid month: {prev_year}-{prev_month:02}"))?;

    let current = store.list_spendings(user_id, first, last).await?;
    let previous = store.list_spendings(user_id, prev_first, prev_last).await?;
    build_monthly_report(&current, &previous, year, month)
}

/// Drives one save attempt for an edit session.
///
/// Exactly one write is issued per call. On success the session returns to
/// `Viewing`; on a transport failure the session returns to `Editing` with
/// its rows intact and the error is propagated unmodified for the caller to
/// retry.
pub async fn save_session(
    store: &dyn SpendingStore,
    user_id: &str,
    session: &mut EditSession,
) -> Result<SaveOutcome> {
    let intent = match session.begin_save() {
        Ok(intent) => intent,
        Err(EditError::EmptySubmission) => return Ok(SaveOutcome::NothingToSave),
        Err(err @ EditError::SaveInFlight) => return Err(err.into()),
    };

    match store.submit_bulk(user_id, &intent).await {
        Ok(receipt) => {
            session.save_succeeded();
            Ok(SaveOutcome::Saved(receipt))
        }
        Err(err) => {
            tracing::warn!(date = %intent.date, error = %err, "bulk save failed; keeping edits");
            session.save_failed();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{EditRow, SessionState};
    use crate::models::{BulkWriteIntent, SpendingRecord, OTHER_CATEGORY};
    use crate::reports::TrendDirection;
    use crate::storage::MemoryStore;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Store whose writes always fail, for the no-data-loss guarantee.
    struct FailingStore;

    #[async_trait::async_trait]
    impl SpendingStore for FailingStore {
        async fn list_spendings(
            &self,
            _user_id: &str,
            _from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<SpendingRecord>> {
            Ok(Vec::new())
        }

        async fn submit_bulk(
            &self,
            _user_id: &str,
            _intent: &BulkWriteIntent,
        ) -> Result<BulkReceipt> {
            anyhow::bail!("service unavailable")
        }
    }

    #[tokio::test]
    async fn weekly_report_compares_against_the_previous_week() -> Result<()> {
        let store = MemoryStore::new();
        store
            .seed(
                "u1",
                vec![
                    SpendingRecord::new("회식", 20000, date(2024, 2, 28)),
                    SpendingRecord::new("커피", 4500, date(2024, 3, 4)),
                    SpendingRecord::new("장보기", 35500, date(2024, 3, 6)),
                ],
            )
            .await;

        // Any date inside the week snaps to its Monday.
        let report = weekly_report(&store, "u1", date(2024, 3, 7)).await?;
        assert_eq!(report.week_start, date(2024, 3, 4));
        assert_eq!(report.total, 40000);
        assert_eq!(report.focus_weekday, Some(Weekday::Wed));
        assert_eq!(report.delta.direction(), Some(TrendDirection::Up));
        assert_eq!(report.delta.display_percent(), Some(100.0));

        Ok(())
    }

    #[tokio::test]
    async fn monthly_report_pulls_both_months_from_the_store() -> Result<()> {
        let store = MemoryStore::new();
        store
            .seed(
                "u1",
                vec![
                    SpendingRecord::new("회식", 60000, date(2024, 2, 10)),
                    SpendingRecord::new("커피", 4500, date(2024, 3, 1)).with_category("식비"),
                    SpendingRecord::new("택시", 12000, date(2024, 3, 2)),
                ],
            )
            .await;

        let report = monthly_report(&store, "u1", 2024, 3).await?;
        assert_eq!(report.total, 16500);
        assert_eq!(report.category_totals.get(OTHER_CATEGORY), 12000);
        assert_eq!(report.delta.direction(), Some(TrendDirection::Down));

        Ok(())
    }

    #[tokio::test]
    async fn saved_session_is_visible_to_recomputed_reports() -> Result<()> {
        let store = MemoryStore::new();
        let day = date(2024, 3, 1);
        store
            .seed("u1", vec![SpendingRecord::new("커피", 4500, day)])
            .await;

        let mut session = EditSession::viewing(day);
        session.begin_edit(vec![
            EditRow::new("커피", "4500"),
            EditRow::new("점심", "9000"),
        ])?;

        let outcome = save_session(&store, "u1", &mut session).await?;
        let receipt = match outcome {
            SaveOutcome::Saved(receipt) => receipt,
            SaveOutcome::NothingToSave => panic!("expected a save"),
        };
        assert_eq!(receipt.saved, 2);
        assert_eq!(session.state(), SessionState::Viewing);

        // Recomputed, not patched.
        let report = daily_report(&store, "u1", day).await?;
        assert_eq!(report.total, 13500);

        Ok(())
    }

    #[tokio::test]
    async fn failed_save_keeps_the_session_editing_with_rows_intact() {
        let mut session = EditSession::viewing(date(2024, 3, 1));
        session
            .begin_edit(vec![EditRow::new("커피", "4500")])
            .unwrap();

        let err = save_session(&FailingStore, "u1", &mut session)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("service unavailable"));
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(session.rows(), &[EditRow::new("커피", "4500")]);
    }

    #[tokio::test]
    async fn all_invalid_rows_surface_as_nothing_to_save() -> Result<()> {
        let store = MemoryStore::new();
        let mut session = EditSession::viewing(date(2024, 3, 1));
        session.begin_edit(vec![EditRow::new("  ", "abc")])?;

        let outcome = save_session(&store, "u1", &mut session).await?;
        assert_eq!(outcome, SaveOutcome::NothingToSave);
        assert_eq!(session.state(), SessionState::Editing);

        Ok(())
    }

    #[tokio::test]
    async fn clearing_every_row_issues_a_replace_day_write() -> Result<()> {
        let store = MemoryStore::new();
        let day = date(2024, 3, 1);
        store
            .seed("u1", vec![SpendingRecord::new("커피", 4500, day)])
            .await;

        let mut session = EditSession::viewing(day);
        session.begin_edit(Vec::new())?;

        let outcome = save_session(&store, "u1", &mut session).await?;
        assert!(matches!(outcome, SaveOutcome::Saved(_)));
        assert!(store.list_spendings("u1", day, day).await?.is_empty());

        Ok(())
    }
}
