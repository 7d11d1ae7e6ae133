use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::SpendingRecord;
use crate::reports::bucket::{category_totals, memo_totals, weekday_totals};
use crate::reports::delta::PeriodDelta;
use crate::reports::ranking::{top_n, RankedEntry};
use crate::reports::week::{iso_week_label, month_bounds};
use crate::reports::Bucket;

/// Total spent per day of a month; days without records are absent.
pub type CalendarSummary = BTreeMap<NaiveDate, i64>;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Everything the daily view shows for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total: i64,
    pub category_breakdown: Bucket,
}

/// Everything the weekly view shows for one Monday-started week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    /// ISO-8601 week label, e.g. `"2024-W10"`.
    pub label: String,
    /// Monday-first; all seven slots present even when zero.
    pub weekday_totals: [i64; 7],
    pub category_totals: Bucket,
    pub total: i64,
    pub delta: PeriodDelta,
    /// The weekday with the highest spend; earliest weekday wins ties. `None`
    /// when no weekday has a positive total.
    pub focus_weekday: Option<Weekday>,
}

/// Everything the monthly view shows for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    /// Running prefix sum of daily totals, one slot per calendar day. Days
    /// without records contribute zero, not a gap.
    pub cumulative_daily: Vec<i64>,
    pub category_totals: Bucket,
    pub total: i64,
    pub delta: PeriodDelta,
    /// Top-3 memos by total spend.
    pub top_items: Vec<RankedEntry>,
}

fn in_range<'a>(
    records: &'a [SpendingRecord],
    from: NaiveDate,
    to: NaiveDate,
) -> impl Iterator<Item = &'a SpendingRecord> {
    records
        .iter()
        .filter(move |r| r.spent_at >= from && r.spent_at <= to)
}

fn sum_in_range(records: &[SpendingRecord], from: NaiveDate, to: NaiveDate) -> i64 {
    in_range(records, from, to).map(|r| r.amount).sum()
}

/// Date-keyed totals for the requested month, for the calendar grid.
pub fn build_calendar_summary(
    records: &[SpendingRecord],
    year: i32,
    month: u32,
) -> Result<CalendarSummary> {
    let (first, last) =
        month_bounds(year, month).with_context(|| format!("Invalid month: {year}-{month:02}"))?;

    let mut summary = CalendarSummary::new();
    for record in in_range(records, first, last) {
        *summary.entry(record.spent_at).or_insert(0) += record.amount;
    }
    Ok(summary)
}

/// Total and category breakdown for a single date.
pub fn build_daily_report(records: &[SpendingRecord], date: NaiveDate) -> DailyReport {
    let on_date: Vec<SpendingRecord> = in_range(records, date, date).cloned().collect();
    DailyReport {
        date,
        total: on_date.iter().map(|r| r.amount).sum(),
        category_breakdown: category_totals(&on_date),
    }
}

/// Weekday and category totals for the week starting at `week_start`, with a
/// week-over-week delta against `previous_week_records`.
///
/// `week_start` is taken as given; callers wanting the enclosing week of an
/// arbitrary date go through [`crate::reports::monday_of`] first.
pub fn build_weekly_report(
    records: &[SpendingRecord],
    previous_week_records: &[SpendingRecord],
    week_start: NaiveDate,
) -> WeeklyReport {
    let week_end = week_start + Days::new(6);
    let in_week: Vec<SpendingRecord> = in_range(records, week_start, week_end).cloned().collect();

    let by_weekday = weekday_totals(&in_week);
    let total: i64 = by_weekday.iter().sum();

    let prev_start = week_start - Days::new(7);
    let prev_end = week_start - Days::new(1);
    let previous_total = sum_in_range(previous_week_records, prev_start, prev_end);

    // Strictly-greater comparison keeps the earliest weekday on ties.
    let mut focus: Option<usize> = None;
    for (idx, &day_total) in by_weekday.iter().enumerate() {
        if day_total > 0 && focus.map_or(true, |best| day_total > by_weekday[best]) {
            focus = Some(idx);
        }
    }
    let focus_weekday = focus.map(|idx| WEEKDAYS[idx]);

    WeeklyReport {
        week_start,
        label: iso_week_label(week_start),
        weekday_totals: by_weekday,
        category_totals: category_totals(&in_week),
        total,
        delta: PeriodDelta::between(total, previous_total),
        focus_weekday,
    }
}

/// Cumulative daily series, category totals, month-over-month delta and the
/// top-3 memos for one calendar month.
pub fn build_monthly_report(
    records: &[SpendingRecord],
    previous_month_records: &[SpendingRecord],
    year: i32,
    month: u32,
) -> Result<MonthlyReport> {
    let (first, last) =
        month_bounds(year, month).with_context(|| format!("Invalid month: {year}-{month:02}"))?;
    let in_month: Vec<SpendingRecord> = in_range(records, first, last).cloned().collect();

    let mut daily = vec![0i64; last.day() as usize];
    for record in &in_month {
        daily[record.spent_at.day() as usize - 1] += record.amount;
    }
    let cumulative_daily: Vec<i64> = daily
        .iter()
        .scan(0i64, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect();

    let total: i64 = in_month.iter().map(|r| r.amount).sum();

    let (prev_year, prev_month) = crate::reports::week::previous_month(year, month);
    let previous_total = match month_bounds(prev_year, prev_month) {
        Some((prev_first, prev_last)) => {
            sum_in_range(previous_month_records, prev_first, prev_last)
        }
        None => 0,
    };

    Ok(MonthlyReport {
        year,
        month,
        cumulative_daily,
        category_totals: category_totals(&in_month),
        total,
        delta: PeriodDelta::between(total, previous_total),
        top_items: top_n(&memo_totals(&in_month), 3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OTHER_CATEGORY;
    use crate::reports::delta::TrendDirection;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_summary_keys_days_with_records_only() {
        let records = vec![
            SpendingRecord::new("커피", 4500, date(2024, 3, 1)),
            SpendingRecord::new("점심", 9000, date(2024, 3, 1)),
            SpendingRecord::new("택시", 12000, date(2024, 3, 15)),
            // Outside the requested month, must be filtered out.
            SpendingRecord::new("숙소", 90000, date(2024, 4, 2)),
        ];

        let summary = build_calendar_summary(&records, 2024, 3).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[&date(2024, 3, 1)], 13500);
        assert_eq!(summary[&date(2024, 3, 15)], 12000);
        assert!(!summary.contains_key(&date(2024, 3, 2)));
    }

    #[test]
    fn calendar_summary_rejects_an_invalid_month() {
        assert!(build_calendar_summary(&[], 2024, 13).is_err());
    }

    #[test]
    fn daily_report_totals_and_breaks_down_one_date() {
        let records = vec![
            SpendingRecord::new("커피", 4500, date(2024, 3, 1)).with_category("식비"),
            SpendingRecord::new("택시", 12000, date(2024, 3, 1)),
            SpendingRecord::new("영화", 15000, date(2024, 3, 2)).with_category("여가"),
        ];

        let report = build_daily_report(&records, date(2024, 3, 1));
        assert_eq!(report.total, 16500);
        assert_eq!(report.category_breakdown.get("식비"), 4500);
        assert_eq!(report.category_breakdown.get(OTHER_CATEGORY), 12000);
        assert!(!report.category_breakdown.contains("여가"));
    }

    #[test]
    fn daily_report_tolerates_an_empty_record_set() {
        let report = build_daily_report(&[], date(2024, 3, 1));
        assert_eq!(report.total, 0);
        assert!(report.category_breakdown.is_empty());
    }

    #[test]
    fn weekly_report_composes_totals_delta_and_focus() {
        let monday = date(2024, 3, 4);
        let records = vec![
            SpendingRecord::new("커피", 4500, date(2024, 3, 4)).with_category("식비"),
            SpendingRecord::new("장보기", 30000, date(2024, 3, 6)).with_category("식비"),
            SpendingRecord::new("택시", 12000, date(2024, 3, 10)),
            // Next Monday, outside the week.
            SpendingRecord::new("점심", 9000, date(2024, 3, 11)),
        ];
        let previous = vec![
            SpendingRecord::new("회식", 23250, date(2024, 2, 28)),
        ];

        let report = build_weekly_report(&records, &previous, monday);
        assert_eq!(report.label, "2024-W10");
        assert_eq!(report.total, 46500);
        assert_eq!(report.weekday_totals[0], 4500);
        assert_eq!(report.weekday_totals[2], 30000);
        assert_eq!(report.weekday_totals[6], 12000);
        assert_eq!(report.focus_weekday, Some(Weekday::Wed));
        assert_eq!(report.category_totals.get("식비"), 34500);
        // 46500 vs 23250 is exactly +100%.
        assert_eq!(report.delta.direction(), Some(TrendDirection::Up));
        assert_eq!(report.delta.display_percent(), Some(100.0));
    }

    #[test]
    fn weekly_focus_prefers_the_earliest_weekday_on_ties() {
        let monday = date(2024, 3, 4);
        let records = vec![
            SpendingRecord::new("a", 5000, date(2024, 3, 5)),
            SpendingRecord::new("b", 5000, date(2024, 3, 8)),
        ];
        let report = build_weekly_report(&records, &[], monday);
        assert_eq!(report.focus_weekday, Some(Weekday::Tue));
    }

    #[test]
    fn weekly_focus_is_absent_when_nothing_positive_was_spent() {
        let monday = date(2024, 3, 4);
        let empty = build_weekly_report(&[], &[], monday);
        assert_eq!(empty.focus_weekday, None);
        assert_eq!(empty.delta, PeriodDelta::NoBaseline);

        // A refund-only week has no focus weekday either.
        let refunds = vec![SpendingRecord::new("환불", -12000, date(2024, 3, 5))];
        let report = build_weekly_report(&refunds, &[], monday);
        assert_eq!(report.focus_weekday, None);
    }

    #[test]
    fn monthly_cumulative_series_carries_totals_across_empty_days() {
        let records = vec![
            SpendingRecord::new("점심", 1000, date(2024, 3, 1)),
            SpendingRecord::new("커피", 500, date(2024, 3, 3)),
        ];

        let report = build_monthly_report(&records, &[], 2024, 3).unwrap();
        assert_eq!(report.cumulative_daily.len(), 31);
        assert_eq!(report.cumulative_daily[0], 1000);
        assert_eq!(report.cumulative_daily[1], 1000);
        assert_eq!(report.cumulative_daily[2], 1500);
        assert_eq!(report.cumulative_daily[30], 1500);
        assert_eq!(report.total, 1500);
        assert_eq!(report.delta, PeriodDelta::NoBaseline);
    }

    #[test]
    fn monthly_report_ranks_top_three_memos() {
        let records = vec![
            SpendingRecord::new("커피", 4500, date(2024, 3, 1)),
            SpendingRecord::new("커피", 5000, date(2024, 3, 2)),
            SpendingRecord::new("택시", 12000, date(2024, 3, 3)),
            SpendingRecord::new("책", 18000, date(2024, 3, 4)),
            SpendingRecord::new("간식", 2000, date(2024, 3, 5)),
        ];
        let previous = vec![SpendingRecord::new("회식", 50000, date(2024, 2, 10))];

        let report = build_monthly_report(&records, &previous, 2024, 3).unwrap();
        let keys: Vec<&str> = report.top_items.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["책", "택시", "커피"]);
        assert_eq!(report.top_items[2].total, 9500);
        assert_eq!(report.delta.direction(), Some(TrendDirection::Down));
    }

    #[test]
    fn monthly_report_tolerates_an_empty_record_set() {
        let report = build_monthly_report(&[], &[], 2024, 2).unwrap();
        assert_eq!(report.cumulative_daily, vec![0i64; 29]);
        assert_eq!(report.total, 0);
        assert!(report.category_totals.is_empty());
        assert!(report.top_items.is_empty());
    }
}
