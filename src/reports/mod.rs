mod bucket;
mod compose;
mod delta;
mod ranking;
mod week;

pub use bucket::{
    aggregate, aggregate_each, category_totals, memo_totals, tag_totals, weekday_totals, Bucket,
};
pub use compose::{
    build_calendar_summary, build_daily_report, build_monthly_report, build_weekly_report,
    CalendarSummary, DailyReport, MonthlyReport, WeeklyReport,
};
pub use delta::{PeriodDelta, TrendDirection};
pub use ranking::{top_n, RankedEntry};
pub use week::{
    days_in_month, iso_week_label, month_bounds, monday_of, previous_month, weekday_index,
};
