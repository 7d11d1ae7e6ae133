use serde::Serialize;

/// Which way a period-over-period comparison moved. A zero change counts as
/// [`TrendDirection::Up`], matching the arrow the client renders for 0%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Safe percentage change between a current and a previous period total.
///
/// A zero previous total has no meaningful ratio, so the comparison carries an
/// explicit no-baseline state instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodDelta {
    NoBaseline,
    Change {
        direction: TrendDirection,
        /// Absolute magnitude in percent, full precision.
        percent: f64,
    },
}

impl PeriodDelta {
    pub fn between(current: i64, previous: i64) -> Self {
        if previous == 0 {
            return PeriodDelta::NoBaseline;
        }
        let pct = (current - previous) as f64 / previous as f64 * 100.0;
        let direction = if pct >= 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        PeriodDelta::Change {
            direction,
            percent: pct.abs(),
        }
    }

    pub fn direction(&self) -> Option<TrendDirection> {
        match self {
            PeriodDelta::NoBaseline => None,
            PeriodDelta::Change { direction, .. } => Some(*direction),
        }
    }

    /// Magnitude rounded to one decimal place for display. Internally the
    /// percentage stays at full precision.
    pub fn display_percent(&self) -> Option<f64> {
        match self {
            PeriodDelta::NoBaseline => None,
            PeriodDelta::Change { percent, .. } => Some((percent * 10.0).round() / 10.0),
        }
    }
}
