//! # Series Bucketing
//!
//! Re-groups the per-day order series into weeks or months for charting.
//!
//! ```text
//!  day series                       week buckets (Monday start)
//!  2024-01-01  rev 100  ─┐
//!  2024-01-03  rev  50  ─┼──────►  2024-01-01  rev 170
//!  2024-01-07  rev  20  ─┘
//!  2024-01-08  rev  40  ────────►  2024-01-08  rev  40
//! ```
//!
//! Buckets are emitted in chronological order. Summation is exact (integer
//! money), so totals across any mode are identical.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::DailyStat;
use crate::window::{month_key, week_start, BucketMode, DATE_FORMAT};

/// One point of the report chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PeriodStat {
    /// `YYYY-MM-DD` for day and week (the Monday), `YYYY-MM` for month.
    pub period: String,
    pub revenue: Money,
    pub cost: Money,
    pub gross_profit: Money,
    pub order_count: i64,
}

impl PeriodStat {
    fn empty(period: String) -> Self {
        PeriodStat {
            period,
            revenue: Money::zero(),
            cost: Money::zero(),
            gross_profit: Money::zero(),
            order_count: 0,
        }
    }

    fn absorb(&mut self, day: &DailyStat) {
        self.revenue += day.revenue;
        self.cost += day.cost;
        self.gross_profit += day.gross_profit;
        self.order_count += day.order_count;
    }
}

impl From<&DailyStat> for PeriodStat {
    fn from(day: &DailyStat) -> Self {
        PeriodStat {
            period: day.date.format(DATE_FORMAT).to_string(),
            revenue: day.revenue,
            cost: day.cost,
            gross_profit: day.gross_profit,
            order_count: day.order_count,
        }
    }
}

/// Groups `series` according to `mode`.
///
/// `Day` keeps every entry, in input order. `Week` and `Month` sum entries
/// sharing a bucket and sort buckets chronologically.
pub fn bucket_series(series: &[DailyStat], mode: BucketMode) -> Vec<PeriodStat> {
    match mode {
        BucketMode::Day => series.iter().map(PeriodStat::from).collect(),
        BucketMode::Week => group_by(series, |date| {
            week_start(date).format(DATE_FORMAT).to_string()
        }),
        BucketMode::Month => group_by(series, month_key),
    }
}

fn group_by<F>(series: &[DailyStat], key: F) -> Vec<PeriodStat>
where
    F: Fn(NaiveDate) -> String,
{
    // Both key formats sort lexically in date order
    let mut buckets: BTreeMap<String, PeriodStat> = BTreeMap::new();
    for day in series {
        let period = key(day.date);
        buckets
            .entry(period.clone())
            .or_insert_with(|| PeriodStat::empty(period))
            .absorb(day);
    }
    buckets.into_values().collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
