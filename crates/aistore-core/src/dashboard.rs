//! # Dashboard
//!
//! Overview figures for the admin landing page.
//!
//! The chart covers the most recent `days` days ending today. The order
//! series only has rows for days with orders, so missing days are filled
//! with zeros to keep the x-axis continuous.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DailyStat, OrderAggregate};
use crate::window::{ReportingWindow, DATE_FORMAT};

/// One day on the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ChartPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Short axis label, `D/M` without padding (e.g. `5/3`).
    pub label: String,
    pub revenue: Money,
    pub profit: Money,
    pub orders: i64,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dashboard {
    /// All-time totals.
    pub summary: OrderAggregate,
    pub today_orders: i64,
    pub chart: Vec<ChartPoint>,
}

/// Window covered by [`recent_daily_chart`].
pub fn chart_window(today: NaiveDate, days: u32) -> ReportingWindow {
    ReportingWindow::last_days(today, days)
}

/// Builds a gap-free chart of the last `days` days, oldest first.
///
/// Entries of `series` outside the window are ignored.
///
/// ```rust
/// use aistore_core::dashboard::recent_daily_chart;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let chart = recent_daily_chart(today, 7, &[]);
/// assert_eq!(chart.len(), 7);
/// assert_eq!(chart[0].label, "28/2");
/// assert_eq!(chart[6].label, "5/3");
/// ```
pub fn recent_daily_chart(today: NaiveDate, days: u32, series: &[DailyStat]) -> Vec<ChartPoint> {
    let by_date: HashMap<NaiveDate, &DailyStat> = series.iter().map(|s| (s.date, s)).collect();

    chart_window(today, days)
        .start_date()
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| {
            let stat = by_date.get(&date);
            ChartPoint {
                date: date.format(DATE_FORMAT).to_string(),
                label: format!("{}/{}", date.day(), date.month()),
                revenue: stat.map_or(Money::zero(), |s| s.revenue),
                profit: stat.map_or(Money::zero(), |s| s.gross_profit),
                orders: stat.map_or(0, |s| s.order_count),
            }
        })
        .collect()
}
