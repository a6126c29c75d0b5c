//! # Financial Report Aggregator
//!
//! Combines order aggregates with allocated fixed costs.
//!
//! ## Report Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderAggregate ──────────────┐                                         │
//! │                               │                                         │
//! │  FixedCostRecord[] ──► compute_fixed_cost_total ──► net profit          │
//! │                               │                     gross / net margin  │
//! │                               │                     avg order value     │
//! │  DailyStat[] ──► bucket_series(mode) ──────────────► series             │
//! │                                                         │               │
//! │                                                         ▼               │
//! │                                                  FinancialReport        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Building a report is a pure function of its inputs: the same inputs
//! always serialize to the same bytes.

use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::allocator::compute_fixed_cost_total;
use crate::bucket::{bucket_series, PeriodStat};
use crate::error::{CoreError, CoreResult};
use crate::money::{round_div, Money};
use crate::types::{DailyStat, FixedCostRecord, OrderAggregate};
use crate::window::{BucketMode, ReportingWindow};

/// Net-profit report for one window.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinancialReport {
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    pub bucket_mode: BucketMode,

    pub total_revenue: Money,
    pub total_cost: Money,
    pub total_gross_profit: Money,
    pub total_orders: i64,
    pub paid_orders: i64,

    /// Fixed costs prorated into the window.
    pub fixed_cost_total: Money,
    /// Gross profit minus fixed costs. Negative when costs win.
    pub net_profit: Money,
    /// Percent, one decimal place.
    pub gross_margin: f64,
    /// Percent, one decimal place. Not clamped at zero.
    pub net_margin: f64,
    pub avg_order_value: Money,

    pub series: Vec<PeriodStat>,
}

/// Builds a report.
///
/// ## Arguments
/// * `aggregate` / `series` - order data for `window`; both are required
/// * `fixed_costs` - records to prorate (inactive ones are ignored)
/// * `mode` - grouping of `series`
///
/// ## Errors
/// - `CoreError::MissingData` when `aggregate` or `series` is `None`
/// - `CoreError::Validation` when a fixed cost record is malformed
pub fn build_report(
    window: &ReportingWindow,
    aggregate: Option<&OrderAggregate>,
    series: Option<&[DailyStat]>,
    fixed_costs: &[FixedCostRecord],
    mode: BucketMode,
) -> CoreResult<FinancialReport> {
    let aggregate = aggregate.ok_or_else(|| CoreError::missing("order aggregate"))?;
    let series = series.ok_or_else(|| CoreError::missing("daily order series"))?;

    let fixed_cost_total = compute_fixed_cost_total(fixed_costs, window)?;
    let net_profit = aggregate.total_gross_profit - fixed_cost_total;

    Ok(FinancialReport {
        start_date: window.start_date(),
        end_date: window.end_date(),
        bucket_mode: mode,
        total_revenue: aggregate.total_revenue,
        total_cost: aggregate.total_cost,
        total_gross_profit: aggregate.total_gross_profit,
        total_orders: aggregate.total_orders,
        paid_orders: aggregate.paid_orders,
        fixed_cost_total,
        net_profit,
        gross_margin: margin(aggregate.total_gross_profit, aggregate.total_revenue),
        net_margin: margin(net_profit, aggregate.total_revenue),
        avg_order_value: aggregate.total_revenue.div_round(aggregate.paid_orders),
        series: bucket_series(series, mode),
    })
}

/// `part / revenue * 100`, rounded to one decimal; `0.0` without revenue.
///
/// The rounding happens on an integer count of tenths so the result is
/// the closest `f64` to a one-decimal value.
pub fn margin(part: Money, revenue: Money) -> f64 {
    if !revenue.is_positive() {
        return 0.0;
    }
    let tenths = round_div(part.units() as i128 * 1000, revenue.units() as i128);
    tenths as f64 / 10.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn january() -> ReportingWindow {
        ReportingWindow::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap()
    }

    fn aggregate(revenue: i64, cost: i64, total: i64, paid: i64) -> OrderAggregate {
        OrderAggregate {
            total_revenue: Money::from_units(revenue),
            total_cost: Money::from_units(cost),
            total_gross_profit: Money::from_units(revenue - cost),
            total_orders: total,
            paid_orders: paid,
        }
    }

    fn stat(day: u32, revenue: i64, cost: i64, orders: i64) -> DailyStat {
        DailyStat {
            date: d(2024, 1, day),
            revenue: Money::from_units(revenue),
            cost: Money::from_units(cost),
            gross_profit: Money::from_units(revenue - cost),
            order_count: orders,
        }
    }

    fn rent(amount: i64) -> FixedCostRecord {
        let now = Utc::now();
        FixedCostRecord {
            id: "rent".to_string(),
            name: "VPS".to_string(),
            category: "server".to_string(),
            notes: String::new(),
            amount: Money::from_units(amount),
            start_date: d(2024, 1, 1),
            end_date: Some(d(2024, 1, 31)),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_report_figures() {
        let agg = aggregate(1_500_000, 1_000_000, 4, 3);
        let series = vec![stat(2, 500_000, 300_000, 2), stat(9, 1_000_000, 700_000, 2)];

        let report = build_report(
            &january(),
            Some(&agg),
            Some(series.as_slice()),
            &[rent(300_000)],
            BucketMode::Day,
        )
        .unwrap();

        assert_eq!(report.fixed_cost_total.units(), 300_000);
        assert_eq!(report.net_profit.units(), 200_000);
        assert_eq!(report.gross_margin, 33.3); // 500k / 1.5M
        assert_eq!(report.net_margin, 13.3); // 200k / 1.5M
        assert_eq!(report.avg_order_value.units(), 500_000);
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.total_orders, 4);
    }

    #[test]
    fn test_net_profit_can_go_negative() {
        let agg = aggregate(1_000_000, 900_000, 1, 1);
        let report = build_report(&january(), Some(&agg), Some(&[]), &[rent(300_000)], BucketMode::Day)
            .unwrap();

        assert_eq!(report.net_profit.units(), -200_000);
        assert_eq!(report.net_margin, -20.0);
        assert_eq!(report.gross_margin, 10.0);
    }

    #[test]
    fn test_zero_revenue_reports_zero_margins() {
        let agg = aggregate(0, 0, 2, 0);
        let report = build_report(&january(), Some(&agg), Some(&[]), &[rent(300_000)], BucketMode::Day)
            .unwrap();

        assert_eq!(report.gross_margin, 0.0);
        assert_eq!(report.net_margin, 0.0);
        assert!(report.avg_order_value.is_zero());
        assert_eq!(report.net_profit.units(), -300_000);
    }

    #[test]
    fn test_missing_inputs_fail_fast() {
        let agg = aggregate(1, 0, 1, 1);

        let err = build_report(&january(), None, Some(&[]), &[], BucketMode::Day).unwrap_err();
        assert!(matches!(err, CoreError::MissingData { .. }));

        let err = build_report(&january(), Some(&agg), None, &[], BucketMode::Day).unwrap_err();
        assert!(matches!(err, CoreError::MissingData { .. }));
    }

    #[test]
    fn test_report_is_deterministic() {
        let agg = aggregate(2_345_678, 1_234_567, 9, 7);
        let series = vec![stat(1, 1_000_000, 500_000, 3), stat(20, 1_345_678, 734_567, 6)];
        let costs = vec![rent(310_000)];

        let build = || {
            let report =
                build_report(&january(), Some(&agg), Some(series.as_slice()), &costs, BucketMode::Week)
                    .unwrap();
            serde_json::to_string(&report).unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_month_buckets_preserve_totals() {
        let agg = aggregate(600, 300, 3, 3);
        let series = vec![stat(1, 100, 50, 1), stat(15, 200, 100, 1), stat(31, 300, 150, 1)];

        let day = build_report(&january(), Some(&agg), Some(series.as_slice()), &[], BucketMode::Day).unwrap();
        let month =
            build_report(&january(), Some(&agg), Some(series.as_slice()), &[], BucketMode::Month).unwrap();

        let sum = |s: &[PeriodStat]| -> (i64, i64) {
            s.iter()
                .fold((0, 0), |(r, n), p| (r + p.revenue.units(), n + p.order_count))
        };
        assert_eq!(month.series.len(), 1);
        assert_eq!(sum(&day.series), sum(&month.series));
    }

    #[test]
    fn test_serialized_field_names() {
        let agg = aggregate(100, 50, 1, 1);
        let report = build_report(&january(), Some(&agg), Some(&[]), &[], BucketMode::Month).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["bucketMode"], "month");
        assert_eq!(json["fixedCostTotal"], 0);
        assert_eq!(json["netProfit"], 50);
        assert_eq!(json["grossMargin"], 50.0);
    }

    #[test]
    fn test_margin_rounding() {
        assert_eq!(margin(Money::from_units(1), Money::from_units(3)), 33.3);
        assert_eq!(margin(Money::from_units(2), Money::from_units(3)), 66.7);
        assert_eq!(margin(Money::from_units(-1), Money::from_units(3)), -33.3);
        assert_eq!(margin(Money::from_units(5), Money::from_units(0)), 0.0);
    }
}
