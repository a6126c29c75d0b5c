//! # Report Service
//!
//! Entry points of the reporting engine: fetch what a report needs from the
//! repositories, then hand it to the pure functions in `aistore-core`.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  build_report(window, mode)                                            │
//! │       │                                                                 │
//! │       ├──► orders.aggregate(window)       ─┐                            │
//! │       ├──► orders.daily_series(window)    ─┼─► core::build_report       │
//! │       └──► fixed_costs.list_active()      ─┘        │                  │
//! │                                                      ▼                  │
//! │                                              FinancialReport            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any read failure aborts the report; it is never built from partial data.

use chrono::NaiveDate;
use tracing::{info, instrument};

use aistore_core::dashboard::{chart_window, recent_daily_chart};
use aistore_core::{
    compute_fixed_cost_total, BucketMode, Dashboard, FinancialReport, Money, ReportConfig,
    ReportingWindow,
};

use crate::error::DbResult;
use crate::repository::fixed_cost::FixedCostRepository;
use crate::repository::order::OrderRepository;

/// Builds reports from the database.
#[derive(Debug, Clone)]
pub struct ReportService {
    orders: OrderRepository,
    fixed_costs: FixedCostRepository,
    config: ReportConfig,
}

impl ReportService {
    pub fn new(orders: OrderRepository, fixed_costs: FixedCostRepository, config: ReportConfig) -> Self {
        ReportService {
            orders,
            fixed_costs,
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Resolves optional `startDate` / `endDate` / `viewMode` query values
    /// against the configured defaults.
    pub fn resolve_query(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        view_mode: Option<&str>,
        today: NaiveDate,
    ) -> DbResult<(ReportingWindow, BucketMode)> {
        let window = ReportingWindow::from_query(start, end, today, &self.config)?;
        Ok((window, BucketMode::from_query(view_mode)))
    }

    /// Net-profit report for `window`, series grouped by `mode`.
    #[instrument(skip_all, fields(window = %window, mode = %mode))]
    pub async fn build_report(&self, window: &ReportingWindow, mode: BucketMode) -> DbResult<FinancialReport> {
        let aggregate = self.orders.aggregate(window).await?;
        let series = self.orders.daily_series(window).await?;
        let costs = self.fixed_costs.list_active().await?;

        let report = aistore_core::build_report(window, Some(&aggregate), Some(series.as_slice()), &costs, mode)?;

        info!(
            revenue = %report.total_revenue,
            fixed_costs = %report.fixed_cost_total,
            net_profit = %report.net_profit,
            "Report built"
        );
        Ok(report)
    }

    /// Prorated fixed costs for `window` on their own.
    pub async fn compute_fixed_cost_total(&self, window: &ReportingWindow) -> DbResult<Money> {
        let costs = self.fixed_costs.list_active().await?;
        Ok(compute_fixed_cost_total(&costs, window)?)
    }

    /// All-time summary, today's order count and the recent-days chart.
    #[instrument(skip(self))]
    pub async fn dashboard(&self, today: NaiveDate) -> DbResult<Dashboard> {
        let window = chart_window(today, self.config.dashboard_days);

        let summary = self.orders.summary().await?;
        let today_orders = self.orders.count_on(today).await?;
        let series = self.orders.daily_series(&window).await?;

        Ok(Dashboard {
            summary,
            today_orders,
            chart: recent_daily_chart(today, self.config.dashboard_days, &series),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use aistore_core::{CoreError, NewFixedCost, NewOrder, OrderStatus};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sale(date: NaiveDate, price: i64, cost: i64, status: OrderStatus) -> NewOrder {
        NewOrder {
            customer_name: "Hà".to_string(),
            customer_phone: String::new(),
            customer_email: String::new(),
            product_id: None,
            product_name: "Cursor Pro".to_string(),
            listed_price: Money::from_units(price),
            actual_price: Money::from_units(price),
            cost: Money::from_units(cost),
            sale_date: date,
            status,
            notes: String::new(),
        }
    }

    fn fixed(amount: i64, start: NaiveDate, end: Option<NaiveDate>, active: bool) -> NewFixedCost {
        NewFixedCost {
            name: "VPS".to_string(),
            amount: Money::from_units(amount),
            category: "server".to_string(),
            start_date: start,
            end_date: end,
            is_active: active,
            notes: String::new(),
        }
    }

    async fn database() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let orders = db.orders();
        orders.insert(&sale(d(2024, 1, 15), 1_000_000, 600_000, OrderStatus::Paid)).await.unwrap();
        orders.insert(&sale(d(2024, 1, 16), 500_000, 250_000, OrderStatus::Paid)).await.unwrap();
        orders.insert(&sale(d(2024, 1, 22), 300_000, 200_000, OrderStatus::Pending)).await.unwrap();

        let costs = db.fixed_costs();
        costs.insert(&fixed(300_000, d(2024, 1, 1), Some(d(2024, 1, 31)), true)).await.unwrap();
        costs.insert(&fixed(9_999_999, d(2024, 1, 1), None, false)).await.unwrap();

        db
    }

    #[tokio::test]
    async fn test_build_report_end_to_end() {
        let db = database().await;
        let service = db.reports(ReportConfig::default());
        let window = ReportingWindow::new(d(2024, 1, 15), d(2024, 1, 31)).unwrap();

        let report = service.build_report(&window, BucketMode::Week).await.unwrap();

        assert_eq!(report.total_revenue.units(), 1_500_000);
        assert_eq!(report.total_gross_profit.units(), 650_000);
        assert_eq!(report.total_orders, 3);
        assert_eq!(report.paid_orders, 2);
        // 300_000 * 17 / 31, inactive record ignored
        assert_eq!(report.fixed_cost_total.units(), 164_516);
        assert_eq!(report.net_profit.units(), 485_484);
        assert_eq!(report.avg_order_value.units(), 750_000);

        let periods: Vec<&str> = report.series.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-01-15", "2024-01-22"]);
    }

    #[tokio::test]
    async fn test_compute_fixed_cost_total() {
        let db = database().await;
        let service = db.reports(ReportConfig::default());

        let january = ReportingWindow::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert_eq!(service.compute_fixed_cost_total(&january).await.unwrap().units(), 300_000);

        let february = ReportingWindow::new(d(2024, 2, 1), d(2024, 2, 29)).unwrap();
        assert!(service.compute_fixed_cost_total(&february).await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_report_is_repeatable() {
        let db = database().await;
        let service = db.reports(ReportConfig::default());
        let window = ReportingWindow::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();

        let first = service.build_report(&window, BucketMode::Month).await.unwrap();
        let second = service.build_report(&window, BucketMode::Month).await.unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_resolve_query() {
        let db = database().await;
        let service = db.reports(ReportConfig::default());

        let (window, mode) = service.resolve_query(None, None, Some("month"), d(2024, 1, 30)).unwrap();
        assert_eq!(window.start_date(), d(2024, 1, 1));
        assert_eq!(mode, BucketMode::Month);

        let err = service
            .resolve_query(Some("2024-02-01"), Some("2024-01-01"), None, d(2024, 1, 30))
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::InvalidWindow { .. })));
    }

    #[tokio::test]
    async fn test_dashboard() {
        let db = database().await;
        let service = db.reports(ReportConfig::default());

        let dashboard = service.dashboard(d(2024, 1, 16)).await.unwrap();

        assert_eq!(dashboard.summary.total_orders, 3);
        assert_eq!(dashboard.today_orders, 1);
        assert_eq!(dashboard.chart.len(), 7);
        assert_eq!(dashboard.chart[0].date, "2024-01-10");
        assert_eq!(dashboard.chart[5].revenue.units(), 1_000_000);
        assert_eq!(dashboard.chart[6].profit.units(), 250_000);
    }
}
