//! # Order Repository
//!
//! Database operations for manually-entered orders, plus the aggregate
//! queries the report engine consumes.
//!
//! ## Paid vs. Counted
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  status      revenue / cost / profit      order count                  │
//! │  ─────────   ───────────────────────      ───────────                  │
//! │  paid        ✓ summed                     ✓ counted                    │
//! │  pending     ✗                            ✓ counted                    │
//! │  cancelled   ✗                            ✓ counted                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Window bounds are inclusive on both ends. `sale_date` is stored as
//! `YYYY-MM-DD` text, so string comparison is date comparison.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use aistore_core::validation::{validate_new_order, validate_search_query};
use aistore_core::{
    DailyStat, NewOrder, Order, OrderAggregate, OrderListFilter, OrderPage, ReportingWindow,
};

use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, customer_name, customer_phone, customer_email,
        product_id, product_name,
        listed_price, actual_price, cost, profit,
        sale_date, status, notes, created_at, updated_at
    FROM orders
"#;

/// Filter shared by the listing's count and page queries.
///
/// ?1 search, ?2 LIKE pattern, ?3 status, ?4 first day, ?5 last day.
const LIST_FILTER: &str = r#"
    WHERE (?1 = '' OR customer_name LIKE ?2 OR product_name LIKE ?2)
      AND (?3 IS NULL OR status = ?3)
      AND (?4 IS NULL OR sale_date >= ?4)
      AND (?5 IS NULL OR sale_date <= ?5)
"#;

/// Money columns summed over paid orders, shared by the aggregate queries.
const PAID_TOTALS: &str = r#"
    COALESCE(SUM(CASE WHEN status = 'paid' THEN actual_price ELSE 0 END), 0) AS total_revenue,
    COALESCE(SUM(CASE WHEN status = 'paid' THEN cost ELSE 0 END), 0) AS total_cost,
    COALESCE(SUM(CASE WHEN status = 'paid' THEN profit ELSE 0 END), 0) AS total_gross_profit,
    COUNT(*) AS total_orders,
    COUNT(CASE WHEN status = 'paid' THEN 1 END) AS paid_orders
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// One page of orders matching `filter`.
    ///
    /// The sort column comes from [`OrderSort`](aistore_core::OrderSort),
    /// never from caller text. Ties are broken by insertion order in the
    /// same direction so pages do not overlap.
    pub async fn list(&self, filter: &OrderListFilter) -> DbResult<OrderPage> {
        let search = validate_search_query(&filter.search)?;
        let pattern = format!("%{}%", search);
        let status = filter.status.map(|s| s.as_str());

        debug!(
            search = %search,
            status = ?status,
            sort = %filter.sort,
            direction = %filter.direction,
            page = filter.current_page(),
            "Listing orders"
        );

        let count_sql = format!("SELECT COUNT(*) FROM orders {LIST_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&search)
            .bind(&pattern)
            .bind(status)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .fetch_one(&self.pool)
            .await?;

        let direction = filter.direction.as_sql();
        let page_sql = format!(
            "{SELECT_COLUMNS} {LIST_FILTER}
            ORDER BY {column} {direction}, rowid {direction}
            LIMIT ?6 OFFSET ?7",
            column = filter.sort.column(),
        );
        let rows = sqlx::query_as::<_, Order>(&page_sql)
            .bind(&search)
            .bind(&pattern)
            .bind(status)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(i64::from(filter.limit()))
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(OrderPage::new(rows, total, filter))
    }

    /// Validates and records an order.
    ///
    /// ## Snapshot Pattern
    /// Product name and listed price are copied onto the order, and profit
    /// is frozen as `actual_price - cost`, so later catalogue edits never
    /// rewrite past reports.
    pub async fn insert(&self, input: &NewOrder) -> DbResult<Order> {
        validate_new_order(input)?;

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_name: input.customer_name.trim().to_string(),
            customer_phone: input.customer_phone.trim().to_string(),
            customer_email: input.customer_email.trim().to_string(),
            product_id: input.product_id.clone(),
            product_name: input.product_name.trim().to_string(),
            listed_price: input.listed_price,
            actual_price: input.actual_price,
            cost: input.cost,
            profit: input.profit(),
            sale_date: input.sale_date,
            status: input.status,
            notes: input.notes.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        debug!(
            id = %order.id,
            sale_date = %order.sale_date,
            status = %order.status,
            actual_price = %order.actual_price,
            "Inserting order"
        );

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_name, customer_phone, customer_email,
                product_id, product_name,
                listed_price, actual_price, cost, profit,
                sale_date, status, notes, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(&order.customer_email)
        .bind(&order.product_id)
        .bind(&order.product_name)
        .bind(order.listed_price)
        .bind(order.actual_price)
        .bind(order.cost)
        .bind(order.profit)
        .bind(order.sale_date)
        .bind(order.status)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    /// Validates and replaces an order's fields, recomputing profit.
    pub async fn update(&self, id: &str, input: &NewOrder) -> DbResult<Order> {
        validate_new_order(input)?;

        debug!(id = %id, status = %input.status, "Updating order");

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET
                customer_name = ?2,
                customer_phone = ?3,
                customer_email = ?4,
                product_id = ?5,
                product_name = ?6,
                listed_price = ?7,
                actual_price = ?8,
                cost = ?9,
                profit = ?10,
                sale_date = ?11,
                status = ?12,
                notes = ?13,
                updated_at = ?14
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.customer_name.trim())
        .bind(input.customer_phone.trim())
        .bind(input.customer_email.trim())
        .bind(&input.product_id)
        .bind(input.product_name.trim())
        .bind(input.listed_price)
        .bind(input.actual_price)
        .bind(input.cost)
        .bind(input.profit())
        .bind(input.sale_date)
        .bind(input.status)
        .bind(input.notes.trim())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Deletes an order.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    // =========================================================================
    // Reporting Queries
    // =========================================================================

    /// Totals over `window`.
    ///
    /// Money sums paid orders only; `total_orders` counts every status.
    pub async fn aggregate(&self, window: &ReportingWindow) -> DbResult<OrderAggregate> {
        let sql = format!(
            "SELECT {PAID_TOTALS}
            FROM orders
            WHERE sale_date >= ?1 AND sale_date <= ?2"
        );

        let aggregate = sqlx::query_as::<_, OrderAggregate>(&sql)
            .bind(window.start_date())
            .bind(window.end_date())
            .fetch_one(&self.pool)
            .await?;

        debug!(
            window = %window,
            revenue = %aggregate.total_revenue,
            orders = aggregate.total_orders,
            "Aggregated orders"
        );
        Ok(aggregate)
    }

    /// One row per day with at least one order in `window`, oldest first.
    pub async fn daily_series(&self, window: &ReportingWindow) -> DbResult<Vec<DailyStat>> {
        let series = sqlx::query_as::<_, DailyStat>(
            r#"
            SELECT
                sale_date AS date,
                COALESCE(SUM(CASE WHEN status = 'paid' THEN actual_price ELSE 0 END), 0) AS revenue,
                COALESCE(SUM(CASE WHEN status = 'paid' THEN cost ELSE 0 END), 0) AS cost,
                COALESCE(SUM(CASE WHEN status = 'paid' THEN profit ELSE 0 END), 0) AS gross_profit,
                COUNT(*) AS order_count
            FROM orders
            WHERE sale_date >= ?1 AND sale_date <= ?2
            GROUP BY sale_date
            ORDER BY sale_date ASC
            "#,
        )
        .bind(window.start_date())
        .bind(window.end_date())
        .fetch_all(&self.pool)
        .await?;

        debug!(window = %window, days = series.len(), "Loaded daily order series");
        Ok(series)
    }

    /// All-time totals for the dashboard.
    pub async fn summary(&self) -> DbResult<OrderAggregate> {
        let sql = format!("SELECT {PAID_TOTALS} FROM orders");

        let summary = sqlx::query_as::<_, OrderAggregate>(&sql)
            .fetch_one(&self.pool)
            .await?;

        Ok(summary)
    }

    /// Number of orders (any status) sold on `date`.
    pub async fn count_on(&self, date: NaiveDate) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE sale_date = ?1")
            .bind(date)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
