//! # Order Listing
//!
//! Filter, sort and page parameters for the order table shown under a
//! report, and the page that comes back.
//!
//! ## Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search      customer_name LIKE %q% OR product_name LIKE %q%            │
//! │  status      exact match, absent = every status                         │
//! │  start/end   inclusive sale_date bounds, each optional                  │
//! │  sort        sale_date | actual_price | profit | customer_name |        │
//! │              created_at, unknown keys fall back to sale_date            │
//! │  direction   ASC or DESC (default DESC)                                 │
//! │  page        1-based, LIMIT per_page OFFSET (page - 1) × per_page       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sort columns come from a closed enum and are never taken from user text,
//! so they can be spliced into `ORDER BY` safely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::{Order, OrderStatus};
use crate::window::ReportingWindow;

/// Rows per page on the order management table.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Rows per page under a financial report.
pub const REPORT_PER_PAGE: u32 = 20;

/// Upper bound on rows per page.
pub const MAX_PER_PAGE: u32 = 100;

// =============================================================================
// Sort Key
// =============================================================================

/// Column an order listing can be sorted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderSort {
    #[default]
    SaleDate,
    ActualPrice,
    Profit,
    CustomerName,
    CreatedAt,
}

impl OrderSort {
    /// Column name in the `orders` table.
    pub const fn column(&self) -> &'static str {
        match self {
            OrderSort::SaleDate => "sale_date",
            OrderSort::ActualPrice => "actual_price",
            OrderSort::Profit => "profit",
            OrderSort::CustomerName => "customer_name",
            OrderSort::CreatedAt => "created_at",
        }
    }

    /// Lenient parse for the `sortBy` query parameter. Unknown or missing
    /// keys sort by sale date.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("actual_price") => OrderSort::ActualPrice,
            Some("profit") => OrderSort::Profit,
            Some("customer_name") => OrderSort::CustomerName,
            Some("created_at") => OrderSort::CreatedAt,
            _ => OrderSort::SaleDate,
        }
    }
}

impl fmt::Display for OrderSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Only `ASC` (any case) sorts ascending; everything else is `DESC`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Parameters for listing orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListFilter {
    /// Substring of customer or product name. Empty matches everything.
    pub search: String,
    pub status: Option<OrderStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sort: OrderSort,
    pub direction: SortDirection,
    /// 1-based. Zero is read as the first page.
    pub page: u32,
    pub per_page: u32,
}

impl Default for OrderListFilter {
    fn default() -> Self {
        OrderListFilter {
            search: String::new(),
            status: None,
            start_date: None,
            end_date: None,
            sort: OrderSort::default(),
            direction: SortDirection::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl OrderListFilter {
    /// Orders sold inside `window`, newest first, paged the way the report
    /// page shows them.
    pub fn for_window(window: &ReportingWindow) -> Self {
        OrderListFilter {
            start_date: Some(window.start_date()),
            end_date: Some(window.end_date()),
            per_page: REPORT_PER_PAGE,
            ..Default::default()
        }
    }

    /// Requested page, never below 1.
    pub fn current_page(&self) -> u32 {
        self.page.max(1)
    }

    /// Rows per page, clamped to `1..=MAX_PER_PAGE`.
    pub fn limit(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    /// Rows skipped before the current page.
    pub fn offset(&self) -> i64 {
        i64::from(self.current_page() - 1) * i64::from(self.limit())
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page of orders plus the counts needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderPage {
    pub rows: Vec<Order>,
    /// Matching orders across all pages.
    pub total: i64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl OrderPage {
    pub fn new(rows: Vec<Order>, total: i64, filter: &OrderListFilter) -> Self {
        OrderPage {
            rows,
            total,
            total_pages: total_pages(total, filter.limit()),
            current_page: filter.current_page(),
        }
    }
}

/// `ceil(total / per_page)`; zero when nothing matched.
pub fn total_pages(total: i64, per_page: u32) -> u32 {
    if total <= 0 || per_page == 0 {
        return 0;
    }
    let per_page = i64::from(per_page);
    u32::try_from((total + per_page - 1) / per_page).unwrap_or(u32::MAX)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 15), 0);
        assert_eq!(total_pages(1, 15), 1);
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);
        assert_eq!(total_pages(41, 20), 3);
    }

    #[test]
    fn test_offset_and_limit() {
        let filter = OrderListFilter {
            page: 3,
            per_page: 20,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 40);
        assert_eq!(filter.limit(), 20);

        let first = OrderListFilter {
            page: 0,
            per_page: 0,
            ..Default::default()
        };
        assert_eq!(first.current_page(), 1);
        assert_eq!(first.limit(), 1);
        assert_eq!(first.offset(), 0);

        let huge = OrderListFilter {
            per_page: 10_000,
            ..Default::default()
        };
        assert_eq!(huge.limit(), MAX_PER_PAGE);
    }

    #[test]
    fn test_sort_falls_back_to_sale_date() {
        assert_eq!(OrderSort::from_query(Some("profit")), OrderSort::Profit);
        assert_eq!(OrderSort::from_query(Some("customer_name")).column(), "customer_name");
        assert_eq!(OrderSort::from_query(Some("id; DROP TABLE orders")), OrderSort::SaleDate);
        assert_eq!(OrderSort::from_query(None), OrderSort::SaleDate);
    }

    #[test]
    fn test_direction_defaults_to_desc() {
        assert_eq!(SortDirection::from_query(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::from_query(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::from_query(Some("up")), SortDirection::Desc);
        assert_eq!(SortDirection::from_query(None), SortDirection::Desc);
    }

    #[test]
    fn test_for_window_sets_bounds() {
        let window = ReportingWindow::parse("2024-01-01", "2024-01-31").unwrap();
        let filter = OrderListFilter::for_window(&window);

        assert_eq!(filter.start_date, Some(window.start_date()));
        assert_eq!(filter.end_date, Some(window.end_date()));
        assert_eq!(filter.limit(), REPORT_PER_PAGE);
        assert_eq!(filter.sort, OrderSort::SaleDate);
        assert_eq!(filter.direction, SortDirection::Desc);
    }

    #[test]
    fn test_page_json_shape() {
        let filter = OrderListFilter {
            page: 2,
            ..Default::default()
        };
        let page = OrderPage::new(Vec::new(), 31, &filter);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total"], 31);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["currentPage"], 2);
        assert!(json["rows"].as_array().unwrap().is_empty());
    }
}
