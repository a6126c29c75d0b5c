//! # aistore-core: Pure Business Logic for the AI Store back office
//!
//! This crate holds the reporting rules of the shop as pure functions with
//! zero I/O dependencies: fixed-cost proration, net-profit reports and the
//! dashboard chart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      AI Store Back Office                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Admin pages / report binary                     │   │
//! │  │    ?startDate=..&endDate=..&viewMode=week                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              aistore-db: ReportService + repositories           │   │
//! │  │    fetch orders / fixed costs from SQLite, then call below      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aistore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  window   │  │ allocator │  │  report   │  │ dashboard │  │   │
//! │  │   │ Reporting │  │ prorate   │  │ Financial │  │ ChartPoint│  │   │
//! │  │   │  Window   │  │ fixed cost│  │  Report   │  │ zero-fill │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  bucket   │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (FixedCostRecord, Order, OrderAggregate, DailyStat)
//! - [`money`] - Whole-unit VND money type
//! - [`window`] - Reporting windows and bucket modes
//! - [`allocator`] - Fixed-cost proration
//! - [`report`] - Financial report aggregation
//! - [`bucket`] - Day / week / month grouping of the order series
//! - [`dashboard`] - Recent-days chart
//! - [`listing`] - Order table filters and pagination
//! - [`error`] - Domain error types
//! - [`validation`] - Input and record validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same inputs, same report, byte for byte
//! 2. **No Clock**: "today" is always an argument
//! 3. **Integer Money**: amounts are whole VND in `i64`; proration sums
//!    exact fractions and rounds once
//! 4. **Explicit Errors**: malformed records and missing data are typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use aistore_core::allocator::compute_fixed_cost_total;
//! use aistore_core::{FixedCostRecord, Money, ReportingWindow};
//! use chrono::{NaiveDate, Utc};
//!
//! let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let now = Utc::now();
//! let vps = FixedCostRecord {
//!     id: "vps".into(),
//!     name: "Thuê VPS".into(),
//!     category: "server".into(),
//!     notes: String::new(),
//!     amount: Money::from_units(300_000),
//!     start_date: date(1, 1),
//!     end_date: Some(date(1, 31)),
//!     is_active: true,
//!     created_at: now,
//!     updated_at: now,
//! };
//!
//! // Second half of January: 17 of 31 days
//! let window = ReportingWindow::new(date(1, 15), date(1, 31)).unwrap();
//! let total = compute_fixed_cost_total(&[vps], &window).unwrap();
//! assert_eq!(total.units(), 164_516);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocator;
pub mod bucket;
pub mod dashboard;
pub mod error;
pub mod listing;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;
pub mod window;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocator::{compute_fixed_cost_total, CostShare};
pub use bucket::PeriodStat;
pub use dashboard::{ChartPoint, Dashboard};
pub use error::{CoreError, CoreResult, ValidationError};
pub use listing::{OrderListFilter, OrderPage, OrderSort, SortDirection};
pub use money::Money;
pub use report::{build_report, FinancialReport};
pub use types::*;
pub use window::{BucketMode, ReportConfig, ReportingWindow};
