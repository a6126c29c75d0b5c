//! # Repository Module
//!
//! Database repository implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportService / binaries                                               │
//! │       │                                                                 │
//! │       │  db.orders().aggregate(&window)                                 │
//! │       ▼                                                                 │
//! │  OrderRepository / FixedCostRepository                                  │
//! │  ├── get_by_id, list, insert, update, delete                            │
//! │  └── reporting queries (aggregate, daily_series, list_active)           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`FixedCostRepository`](fixed_cost::FixedCostRepository) - Fixed cost CRUD and listing
//! - [`OrderRepository`](order::OrderRepository) - Orders and report aggregates

pub mod fixed_cost;
pub mod order;
