//! # Domain Types
//!
//! Core domain types shared by the reporting engine and the database layer.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │  FixedCostRecord │   │      Order       │   │  OrderAggregate  │    │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │    │
//! │  │  amount          │   │  actual_price    │   │  total_revenue   │    │
//! │  │  start_date      │   │  cost, profit    │   │  total_cost      │    │
//! │  │  end_date?       │   │  sale_date       │   │  gross_profit    │    │
//! │  │  is_active       │   │  status          │   │  paid_orders     │    │
//! │  └──────────────────┘   └──────────────────┘   └──────────────────┘    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐                            │
//! │  │    DailyStat     │   │   OrderStatus    │                            │
//! │  │  one row per     │   │  Paid            │                            │
//! │  │  sale_date       │   │  Pending         │                            │
//! │  └──────────────────┘   │  Cancelled       │                            │
//! │                         └──────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All dates are calendar days (`NaiveDate`) with inclusive boundaries and no
//! timezone component.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Fixed Cost
// =============================================================================

/// An overhead expense (server rental, tool seats, ads) with a defined or
/// open-ended active interval.
///
/// `amount` is the total cost of the *whole* interval, not a daily or
/// monthly rate. An absent `end_date` means the cost is ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct FixedCostRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,

    pub category: String,

    pub notes: String,

    /// Total cost attributable to the entire active interval.
    pub amount: Money,

    /// First day the cost covers (inclusive).
    #[ts(as = "String")]
    pub start_date: NaiveDate,

    /// Last day the cost covers (inclusive). `None` = ongoing.
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,

    /// Inactive records are excluded from every total.
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl FixedCostRecord {
    /// Returns true when the cost has no defined end.
    #[inline]
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Admin-entered fields for creating or updating a fixed cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewFixedCost {
    pub name: String,
    pub amount: Money,
    pub category: String,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub notes: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// Payment state of a manually-entered order.
///
/// Only `Paid` orders contribute money to reports; every status counts
/// toward the order total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Customer has paid; counts as revenue.
    #[default]
    Paid,
    /// Awaiting payment.
    Pending,
    /// Order was cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Lowercase name as stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "paid",
            OrderStatus::Pending => "pending",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "paid" => Ok(OrderStatus::Paid),
            "pending" => Ok(OrderStatus::Pending),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec![
                    "paid".to_string(),
                    "pending".to_string(),
                    "cancelled".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A sale recorded by the admin. There is no payment gateway; the admin
/// types in what was charged and what the license cost.
///
/// Product data is snapshotted (`product_name`, `listed_price`) so the
/// order survives product edits and deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub product_id: Option<String>,
    pub product_name: String,
    /// Catalogue price at time of sale.
    pub listed_price: Money,
    /// What the customer actually paid.
    pub actual_price: Money,
    /// What the license cost the shop.
    pub cost: Money,
    /// `actual_price - cost`, frozen at write time.
    pub profit: Money,
    #[ts(as = "String")]
    pub sale_date: NaiveDate,
    pub status: OrderStatus,
    pub notes: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Admin-entered fields for recording an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub product_id: Option<String>,
    pub product_name: String,
    pub listed_price: Money,
    pub actual_price: Money,
    pub cost: Money,
    #[ts(as = "String")]
    pub sale_date: NaiveDate,
    pub status: OrderStatus,
    pub notes: String,
}

impl NewOrder {
    /// Gross profit of this single sale. Can be negative (sold at a loss).
    #[inline]
    pub fn profit(&self) -> Money {
        self.actual_price - self.cost
    }
}

// =============================================================================
// Order Aggregates
// =============================================================================

/// Order totals over a reporting window, supplied by the order-query
/// collaborator.
///
/// Money fields sum `paid` orders only. `total_orders` counts every order
/// in the window regardless of status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderAggregate {
    pub total_revenue: Money,
    pub total_cost: Money,
    pub total_gross_profit: Money,
    pub total_orders: i64,
    pub paid_orders: i64,
}

/// One day of order activity. Days without orders are absent, not zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyStat {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue: Money,
    pub cost: Money,
    pub gross_profit: Money,
    pub order_count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Paid);
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!("paid".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert_eq!(
            "cancelled".parse::<OrderStatus>().unwrap(),
            OrderStatus::Cancelled
        );
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_serde() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn test_new_order_profit() {
        let order = NewOrder {
            customer_name: "Minh".to_string(),
            customer_phone: String::new(),
            customer_email: String::new(),
            product_id: None,
            product_name: "Copilot Pro 1 tháng".to_string(),
            listed_price: Money::from_units(250_000),
            actual_price: Money::from_units(199_000),
            cost: Money::from_units(120_000),
            sale_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            status: OrderStatus::Paid,
            notes: String::new(),
        };
        assert_eq!(order.profit().units(), 79_000);
    }
}
