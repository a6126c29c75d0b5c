//! # Validation Module
//!
//! Input validation for fixed costs and orders.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Admin form                                                    │
//! │  └── validate_new_fixed_cost / validate_new_order (before INSERT)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database                                                      │
//! │  └── NOT NULL / CHECK constraints                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reporting                                                     │
//! │  └── validate_fixed_cost_record (rows read back for proration)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aistore_core::validation::validate_name;
//!
//! assert!(validate_name("name", "Thuê VPS").is_ok());
//! assert!(validate_name("name", "   ").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{FixedCostRecord, NewFixedCost, NewOrder};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name (fixed cost, customer, product snapshot).
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (lists everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary amount that may be zero but not negative.
///
/// ```rust
/// use aistore_core::money::Money;
/// use aistore_core::validation::validate_amount;
///
/// assert!(validate_amount("amount", Money::from_units(0)).is_ok());
/// assert!(validate_amount("amount", Money::from_units(-1)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Fixed Cost Validators
// =============================================================================

/// Validates admin input for a fixed cost before it is written.
///
/// ## Rules
/// - Name required
/// - Amount >= 0
/// - End date, when given, not before start date
pub fn validate_new_fixed_cost(input: &NewFixedCost) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_amount("amount", input.amount)?;

    if let Some(end) = input.end_date {
        if end < input.start_date {
            return Err(ValidationError::InvalidFormat {
                field: "end_date".to_string(),
                reason: "must not be before start_date".to_string(),
            });
        }
    }

    Ok(())
}

/// Checks a stored fixed cost before it is prorated.
///
/// Errors name the record id so the admin can locate it.
pub fn validate_fixed_cost_record(record: &FixedCostRecord) -> ValidationResult<()> {
    if record.amount.is_negative() {
        return Err(ValidationError::InvalidRecord {
            id: record.id.clone(),
            reason: format!("amount {} is negative", record.amount),
        });
    }

    if let Some(end) = record.end_date {
        if end < record.start_date {
            return Err(ValidationError::InvalidRecord {
                id: record.id.clone(),
                reason: format!(
                    "end_date {} is before start_date {}",
                    end, record.start_date
                ),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

/// Validates admin input for an order.
///
/// ## Rules
/// - Customer name and product name required
/// - Listed price, actual price and cost >= 0
///
/// A price below cost is allowed; the order just has negative profit.
pub fn validate_new_order(input: &NewOrder) -> ValidationResult<()> {
    validate_name("customer_name", &input.customer_name)?;
    validate_name("product_name", &input.product_name)?;
    validate_amount("listed_price", input.listed_price)?;
    validate_amount("actual_price", input.actual_price)?;
    validate_amount("cost", input.cost)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
    use chrono::{NaiveDate, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn new_cost() -> NewFixedCost {
        NewFixedCost {
            name: "Thuê VPS".to_string(),
            amount: Money::from_units(300_000),
            category: "server".to_string(),
            start_date: d(2024, 1, 1),
            end_date: Some(d(2024, 1, 31)),
            is_active: true,
            notes: String::new(),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Cursor Pro").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(201)).is_err());
        // Counted in characters, not bytes
        assert!(validate_name("name", &"ư".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  vps ").unwrap(), "vps");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_new_fixed_cost() {
        assert!(validate_new_fixed_cost(&new_cost()).is_ok());

        let ongoing = NewFixedCost {
            end_date: None,
            ..new_cost()
        };
        assert!(validate_new_fixed_cost(&ongoing).is_ok());

        let unnamed = NewFixedCost {
            name: " ".to_string(),
            ..new_cost()
        };
        assert!(matches!(
            validate_new_fixed_cost(&unnamed),
            Err(ValidationError::Required { .. })
        ));

        let negative = NewFixedCost {
            amount: Money::from_units(-5),
            ..new_cost()
        };
        assert!(matches!(
            validate_new_fixed_cost(&negative),
            Err(ValidationError::Negative { .. })
        ));

        let inverted = NewFixedCost {
            end_date: Some(d(2023, 12, 31)),
            ..new_cost()
        };
        assert!(validate_new_fixed_cost(&inverted).is_err());
    }

    #[test]
    fn test_validate_fixed_cost_record() {
        let now = Utc::now();
        let record = FixedCostRecord {
            id: "fc-9".to_string(),
            name: "Ads".to_string(),
            category: String::new(),
            notes: String::new(),
            amount: Money::from_units(10),
            start_date: d(2024, 1, 2),
            end_date: Some(d(2024, 1, 2)),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert!(validate_fixed_cost_record(&record).is_ok());

        let inverted = FixedCostRecord {
            end_date: Some(d(2024, 1, 1)),
            ..record.clone()
        };
        let err = validate_fixed_cost_record(&inverted).unwrap_err();
        assert!(err.to_string().contains("fc-9"));
    }

    #[test]
    fn test_validate_new_order() {
        let order = NewOrder {
            customer_name: "Lan".to_string(),
            customer_phone: "0900000000".to_string(),
            customer_email: String::new(),
            product_id: None,
            product_name: "ChatGPT Plus".to_string(),
            listed_price: Money::from_units(500_000),
            actual_price: Money::from_units(450_000),
            cost: Money::from_units(480_000),
            sale_date: d(2024, 1, 3),
            status: OrderStatus::Paid,
            notes: String::new(),
        };
        assert!(validate_new_order(&order).is_ok());

        let no_customer = NewOrder {
            customer_name: String::new(),
            ..order.clone()
        };
        assert!(validate_new_order(&no_customer).is_err());

        let negative_cost = NewOrder {
            cost: Money::from_units(-1),
            ..order
        };
        assert!(validate_new_order(&negative_cost).is_err());
    }
}
