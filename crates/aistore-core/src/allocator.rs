//! # Fixed-Cost Allocator
//!
//! Computes how much of each fixed cost belongs to a reporting window.
//!
//! ## Allocation Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cost:     [start ─────────────────────── end or window end]            │
//! │  window:              [start ─────────────────────── end]               │
//! │  overlap:             [max(starts) ───── min(ends)]                     │
//! │                                                                         │
//! │  total_days   = days(cost start .. effective end), inclusive            │
//! │  overlap_days = days(overlap start .. overlap end), inclusive           │
//! │                                                                         │
//! │  overlap_days >= total_days  →  full amount                             │
//! │  otherwise                   →  amount × overlap_days / total_days      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An ongoing cost (no end date) is treated as ending on the window's last
//! day, so it is never assumed to extend past the report.
//!
//! Shares are kept as exact ratios and summed before a single rounding to
//! the nearest whole unit, so splitting one window into several records
//! never accumulates per-record rounding drift.
//!
//! ## Example
//! ```rust
//! use aistore_core::allocator::compute_fixed_cost_total;
//! use aistore_core::window::ReportingWindow;
//! # use aistore_core::{FixedCostRecord, Money};
//! # use chrono::{NaiveDate, Utc};
//! # let record = FixedCostRecord {
//! #     id: "fc-1".into(), name: "VPS".into(), category: String::new(), notes: String::new(),
//! #     amount: Money::from_units(300_000),
//! #     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! #     end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
//! #     is_active: true, created_at: Utc::now(), updated_at: Utc::now(),
//! # };
//!
//! let window = ReportingWindow::parse("2024-01-15", "2024-01-31").unwrap();
//! let total = compute_fixed_cost_total(&[record], &window).unwrap();
//! assert_eq!(total.units(), 164_516); // 300.000 × 17 / 31
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::{round_div, Money};
use crate::types::FixedCostRecord;
use crate::validation::validate_fixed_cost_record;
use crate::window::{inclusive_days, ReportingWindow};

/// The part of one fixed cost that falls inside a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostShare {
    pub record_id: String,
    /// Days of the cost interval inside the window.
    pub overlap_days: i64,
    /// Days in the cost interval (ongoing costs end at the window end).
    pub total_days: i64,
    /// The record's full amount.
    pub amount: Money,
}

impl CostShare {
    /// True when the window covers the whole cost interval.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.overlap_days >= self.total_days
    }

    /// Exact share as `(numerator, denominator)`.
    fn ratio(&self) -> (i128, i128) {
        if self.is_full() {
            (self.amount.units() as i128, 1)
        } else {
            (
                self.amount.units() as i128 * self.overlap_days as i128,
                self.total_days as i128,
            )
        }
    }

    /// This share alone, rounded to the nearest unit.
    pub fn rounded(&self) -> Money {
        let (numer, denom) = self.ratio();
        Money::from_units(round_div(numer, denom) as i64)
    }
}

/// Works out the share of `record` attributable to `window`.
///
/// Returns `Ok(None)` when the cost interval does not touch the window.
/// The `is_active` flag is not consulted here; see
/// [`compute_fixed_cost_total`].
///
/// ## Errors
/// `ValidationError::InvalidRecord` when the record's end date precedes
/// its start date or its amount is negative.
pub fn allocate(record: &FixedCostRecord, window: &ReportingWindow) -> CoreResult<Option<CostShare>> {
    validate_fixed_cost_record(record)?;

    let cost_start = record.start_date;
    let effective_end = record.end_date.unwrap_or(window.end_date());

    let overlap_start = cost_start.max(window.start_date());
    let overlap_end = effective_end.min(window.end_date());
    if overlap_start > overlap_end {
        return Ok(None);
    }

    Ok(Some(CostShare {
        record_id: record.id.clone(),
        overlap_days: inclusive_days(overlap_start, overlap_end),
        total_days: inclusive_days(cost_start, effective_end),
        amount: record.amount,
    }))
}

/// Shares of every active record that overlaps `window`.
pub fn allocate_all(
    costs: &[FixedCostRecord],
    window: &ReportingWindow,
) -> CoreResult<Vec<CostShare>> {
    let mut shares = Vec::new();
    for record in costs.iter().filter(|c| c.is_active) {
        if let Some(share) = allocate(record, window)? {
            shares.push(share);
        }
    }
    Ok(shares)
}

/// Total fixed cost attributable to `window`.
///
/// Inactive records are skipped. The exact shares are summed and the sum
/// is rounded once, half away from zero.
pub fn compute_fixed_cost_total(
    costs: &[FixedCostRecord],
    window: &ReportingWindow,
) -> CoreResult<Money> {
    let overflow = || CoreError::overflow("fixed cost total");

    let mut whole: i128 = 0;
    // Sum of the proper fractions, kept reduced with numer < denom
    let (mut numer, mut denom): (i128, i128) = (0, 1);

    for share in allocate_all(costs, window)? {
        let (n, d) = share.ratio();
        debug!(
            record_id = %share.record_id,
            overlap_days = share.overlap_days,
            total_days = share.total_days,
            full = share.is_full(),
            "Allocated fixed cost"
        );
        whole = whole.checked_add(n / d).ok_or_else(overflow)?;

        let rem = n % d;
        if rem == 0 {
            continue;
        }

        // numer/denom + rem/d over the least common denominator
        let g = gcd(denom, d);
        let lhs = numer.checked_mul(d / g).ok_or_else(overflow)?;
        let rhs = rem.checked_mul(denom / g).ok_or_else(overflow)?;
        numer = lhs.checked_add(rhs).ok_or_else(overflow)?;
        denom = denom.checked_mul(d / g).ok_or_else(overflow)?;

        whole += numer / denom;
        numer %= denom;
        let g = gcd(numer, denom);
        numer /= g;
        denom /= g;
    }

    let total = whole
        .checked_add(round_div(numer, denom))
        .ok_or_else(overflow)?;
    let units = i64::try_from(total).map_err(|_| overflow())?;
    Ok(Money::from_units(units))
}

/// Greatest common divisor of two non-negative values, at least 1.
fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use chrono::{NaiveDate, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn cost(id: &str, amount: i64, start: NaiveDate, end: Option<NaiveDate>) -> FixedCostRecord {
        let now = Utc::now();
        FixedCostRecord {
            id: id.to_string(),
            name: format!("cost {}", id),
            category: "server".to_string(),
            notes: String::new(),
            amount: Money::from_units(amount),
            start_date: start,
            end_date: end,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn window(start: NaiveDate, end: NaiveDate) -> ReportingWindow {
        ReportingWindow::new(start, end).unwrap()
    }

    #[test]
    fn test_window_equal_to_interval_takes_full_amount() {
        let costs = [cost("a", 300_000, d(2024, 1, 1), Some(d(2024, 1, 31)))];
        let total =
            compute_fixed_cost_total(&costs, &window(d(2024, 1, 1), d(2024, 1, 31))).unwrap();
        assert_eq!(total.units(), 300_000);
    }

    #[test]
    fn test_partial_overlap_is_prorated() {
        let costs = [cost("a", 300_000, d(2024, 1, 1), Some(d(2024, 1, 31)))];
        let w = window(d(2024, 1, 15), d(2024, 1, 31));

        let share = allocate(&costs[0], &w).unwrap().unwrap();
        assert_eq!(share.overlap_days, 17);
        assert_eq!(share.total_days, 31);
        assert!(!share.is_full());

        let total = compute_fixed_cost_total(&costs, &w).unwrap();
        assert_eq!(total.units(), 164_516);
    }

    #[test]
    fn test_ongoing_cost_ends_at_window_end() {
        // 2024-01-01 .. 2024-02-29 is 60 days; the window covers 29 of them
        let costs = [cost("a", 120_000, d(2024, 1, 1), None)];
        let w = window(d(2024, 2, 1), d(2024, 2, 29));

        let share = allocate(&costs[0], &w).unwrap().unwrap();
        assert_eq!(share.total_days, 60);
        assert_eq!(share.overlap_days, 29);

        let total = compute_fixed_cost_total(&costs, &w).unwrap();
        assert_eq!(total.units(), 58_000);
    }

    #[test]
    fn test_ongoing_cost_starting_inside_window_is_full() {
        let costs = [cost("a", 50_000, d(2024, 1, 10), None)];
        let total =
            compute_fixed_cost_total(&costs, &window(d(2024, 1, 1), d(2024, 1, 31))).unwrap();
        assert_eq!(total.units(), 50_000);
    }

    #[test]
    fn test_ongoing_cost_starting_after_window_contributes_nothing() {
        let costs = [cost("a", 50_000, d(2024, 3, 1), None)];
        let total =
            compute_fixed_cost_total(&costs, &window(d(2024, 1, 1), d(2024, 1, 31))).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_no_overlap_contributes_nothing() {
        let w = window(d(2024, 1, 1), d(2024, 12, 31));

        let after = [cost("a", 999_000, d(2025, 1, 1), Some(d(2025, 1, 31)))];
        assert!(compute_fixed_cost_total(&after, &w).unwrap().is_zero());

        let before = [cost("b", 999_000, d(2023, 1, 1), Some(d(2023, 12, 31)))];
        assert!(compute_fixed_cost_total(&before, &w).unwrap().is_zero());
    }

    #[test]
    fn test_boundary_days_are_inclusive() {
        let w = window(d(2024, 1, 1), d(2024, 1, 31));

        // Ends on the window's first day: 1 of 31 days
        let ends_on_start = cost("a", 310, d(2023, 12, 2), Some(d(2024, 1, 1)));
        let share = allocate(&ends_on_start, &w).unwrap().unwrap();
        assert_eq!(share.overlap_days, 1);
        assert_eq!(share.rounded().units(), 10);

        // Starts on the window's last day: 1 of 31 days
        let starts_on_end = cost("b", 310, d(2024, 1, 31), Some(d(2024, 3, 1)));
        let share = allocate(&starts_on_end, &w).unwrap().unwrap();
        assert_eq!(share.overlap_days, 1);
        assert_eq!(share.total_days, 31);
    }

    #[test]
    fn test_single_day_cost_inside_window_is_full() {
        let costs = [cost("a", 75_000, d(2024, 1, 20), Some(d(2024, 1, 20)))];
        let w = window(d(2024, 1, 1), d(2024, 1, 31));

        let share = allocate(&costs[0], &w).unwrap().unwrap();
        assert_eq!(share.total_days, 1);
        assert!(share.is_full());
        assert_eq!(compute_fixed_cost_total(&costs, &w).unwrap().units(), 75_000);
    }

    #[test]
    fn test_inactive_records_are_excluded() {
        let mut inactive = cost("a", 300_000, d(2024, 1, 1), Some(d(2024, 1, 31)));
        inactive.is_active = false;
        let active = cost("b", 100_000, d(2024, 1, 1), Some(d(2024, 1, 31)));

        let total = compute_fixed_cost_total(
            &[inactive, active],
            &window(d(2024, 1, 1), d(2024, 1, 31)),
        )
        .unwrap();
        assert_eq!(total.units(), 100_000);
    }

    #[test]
    fn test_fractions_are_rounded_once_after_summing() {
        // Each share is 100 × 1/3 = 33.33..; rounded separately they would
        // sum to 99, the exact sum is 100.
        let w = window(d(2024, 1, 1), d(2024, 1, 1));
        let costs = [
            cost("a", 100, d(2024, 1, 1), Some(d(2024, 1, 3))),
            cost("b", 100, d(2024, 1, 1), Some(d(2024, 1, 3))),
            cost("c", 100, d(2024, 1, 1), Some(d(2024, 1, 3))),
        ];
        assert_eq!(compute_fixed_cost_total(&costs, &w).unwrap().units(), 100);
    }

    #[test]
    fn test_half_rounds_up() {
        // 1 × 1/2 = 0.5 → 1
        let costs = [cost("a", 1, d(2024, 1, 1), Some(d(2024, 1, 2)))];
        let w = window(d(2024, 1, 1), d(2024, 1, 1));
        assert_eq!(compute_fixed_cost_total(&costs, &w).unwrap().units(), 1);
    }

    #[test]
    fn test_exact_half_across_records_rounds_up() {
        // 1/3 + 1/12 + 1/12 is exactly 1/2 → 1
        let w = window(d(2024, 1, 1), d(2024, 1, 1));
        let costs = [
            cost("a", 1, d(2024, 1, 1), Some(d(2024, 1, 3))),
            cost("b", 1, d(2024, 1, 1), Some(d(2024, 1, 12))),
            cost("c", 1, d(2024, 1, 1), Some(d(2024, 1, 12))),
        ];
        assert_eq!(compute_fixed_cost_total(&costs, &w).unwrap().units(), 1);
    }

    #[test]
    fn test_fractions_carry_into_whole_units() {
        // 2/3 + 2/3 + 2/3 = 2 exactly, plus 10 whole units from the full cost
        let w = window(d(2024, 1, 1), d(2024, 1, 2));
        let costs = [
            cost("a", 1, d(2024, 1, 1), Some(d(2024, 1, 3))),
            cost("b", 1, d(2024, 1, 1), Some(d(2024, 1, 3))),
            cost("c", 1, d(2024, 1, 1), Some(d(2024, 1, 3))),
            cost("d", 10, d(2024, 1, 1), Some(d(2024, 1, 2))),
        ];
        assert_eq!(compute_fixed_cost_total(&costs, &w).unwrap().units(), 12);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(0, 0), 1);
    }

    #[test]
    fn test_inverted_record_is_rejected_with_its_id() {
        let costs = [cost("broken", 1_000, d(2024, 2, 1), Some(d(2024, 1, 1)))];
        let err = compute_fixed_cost_total(&costs, &window(d(2024, 1, 1), d(2024, 3, 1)))
            .unwrap_err();
        match err {
            CoreError::Validation(ValidationError::InvalidRecord { id, .. }) => {
                assert_eq!(id, "broken")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let costs = [cost("neg", -1, d(2024, 1, 1), None)];
        assert!(compute_fixed_cost_total(&costs, &window(d(2024, 1, 1), d(2024, 1, 31))).is_err());
    }

    #[test]
    fn test_empty_input_is_zero() {
        let total = compute_fixed_cost_total(&[], &window(d(2024, 1, 1), d(2024, 1, 31))).unwrap();
        assert!(total.is_zero());
    }
}
