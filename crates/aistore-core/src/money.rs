//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The shop sells in VND, which has no sub-unit in practice.              │
//! │                                                                         │
//! │    199.000 ₫  →  Money::from_units(199_000)                             │
//! │                                                                         │
//! │  Every stored and reported amount is an integer number of dong.        │
//! │  Fractions only appear transiently inside proration and averaging,     │
//! │  where they are carried in i128 and rounded exactly once.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aistore_core::money::Money;
//!
//! let price = Money::from_units(199_000);
//! let total = price * 3;
//! assert_eq!(total.units(), 597_000);
//! assert_eq!(total.to_string(), "597.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: net profit is routinely negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde / sqlx**: stored and serialized as a plain integer
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Order.actual_price ─┬─► OrderAggregate.total_revenue ─┐                │
/// │  Order.cost ─────────┘                                  ├─► net profit  │
/// │  FixedCost.amount ──► FixedCostAllocator (prorated) ────┘               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use aistore_core::money::Money;
    ///
    /// let rent = Money::from_units(3_000_000);
    /// assert_eq!(rent.units(), 3_000_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Divides by a count, rounding half away from zero.
    ///
    /// Returns zero when `divisor` is zero or negative.
    ///
    /// ## Example
    /// ```rust
    /// use aistore_core::money::Money;
    ///
    /// // Average order value: 1.000.000 over 3 paid orders
    /// let avg = Money::from_units(1_000_000).div_round(3);
    /// assert_eq!(avg.units(), 333_333);
    ///
    /// let avg = Money::from_units(5).div_round(2);
    /// assert_eq!(avg.units(), 3);
    /// ```
    pub fn div_round(&self, divisor: i64) -> Money {
        if divisor <= 0 {
            return Money::zero();
        }
        Money::from_units(round_div(self.0 as i128, divisor as i128) as i64)
    }
}

/// Integer division of `numer / denom` rounded half away from zero.
///
/// `denom` must be positive.
pub(crate) fn round_div(numer: i128, denom: i128) -> i128 {
    debug_assert!(denom > 0);
    let half = denom / 2;
    // i128 division truncates toward zero, so shift away from zero first
    if numer >= 0 {
        (numer + half) / denom
    } else {
        (numer - half) / denom
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays with `.` thousands separators and no fractional part, the way
/// amounts are shown throughout the admin UI (`199.000`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            f.write_str(&grouped)
        }
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(199_000);
        assert_eq!(money.units(), 199_000);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::from_units(0).to_string(), "0");
        assert_eq!(Money::from_units(999).to_string(), "999");
        assert_eq!(Money::from_units(1_000).to_string(), "1.000");
        assert_eq!(Money::from_units(199_000).to_string(), "199.000");
        assert_eq!(Money::from_units(1_234_567).to_string(), "1.234.567");
        assert_eq!(Money::from_units(-2_500_000).to_string(), "-2.500.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((b - a).units(), -500);
        assert_eq!((-a).units(), -1000);
        assert_eq!((a * 3).units(), 3000);
    }

    #[test]
    fn test_sum() {
        let items = vec![Money::from_units(1), Money::from_units(2), Money::from_units(3)];
        let total: Money = items.iter().sum();
        assert_eq!(total.units(), 6);
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_units(10).div_round(4).units(), 3); // 2.5 → 3
        assert_eq!(Money::from_units(10).div_round(3).units(), 3); // 3.33 → 3
        assert_eq!(Money::from_units(11).div_round(3).units(), 4); // 3.67 → 4
        assert_eq!(Money::from_units(-10).div_round(4).units(), -3); // -2.5 → -3
        assert_eq!(Money::from_units(10).div_round(0).units(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_units(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().units(), 100);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_units(164_516)).unwrap();
        assert_eq!(json, "164516");
    }
}
