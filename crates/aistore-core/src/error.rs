//! # Error Types
//!
//! Domain-specific error types for aistore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aistore-core errors (this file)                                       │
//! │  ├── CoreError        - Report-building failures                       │
//! │  └── ValidationError  - Malformed input or records                     │
//! │                                                                         │
//! │  aistore-db errors (separate crate)                                    │
//! │  └── DbError          - Database failures, wraps CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → presentation layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retryable: the core performs no I/O, so every error is
//! a statement about the inputs it was handed.

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building reports.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required input to the report was not supplied.
    ///
    /// ## When This Occurs
    /// - The order aggregate was not fetched
    /// - The per-day order series was not fetched
    ///
    /// A report is never built from placeholder zeros. The caller must
    /// re-fetch and try again.
    #[error("Missing report data: {what}")]
    MissingData { what: String },

    /// Reporting window whose start is after its end.
    #[error("Invalid reporting window: {start} is after {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    /// An exact amount no longer fits the integer type carrying it.
    ///
    /// ## When This Occurs
    /// - Summing the fractional shares of very many fixed costs with
    ///   pairwise distinct durations
    /// - A rounded total that does not fit in `i64`
    #[error("Amount overflow while computing {what}")]
    Overflow { what: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a MissingData error for the named input.
    pub fn missing(what: impl Into<String>) -> Self {
        CoreError::MissingData { what: what.into() }
    }

    /// Creates an Overflow error for the named computation.
    pub fn overflow(what: impl Into<String>) -> Self {
        CoreError::Overflow { what: what.into() }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., a date that is not YYYY-MM-DD).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A stored record breaks its own invariants.
    ///
    /// ## When This Occurs
    /// - Fixed cost whose end date is before its start date
    /// - Fixed cost with a negative amount
    ///
    /// The id is carried so the admin can find and fix the record.
    #[error("Record {id} is invalid: {reason}")]
    InvalidRecord { id: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
