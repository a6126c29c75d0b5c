//! # Reporting Windows
//!
//! Date ranges and grouping modes handed to the reporting engine.
//!
//! ## Request Flow
//! ```text
//! ?startDate=2024-01-01&endDate=2024-01-31&viewMode=week
//!      │                                   │
//!      ▼                                   ▼
//! ReportingWindow::parse(start, end)   BucketMode::from_query(mode)
//!      │                                   │
//!      └───────────────┬───────────────────┘
//!                      ▼
//!          ReportService::build_report(window, mode)
//! ```
//!
//! Missing query values fall back to [`ReportConfig`], which is passed in
//! explicitly rather than read from ambient state.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Calendar-day date format used on every interface.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar day.
///
/// ```rust
/// use aistore_core::window::parse_date;
///
/// assert!(parse_date("start_date", "2024-02-29").is_ok());
/// assert!(parse_date("start_date", "2023-02-29").is_err());
/// assert!(parse_date("start_date", "29/02/2024").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

/// Number of calendar days in `[start, end]`, counting both ends.
///
/// Returns zero or a negative number when `end` is before `start`.
#[inline]
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Monday of the week containing `date`.
#[inline]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

// =============================================================================
// Configuration
// =============================================================================

/// Reporting defaults, passed explicitly into entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Length of the default report window, ending today. Default: 30
    pub default_window_days: u32,

    /// Number of days shown on the dashboard chart. Default: 7
    pub dashboard_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            default_window_days: 30,
            dashboard_days: 7,
        }
    }
}

// =============================================================================
// Reporting Window
// =============================================================================

/// An inclusive range of calendar days.
///
/// Construction enforces `start_date <= end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct ReportingWindow {
    #[ts(as = "String")]
    start_date: NaiveDate,
    #[ts(as = "String")]
    end_date: NaiveDate,
}

impl ReportingWindow {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> CoreResult<Self> {
        if start_date > end_date {
            return Err(CoreError::InvalidWindow {
                start: start_date,
                end: end_date,
            });
        }
        Ok(ReportingWindow {
            start_date,
            end_date,
        })
    }

    /// Parses a window from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> CoreResult<Self> {
        let start_date = parse_date("start_date", start)?;
        let end_date = parse_date("end_date", end)?;
        Self::new(start_date, end_date)
    }

    /// The `days` most recent days ending on (and including) `today`.
    ///
    /// ```rust
    /// use aistore_core::window::ReportingWindow;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();
    /// let window = ReportingWindow::last_days(today, 30);
    /// assert_eq!(window.start_date().to_string(), "2024-03-01");
    /// assert_eq!(window.days(), 30);
    /// ```
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let span = days.max(1) as i64 - 1;
        ReportingWindow {
            start_date: today - Duration::days(span),
            end_date: today,
        }
    }

    /// Resolves optional query values, defaulting each missing bound the
    /// way the admin report page does: end = today, start = end of the
    /// default window.
    pub fn from_query(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
        config: &ReportConfig,
    ) -> CoreResult<Self> {
        let default = Self::last_days(today, config.default_window_days);
        let start_date = match start.filter(|s| !s.trim().is_empty()) {
            Some(s) => parse_date("start_date", s)?,
            None => default.start_date,
        };
        let end_date = match end.filter(|s| !s.trim().is_empty()) {
            Some(s) => parse_date("end_date", s)?,
            None => default.end_date,
        };
        Self::new(start_date, end_date)
    }

    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[inline]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of days in the window (always >= 1).
    #[inline]
    pub fn days(&self) -> i64 {
        inclusive_days(self.start_date, self.end_date)
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )
    }
}

// =============================================================================
// Bucket Mode
// =============================================================================

/// How the per-day series is grouped in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BucketMode {
    /// One entry per day with orders (series passes through unchanged).
    #[default]
    Day,
    /// Weeks starting Monday, keyed by the Monday's date.
    Week,
    /// Calendar months, keyed `YYYY-MM`.
    Month,
}

impl BucketMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BucketMode::Day => "day",
            BucketMode::Week => "week",
            BucketMode::Month => "month",
        }
    }

    /// Lenient parse for the `viewMode` query parameter: anything other
    /// than `week` or `month` is treated as `day`.
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for BucketMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(BucketMode::Day),
            "week" => Ok(BucketMode::Week),
            "month" => Ok(BucketMode::Month),
            _ => Err(ValidationError::NotAllowed {
                field: "view_mode".to_string(),
                allowed: vec!["day".to_string(), "week".to_string(), "month".to_string()],
            }),
        }
    }
}

impl fmt::Display for BucketMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Month key (`YYYY-MM`) for a date.
pub(crate) fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

// =============================================================================
// Unit Tests
// =============================================================================
