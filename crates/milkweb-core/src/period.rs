//! Quick-period system for statement date ranges
//!
//! A quick period ("today", "week", "month") sets both filter bounds
//! atomically; editing either date by hand moves the context to Custom
//! while keeping the untouched bound.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use milkweb_config::{QuickPeriod, WeekStart};

/// Active period context for the statement filter
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodContext {
    /// Selected quick period
    pub period: QuickPeriod,
    /// Week start convention from configuration
    pub week_start: WeekStart,
    /// Custom start date (when period is Custom)
    pub custom_from: Option<NaiveDate>,
    /// Custom end date (when period is Custom)
    pub custom_to: Option<NaiveDate>,
}

impl PeriodContext {
    /// Create a quick-period context
    pub fn new(period: QuickPeriod, week_start: WeekStart) -> Self {
        Self {
            period,
            week_start,
            custom_from: None,
            custom_to: None,
        }
    }

    /// Create with custom date bounds
    pub fn custom(from: NaiveDate, to: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            period: QuickPeriod::Custom,
            week_start,
            custom_from: Some(from),
            custom_to: Some(to),
        }
    }

    /// Resolve the inclusive bounds relative to a reference date
    pub fn bounds_on(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self.period {
            QuickPeriod::Today => (today, today),
            QuickPeriod::Week => {
                let offset = match self.week_start {
                    WeekStart::Monday => today.weekday().num_days_from_monday(),
                    WeekStart::Sunday => today.weekday().num_days_from_sunday(),
                };
                let start = today - Duration::days(offset as i64);
                (start, start + Duration::days(6))
            }
            QuickPeriod::Month => {
                let start = today.with_day(1).unwrap_or(today);
                let end = next_month_start(today)
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(today);
                (start, end)
            }
            QuickPeriod::Custom => (
                self.custom_from.unwrap_or(today),
                self.custom_to.unwrap_or(today),
            ),
        }
    }

    /// Resolve the inclusive bounds for the current date
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        self.bounds_on(Utc::now().date_naive())
    }

    /// Check if a date is within the period bounds
    pub fn contains(&self, date: &NaiveDate) -> bool {
        let (from, to) = self.bounds();
        *date >= from && *date <= to
    }

    /// Get a human-readable description of the period
    pub fn description(&self) -> String {
        match self.period {
            QuickPeriod::Today => "Today".to_string(),
            QuickPeriod::Week => "This Week".to_string(),
            QuickPeriod::Month => "This Month".to_string(),
            QuickPeriod::Custom => {
                if let (Some(from), Some(to)) = (self.custom_from, self.custom_to) {
                    format!("{} to {}", from, to)
                } else {
                    "Custom Range".to_string()
                }
            }
        }
    }
}

impl Default for PeriodContext {
    fn default() -> Self {
        Self::new(QuickPeriod::Month, WeekStart::Monday)
    }
}

fn next_month_start(today: NaiveDate) -> Option<NaiveDate> {
    if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
}

// ==================== Tests ====================
