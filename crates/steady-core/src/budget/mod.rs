//! Adaptive budget engine
//!
//! A synchronous, ordered data-transform pipeline:
//! transactions -> aggregation -> {volatility, buffer} -> mode ->
//! allocation -> velocity -> {alerts, confidence} -> plan.
//!
//! Every step is a pure function of its inputs; the only I/O is the single
//! upstream fetch the planner performs before the pipeline starts.

pub mod aggregate;
pub mod alerts;
pub mod allocate;
pub mod buffer;
pub mod confidence;
pub mod mode;
pub mod planner;
pub mod series;
pub mod velocity;
pub mod volatility;

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::{Error, Result};

fn month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}$").expect("static pattern"))
}

/// A validated plan month ("YYYY-MM")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanMonth {
    pub year: i32,
    pub month: u32,
}

impl PlanMonth {
    /// Parse and validate a "YYYY-MM" month string.
    ///
    /// Caller errors (bad shape, month outside 01-12) are rejected here,
    /// before any computation begins.
    pub fn parse(raw: &str) -> Result<Self> {
        if !month_pattern().is_match(raw) {
            return Err(Error::Validation(format!(
                "month must match YYYY-MM, got '{}'",
                raw
            )));
        }
        let (year_str, month_str) = raw.split_at(4);
        let year: i32 = year_str
            .parse()
            .map_err(|_| Error::Validation(format!("invalid year in '{}'", raw)))?;
        let month: u32 = month_str[1..]
            .parse()
            .map_err(|_| Error::Validation(format!("invalid month in '{}'", raw)))?;
        if !(1..=12).contains(&month) {
            return Err(Error::Validation(format!(
                "month component must be 01-12, got '{}'",
                raw
            )));
        }
        Ok(Self { year, month })
    }

    pub fn first_day(&self) -> NaiveDate {
        // Month is validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month")
    }

    pub fn days_in_month(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .expect("validated month");
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.contains(today)
    }

    /// Days of the month already elapsed, for burn-rate denominators.
    ///
    /// A closed (past) month is summarized at its full length; the current
    /// month uses the day of month. Never zero.
    pub fn elapsed_days(&self, today: NaiveDate) -> u32 {
        if self.is_current(today) {
            today.day()
        } else {
            self.days_in_month()
        }
    }

    /// Days left in the month (0 for closed months)
    pub fn remaining_days(&self, today: NaiveDate) -> u32 {
        if self.is_current(today) {
            self.days_in_month().saturating_sub(today.day())
        } else {
            0
        }
    }
}

impl std::fmt::Display for PlanMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
