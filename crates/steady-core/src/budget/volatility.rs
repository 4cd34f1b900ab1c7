//! Income volatility estimation
//!
//! Coefficient of variation of monthly income over the trailing 90 days.
//! Gig income is lumpy; this is the single scalar the buffer planner and
//! confidence scorer react to.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Transaction;

/// Window the monthly income buckets are drawn from
pub const VOLATILITY_WINDOW_DAYS: u32 = 90;

/// Volatility assumed when fewer than two months of income exist.
/// A moderate default keeps the buffer target stable for new users.
pub const DEFAULT_VOLATILITY: f64 = 0.5;

/// Estimate income volatility as stddev / mean of calendar-month income
/// buckets over the trailing window.
///
/// Returns [`DEFAULT_VOLATILITY`] with fewer than 2 months of credit data.
/// Never negative; unbounded above (clamped downstream by the buffer
/// planner's multiplier).
pub fn income_volatility(transactions: &[Transaction], today: NaiveDate) -> f64 {
    let cutoff = today - Duration::days(VOLATILITY_WINDOW_DAYS as i64);

    // Bucket credits by calendar month
    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for tx in transactions {
        if !tx.is_credit() {
            continue;
        }
        let date = tx.date();
        if date <= cutoff || date > today {
            continue;
        }
        *monthly.entry((date.year(), date.month())).or_insert(0.0) += tx.amount;
    }

    if monthly.len() < 2 {
        return DEFAULT_VOLATILITY;
    }

    let incomes: Vec<f64> = monthly.values().copied().collect();
    let mean = incomes.iter().sum::<f64>() / incomes.len() as f64;
    if mean <= 0.0 {
        return DEFAULT_VOLATILITY;
    }

    let variance = incomes.iter().map(|i| (i - mean).powi(2)).sum::<f64>() / incomes.len() as f64;
    variance.sqrt() / mean
}
