//! Transaction aggregation
//!
//! Reduces a raw transaction snapshot into the income/expense scalars the
//! rest of the pipeline works from. Pure functions of their inputs.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::models::Transaction;

/// Default lookback for income estimation (two months of credits)
pub const INCOME_WINDOW_DAYS: u32 = 60;

/// Default lookback for expense averaging
pub const EXPENSE_WINDOW_DAYS: u32 = 60;

/// Window for the mode-suggestion income check
pub const TRAILING_INCOME_DAYS: u32 = 7;

/// Stand-in monthly expense figure for users with no expense history.
/// Keeps every downstream ratio off the buffer target well-defined.
pub const FALLBACK_MONTHLY_EXPENSES: f64 = 100.0;

fn in_window(tx: &Transaction, today: NaiveDate, window_days: u32) -> bool {
    tx.date() > today - Duration::days(window_days as i64) && tx.date() <= today
}

/// Estimate monthly income from credits over the trailing window.
///
/// Sums credits, normalizes by the days covered, and scales to a 30-day
/// month. Returns 0 when no credits exist; that is a valid result for a
/// user with no recorded payouts, not an error.
pub fn estimate_monthly_income(
    transactions: &[Transaction],
    today: NaiveDate,
    window_days: u32,
) -> f64 {
    let credits: f64 = transactions
        .iter()
        .filter(|t| t.is_credit() && in_window(t, today, window_days))
        .map(|t| t.amount)
        .sum();

    if credits <= 0.0 || window_days == 0 {
        return 0.0;
    }
    credits / window_days as f64 * 30.0
}

/// Average monthly expenses from debit magnitudes over the trailing window.
///
/// Falls back to [`FALLBACK_MONTHLY_EXPENSES`] when the window holds no
/// debits at all, so the buffer target never collapses to zero.
pub fn average_monthly_expenses(
    transactions: &[Transaction],
    today: NaiveDate,
    window_days: u32,
) -> f64 {
    let debits: f64 = transactions
        .iter()
        .filter(|t| t.is_debit() && in_window(t, today, window_days))
        .map(|t| t.amount.abs())
        .sum();

    if debits <= 0.0 || window_days == 0 {
        return FALLBACK_MONTHLY_EXPENSES;
    }
    debits / window_days as f64 * 30.0
}

/// Total credits over the last `days` days (mode-suggestion input)
pub fn trailing_income(transactions: &[Transaction], today: NaiveDate, days: u32) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_credit() && in_window(t, today, days))
        .map(|t| t.amount)
        .sum()
}

/// Number of distinct calendar days that have any transaction (data
/// coverage input to the confidence score)
pub fn days_with_data(transactions: &[Transaction]) -> u32 {
    let days: HashSet<NaiveDate> = transactions.iter().map(|t| t.date()).collect();
    days.len() as u32
}
