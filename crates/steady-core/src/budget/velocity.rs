//! Spending velocity
//!
//! Turns monthly limits into per-category pacing data: spent so far,
//! remaining, recommended daily pace, actual burn rate, and a projected
//! exhaustion horizon.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::PlanMonth;
use crate::categories::{CategoryId, CategoryMap};
use crate::models::{CategoryAllocation, ExhaustionHorizon, Transaction};

/// Sum of debit magnitudes per budget bucket within the plan month
pub fn month_spend(
    transactions: &[Transaction],
    map: &CategoryMap,
    month: &PlanMonth,
) -> HashMap<CategoryId, f64> {
    let mut spend: HashMap<CategoryId, f64> = HashMap::new();
    for tx in transactions {
        if !tx.is_debit() || !month.contains(tx.date()) {
            continue;
        }
        *spend.entry(map.classify(&tx.category)).or_insert(0.0) += tx.amount.abs();
    }
    spend
}

/// Build the full [`CategoryAllocation`] list from limits and month spend.
///
/// Burn rates divide by elapsed days: day-of-month for the current month,
/// full month length for a closed month (its burn rate is already fixed).
/// A zero burn rate yields the explicit `Never` horizon, not a numeric
/// overflow.
pub fn build_allocations(
    limits: &[(CategoryId, f64)],
    spend: &HashMap<CategoryId, f64>,
    month: &PlanMonth,
    today: NaiveDate,
) -> Vec<CategoryAllocation> {
    let days_in_month = month.days_in_month() as f64;
    let elapsed = month.elapsed_days(today).max(1) as f64;

    limits
        .iter()
        .map(|(category, limit)| {
            let spent = spend.get(category).copied().unwrap_or(0.0);
            let remaining = (limit - spent).max(0.0);
            let burn_rate = spent / elapsed;
            let days_until_exhausted = if burn_rate > 0.0 {
                ExhaustionHorizon::InDays(remaining / burn_rate)
            } else {
                ExhaustionHorizon::Never
            };

            CategoryAllocation {
                id: *category,
                label: category.label().to_string(),
                monthly_limit: *limit,
                spent_this_period: spent,
                remaining,
                daily_recommended: limit / days_in_month,
                burn_rate,
                days_until_exhausted,
            }
        })
        .collect()
}
