//! Category allocation
//!
//! Splits spendable income across the fixed category set using
//! mode-dependent percentage tables. Growth mode appends a savings bucket
//! on top of the four base categories.

use crate::categories::CategoryId;
use crate::models::BudgetMode;

/// Share of spendable income going to each base category, per mode.
/// Each table sums to 1.0.
const SURVIVAL_SPLIT: [(CategoryId, f64); 4] = [
    (CategoryId::Essentials, 0.50),
    (CategoryId::FuelWork, 0.25),
    (CategoryId::Subscriptions, 0.05),
    (CategoryId::Discretionary, 0.20),
];

const NORMAL_SPLIT: [(CategoryId, f64); 4] = [
    (CategoryId::Essentials, 0.40),
    (CategoryId::FuelWork, 0.25),
    (CategoryId::Subscriptions, 0.10),
    (CategoryId::Discretionary, 0.25),
];

const GROWTH_SPLIT: [(CategoryId, f64); 4] = [
    (CategoryId::Essentials, 0.35),
    (CategoryId::FuelWork, 0.20),
    (CategoryId::Subscriptions, 0.10),
    (CategoryId::Discretionary, 0.25),
];

/// Share of the monthly income surplus routed to the growth savings bucket
const GROWTH_SURPLUS_SHARE: f64 = 0.3;

/// Cap on the buffer reserve relative to target and to total available
const RESERVE_RATIO: f64 = 0.1;

/// Percentage table for a mode
pub fn split_for(mode: BudgetMode) -> &'static [(CategoryId, f64); 4] {
    match mode {
        BudgetMode::Survival => &SURVIVAL_SPLIT,
        BudgetMode::Normal => &NORMAL_SPLIT,
        BudgetMode::Growth => &GROWTH_SPLIT,
    }
}

/// Monthly limits computed for one plan
#[derive(Debug, Clone)]
pub struct Allocation {
    /// (category, monthly limit) in table order, growth bucket last when present
    pub limits: Vec<(CategoryId, f64)>,
    /// Amount held back for the buffer this month; never planned spending
    pub buffer_reserve: f64,
    /// total_available - buffer_reserve
    pub spendable: f64,
}

impl Allocation {
    /// Sum of every category limit, growth bucket included
    pub fn total_planned(&self) -> f64 {
        self.limits.iter().map(|(_, limit)| limit).sum()
    }
}

/// Allocate spendable income across categories for the given mode.
///
/// `total_available` is the expected monthly income. The reserve is capped
/// at 10% of the buffer target and 10% of total available, whichever is
/// smaller. In growth mode a savings bucket of 30% of the expected surplus
/// is appended; its limit is clamped at zero so a forced growth override on
/// a deficit month never produces a negative limit.
pub fn allocate(
    mode: BudgetMode,
    total_available: f64,
    buffer_target: f64,
    average_expenses: f64,
) -> Allocation {
    let total_available = total_available.max(0.0);
    let buffer_reserve = (RESERVE_RATIO * buffer_target).min(RESERVE_RATIO * total_available);
    let spendable = (total_available - buffer_reserve).max(0.0);

    let mut limits: Vec<(CategoryId, f64)> = split_for(mode)
        .iter()
        .map(|(category, pct)| (*category, (spendable * pct).round()))
        .collect();

    if mode == BudgetMode::Growth {
        let surplus = (total_available - average_expenses).max(0.0);
        limits.push((CategoryId::Growth, (surplus * GROWTH_SURPLUS_SHARE).round()));
    }

    Allocation {
        limits,
        buffer_reserve,
        spendable,
    }
}
