//! Operating mode selection
//!
//! A pure function of current inputs, not a per-session state machine:
//! switching modes never migrates stored state because the plan is
//! recomputed from scratch each call.

use crate::models::BudgetMode;

/// Buffer health below this fraction of target forces survival mode
const SURVIVAL_BUFFER_RATIO: f64 = 0.25;

/// Income must run this far ahead of expenses (on a full buffer) to enter
/// growth mode
const GROWTH_INCOME_RATIO: f64 = 1.2;

/// Select the operating mode.
///
/// An explicit caller override wins unconditionally. Otherwise: a thin
/// buffer forces survival; a full buffer with income comfortably ahead of
/// expenses unlocks growth; everything else is normal.
pub fn select_mode(
    mode_override: Option<BudgetMode>,
    buffer_current: f64,
    buffer_target: f64,
    expected_income: f64,
    average_expenses: f64,
) -> BudgetMode {
    if let Some(mode) = mode_override {
        return mode;
    }

    if buffer_current < SURVIVAL_BUFFER_RATIO * buffer_target {
        BudgetMode::Survival
    } else if buffer_current > buffer_target
        && expected_income > GROWTH_INCOME_RATIO * average_expenses
    {
        BudgetMode::Growth
    } else {
        BudgetMode::Normal
    }
}
