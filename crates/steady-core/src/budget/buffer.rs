//! Emergency buffer planning
//!
//! Higher income volatility demands a larger safety margin. The multiplier
//! is bounded so extreme volatility estimates cannot produce degenerate
//! targets.

/// Lower bound of the expense multiplier (half a month of expenses)
const MULTIPLIER_FLOOR: f64 = 0.5;

/// Upper bound of the expense multiplier (1.5 months of expenses)
const MULTIPLIER_CEIL: f64 = 1.5;

/// Target emergency-buffer amount for the given average expenses and income
/// volatility: `round(avg_expenses * clamp(0.5 + volatility * 1.5, 0.5, 1.5))`.
///
/// Monotone in volatility: a noisier income never lowers the target.
pub fn buffer_target(average_monthly_expenses: f64, volatility: f64) -> f64 {
    let multiplier = (MULTIPLIER_FLOOR + volatility * 1.5).clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEIL);
    (average_monthly_expenses * multiplier).round()
}
