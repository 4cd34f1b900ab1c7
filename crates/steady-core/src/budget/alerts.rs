//! Alert generation
//!
//! Threshold rules over the velocity and buffer outputs. Only the current
//! calendar month is evaluated: a closed month is an immutable summary, not
//! something the user can act on. Rules are independent; several alerts may
//! fire in one call.

use chrono::NaiveDate;

use super::PlanMonth;
use crate::categories::CategoryId;
use crate::models::{
    Alert, AlertSeverity, AlertType, BudgetMode, CategoryAllocation, ExhaustionHorizon,
};

/// Exhaustion horizons shorter than this raise CategoryAtRisk
const AT_RISK_DAYS: f64 = 5.0;

/// Horizons below this escalate CategoryAtRisk to critical
const AT_RISK_CRITICAL_DAYS: f64 = 2.0;

/// Burn rate over recommended pace that raises SpendVelocityHigh
const VELOCITY_RATIO: f64 = 1.5;

/// Burn ratio that escalates SpendVelocityHigh to warning
const VELOCITY_WARNING_RATIO: f64 = 2.0;

/// Buffer below this fraction of target raises BufferLow
const BUFFER_LOW_RATIO: f64 = 0.3;

/// Buffer below this fraction escalates BufferLow to critical
const BUFFER_CRITICAL_RATIO: f64 = 0.1;

/// Everything the alert rules need to look at
pub struct AlertInputs<'a> {
    pub allocations: &'a [CategoryAllocation],
    pub month: &'a PlanMonth,
    pub today: NaiveDate,
    pub mode: BudgetMode,
    pub buffer_current: f64,
    pub buffer_target: f64,
    pub expected_income: f64,
    /// Credits over the trailing 7 days
    pub trailing_week_income: f64,
}

/// Evaluate every alert rule, sorted most urgent first
pub fn generate_alerts(inputs: &AlertInputs<'_>) -> Vec<Alert> {
    if !inputs.month.is_current(inputs.today) {
        return vec![];
    }

    let mut alerts = Vec::new();
    let remaining_days = inputs.month.remaining_days(inputs.today) as f64;

    for alloc in inputs.allocations {
        // The growth bucket is savings, not a spending ceiling to protect
        if alloc.id == CategoryId::Growth {
            continue;
        }
        category_at_risk(alloc, remaining_days, &mut alerts);
        spend_velocity(alloc, &mut alerts);
    }

    buffer_low(inputs, &mut alerts);
    mode_suggestion(inputs, &mut alerts);

    alerts.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
    alerts
}

fn category_at_risk(alloc: &CategoryAllocation, remaining_days: f64, alerts: &mut Vec<Alert>) {
    let days = match alloc.days_until_exhausted {
        ExhaustionHorizon::InDays(days) => days,
        ExhaustionHorizon::Never => return,
    };
    if days < AT_RISK_DAYS && days < remaining_days && remaining_days > AT_RISK_DAYS {
        let severity = if days < AT_RISK_CRITICAL_DAYS {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        };
        alerts.push(
            Alert::new(
                AlertType::CategoryAtRisk,
                alloc.id.as_str(),
                severity,
                format!(
                    "{} will run out in about {:.1} days but {:.0} days remain this month",
                    alloc.label, days, remaining_days
                ),
            )
            .with_action(format!("Pause {} spending until next month", alloc.label)),
        );
    }
}

fn spend_velocity(alloc: &CategoryAllocation, alerts: &mut Vec<Alert>) {
    if alloc.daily_recommended <= 0.0 {
        return;
    }
    if alloc.burn_rate > VELOCITY_RATIO * alloc.daily_recommended {
        let severity = if alloc.burn_rate > VELOCITY_WARNING_RATIO * alloc.daily_recommended {
            AlertSeverity::Warning
        } else {
            AlertSeverity::Info
        };
        alerts.push(Alert::new(
            AlertType::SpendVelocityHigh,
            alloc.id.as_str(),
            severity,
            format!(
                "{} is burning {:.0}/day against a recommended {:.0}/day",
                alloc.label, alloc.burn_rate, alloc.daily_recommended
            ),
        ));
    }
}

fn buffer_low(inputs: &AlertInputs<'_>, alerts: &mut Vec<Alert>) {
    if inputs.buffer_target <= 0.0 {
        return;
    }
    if inputs.buffer_current < BUFFER_LOW_RATIO * inputs.buffer_target {
        let severity = if inputs.buffer_current < BUFFER_CRITICAL_RATIO * inputs.buffer_target {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        };
        alerts.push(
            Alert::new(
                AlertType::BufferLow,
                "buffer",
                severity,
                format!(
                    "Emergency buffer is {:.0} of a {:.0} target",
                    inputs.buffer_current, inputs.buffer_target
                ),
            )
            .with_action("Switch to survival mode to rebuild the buffer".to_string()),
        );
    }
}

fn mode_suggestion(inputs: &AlertInputs<'_>, alerts: &mut Vec<Alert>) {
    let expected_weekly = inputs.expected_income / 4.0;
    if expected_weekly <= 0.0 {
        return;
    }

    let weekly = inputs.trailing_week_income;
    if weekly < 0.7 * expected_weekly && inputs.mode != BudgetMode::Survival {
        alerts.push(
            Alert::new(
                AlertType::ModeSuggestion,
                "survival",
                AlertSeverity::Warning,
                format!(
                    "Income this week ({:.0}) is well below the expected {:.0}",
                    weekly, expected_weekly
                ),
            )
            .with_action("Consider switching to survival mode".to_string()),
        );
    } else if weekly > 1.2 * expected_weekly
        && inputs.buffer_current >= 0.8 * inputs.buffer_target
        && inputs.mode != BudgetMode::Growth
    {
        alerts.push(
            Alert::new(
                AlertType::ModeSuggestion,
                "growth",
                AlertSeverity::Info,
                format!(
                    "Income this week ({:.0}) is running ahead of the expected {:.0} with a healthy buffer",
                    weekly, expected_weekly
                ),
            )
            .with_action("Consider switching to growth mode".to_string()),
        );
    }
}
