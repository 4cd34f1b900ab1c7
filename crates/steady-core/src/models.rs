//! Domain models for Steady

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::categories::CategoryId;

/// A financial transaction, as supplied by the external transaction store.
///
/// Treated as an immutable fact; the engine never mutates transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// When the transaction posted
    pub posted_at: DateTime<Utc>,
    /// Negative = expense, positive = income
    pub amount: f64,
    /// Free-text category from the source; normalized via the keyword map
    pub category: String,
    pub merchant: Option<String>,
}

impl Transaction {
    /// Calendar date the transaction posted (UTC)
    pub fn date(&self) -> NaiveDate {
        self.posted_at.date_naive()
    }

    /// True for income (credit) transactions
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    /// True for expense (debit) transactions
    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }
}

/// Budgeting posture. Changes category allocation percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetMode {
    /// Buffer is thin: protect essentials, cut discretionary
    Survival,
    Normal,
    /// Buffer is full and income is running ahead: add a savings bucket
    Growth,
}

impl BudgetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Normal => "normal",
            Self::Growth => "growth",
        }
    }
}

impl std::str::FromStr for BudgetMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "survival" => Ok(Self::Survival),
            "normal" => Ok(Self::Normal),
            "growth" => Ok(Self::Growth),
            _ => Err(format!("Unknown budget mode: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projected days until a category's remaining budget runs out.
///
/// The "will never exhaust at current pace" case is a dedicated variant so it
/// stays well-defined across serialization boundaries, rather than leaning on
/// a floating-point infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum ExhaustionHorizon {
    /// Exhausts in this many days at the current burn rate
    InDays(f64),
    /// Nothing spent yet this period; no projected exhaustion
    Never,
}

impl ExhaustionHorizon {
    /// Days until exhaustion, if bounded
    pub fn days(&self) -> Option<f64> {
        match self {
            Self::InDays(d) => Some(*d),
            Self::Never => None,
        }
    }
}

/// Per-category slice of the monthly plan, with pacing data.
///
/// Invariants: `monthly_limit >= 0` and `remaining >= 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub id: CategoryId,
    pub label: String,
    pub monthly_limit: f64,
    pub spent_this_period: f64,
    /// max(0, monthly_limit - spent_this_period)
    pub remaining: f64,
    /// monthly_limit / days in the plan month
    pub daily_recommended: f64,
    /// spent_this_period / elapsed days (full month for closed months)
    pub burn_rate: f64,
    pub days_until_exhausted: ExhaustionHorizon,
}

/// A complete spending plan for one user + month + mode combination.
///
/// Recomputed from scratch on every request; never persisted by this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub user_id: String,
    /// Plan month, "YYYY-MM"
    pub month: String,
    pub mode: BudgetMode,
    /// Sum of all category limits, including the growth bucket. The buffer
    /// reserve is held back and never counted as planned spending.
    pub total_planned: f64,
    pub total_income_expected: f64,
    pub buffer_target: f64,
    pub buffer_current: f64,
    pub categories: Vec<CategoryAllocation>,
    /// Plan reliability, in (0, 1]
    pub confidence_score: f64,
    /// Coefficient of variation of monthly income; >= 0
    pub income_volatility: f64,
    pub recalculated_at: DateTime<Utc>,
}

/// Types of alerts the engine can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// A category is burning faster than its recommended daily pace
    SpendVelocityHigh,
    /// Emergency buffer is well below target
    BufferLow,
    /// Recent income suggests switching modes
    ModeSuggestion,
    /// A category will exhaust well before the month ends
    CategoryAtRisk,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpendVelocityHigh => "spend_velocity_high",
            Self::BufferLow => "buffer_low",
            Self::ModeSuggestion => "mode_suggestion",
            Self::CategoryAtRisk => "category_at_risk",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SpendVelocityHigh => "High Spend Velocity",
            Self::BufferLow => "Buffer Low",
            Self::ModeSuggestion => "Mode Suggestion",
            Self::CategoryAtRisk => "Category At Risk",
        }
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spend_velocity_high" => Ok(Self::SpendVelocityHigh),
            "buffer_low" => Ok(Self::BufferLow),
            "mode_suggestion" => Ok(Self::ModeSuggestion),
            "category_at_risk" => Ok(Self::CategoryAtRisk),
            _ => Err(format!("Unknown alert type: {}", s)),
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Info => 1,
            Self::Warning => 2,
            Self::Critical => 3,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An actionable alert raised while assembling a plan.
///
/// Alerts are generated fresh on every computation and never stored. Ids are
/// derived from type/scope/timestamp; collisions across calls are acceptable
/// since nothing deduplicates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl Alert {
    /// Create an alert with a scope-derived id
    pub fn new(
        alert_type: AlertType,
        scope: &str,
        severity: AlertSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: format!(
                "{}:{}:{}",
                alert_type.as_str(),
                scope,
                Utc::now().timestamp_millis()
            ),
            alert_type,
            severity,
            message: message.into(),
            suggested_action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = Some(action.into());
        self
    }
}

/// One day of spending in the plan month (charting series)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySpendPoint {
    pub date: NaiveDate,
    /// Total debits that day
    pub spent: f64,
    /// Running total for the month through this day
    pub cumulative: f64,
}

/// One month of projected buffer growth (charting series)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferHistoryPoint {
    /// Projection month, "YYYY-MM"
    pub month: String,
    pub projected_buffer: f64,
    pub target: f64,
}

/// The full response of a budget computation: one plan plus its alerts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetComputation {
    pub budget_plan: BudgetPlan,
    pub alerts: Vec<Alert>,
}

/// Chart series derived from the same computation as the plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSeries {
    pub daily_spend: Vec<DailySpendPoint>,
    pub buffer_history: Vec<BufferHistoryPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_budget_mode_round_trip() {
        assert_eq!(BudgetMode::from_str("growth").unwrap(), BudgetMode::Growth);
        assert_eq!(BudgetMode::Survival.as_str(), "survival");
        assert!(BudgetMode::from_str("panic").is_err());
    }

    #[test]
    fn test_severity_priority() {
        assert!(AlertSeverity::Critical.priority() > AlertSeverity::Warning.priority());
        assert!(AlertSeverity::Warning.priority() > AlertSeverity::Info.priority());
    }

    #[test]
    fn test_exhaustion_horizon_serialization() {
        let never = serde_json::to_value(ExhaustionHorizon::Never).unwrap();
        assert_eq!(never["kind"], "never");

        let bounded = serde_json::to_value(ExhaustionHorizon::InDays(3.5)).unwrap();
        assert_eq!(bounded["kind"], "in_days");
        assert_eq!(bounded["days"], 3.5);
    }

    #[test]
    fn test_alert_id_carries_type_and_scope() {
        let alert = Alert::new(
            AlertType::BufferLow,
            "buffer",
            AlertSeverity::Warning,
            "Buffer below 30% of target",
        );
        assert!(alert.id.starts_with("buffer_low:buffer:"));
        assert!(alert.suggested_action.is_none());
    }
}
