//! Plan assembly
//!
//! Orchestrates the pipeline into one immutable [`BudgetPlan`] plus its
//! alert list. Caller errors are rejected before computation; everything
//! else degrades to a valid low-confidence plan. Nothing here is fatal to
//! the host process.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::{
    aggregate, alerts, allocate, buffer, confidence, mode, series, velocity, volatility, PlanMonth,
};
use crate::categories::CategoryMap;
use crate::error::{Error, Result};
use crate::models::{
    Alert, AlertSeverity, AlertType, BudgetComputation, BudgetMode, BudgetPlan, BudgetSeries,
    CategoryAllocation, ExhaustionHorizon, Transaction,
};
use crate::stores::{BufferStore, TransactionSource};

/// Transaction lookback for a plan computation
pub const LOOKBACK_DAYS: u32 = 90;

/// The adaptive budget planner.
///
/// Pure and stateless per invocation: given a transaction snapshot and a
/// buffer value it produces one plan, with no side effects beyond the two
/// upstream reads. Concurrent computations for different users need no
/// coordination, and retrying after a failed fetch is always safe.
pub struct BudgetPlanner {
    transactions: Arc<dyn TransactionSource>,
    buffers: Arc<dyn BufferStore>,
    category_map: CategoryMap,
}

impl BudgetPlanner {
    pub fn new(
        transactions: Arc<dyn TransactionSource>,
        buffers: Arc<dyn BufferStore>,
        category_map: CategoryMap,
    ) -> Self {
        Self {
            transactions,
            buffers,
            category_map,
        }
    }

    /// Compute the adaptive budget for a user and month.
    ///
    /// Rejects with [`Error::Validation`] on a malformed month or empty user
    /// id. Any upstream failure or empty snapshot yields the degraded
    /// fallback plan instead of an error.
    pub async fn compute(
        &self,
        user_id: &str,
        month: &str,
        mode_override: Option<BudgetMode>,
    ) -> Result<BudgetComputation> {
        self.compute_at(user_id, month, mode_override, Utc::now().date_naive())
            .await
    }

    /// Deterministic entrypoint: like [`compute`](Self::compute) but with an
    /// explicit "today", so burn rates and alert windows are testable.
    pub async fn compute_at(
        &self,
        user_id: &str,
        month: &str,
        mode_override: Option<BudgetMode>,
        today: NaiveDate,
    ) -> Result<BudgetComputation> {
        let user_id = validate_user_id(user_id)?;
        let plan_month = PlanMonth::parse(month)?;

        let snapshot = match self.fetch(user_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(user = user_id, error = %e, "Upstream fetch failed, degrading");
                return Ok(self.fallback(
                    user_id,
                    &plan_month,
                    mode_override,
                    "Transaction data is unavailable; showing a placeholder plan",
                ));
            }
        };

        if snapshot.transactions.is_empty() {
            tracing::debug!(user = user_id, "Empty snapshot, degrading");
            return Ok(self.fallback(
                user_id,
                &plan_month,
                mode_override,
                "No transaction history yet; plan will improve as data arrives",
            ));
        }

        Ok(self.assemble(user_id, &plan_month, mode_override, today, &snapshot))
    }

    /// Chart series for a user and month: daily spend plus the projected
    /// buffer trajectory at the plan's monthly set-aside.
    pub async fn series(&self, user_id: &str, month: &str) -> Result<BudgetSeries> {
        self.series_at(user_id, month, Utc::now().date_naive()).await
    }

    pub async fn series_at(
        &self,
        user_id: &str,
        month: &str,
        today: NaiveDate,
    ) -> Result<BudgetSeries> {
        let user_id = validate_user_id(user_id)?;
        let plan_month = PlanMonth::parse(month)?;

        let snapshot = match self.fetch(user_id).await {
            Ok(snapshot) => snapshot,
            Err(_) => Snapshot::default(),
        };

        let daily_spend = series::daily_spend_series(&snapshot.transactions, &plan_month);

        let expenses =
            aggregate::average_monthly_expenses(&snapshot.transactions, today, aggregate::EXPENSE_WINDOW_DAYS);
        let vol = volatility::income_volatility(&snapshot.transactions, today);
        let target = buffer::buffer_target(expenses, vol);
        let income =
            aggregate::estimate_monthly_income(&snapshot.transactions, today, aggregate::INCOME_WINDOW_DAYS);
        let selected = mode::select_mode(None, snapshot.buffer, target, income, expenses);
        let allocation = allocate::allocate(selected, income, target, expenses);
        let set_aside = allocation.buffer_reserve + growth_limit(&allocation);

        let buffer_history =
            series::buffer_projection(&plan_month, snapshot.buffer, target, set_aside);

        Ok(BudgetSeries {
            daily_spend,
            buffer_history,
        })
    }

    /// The one awaited step: both upstream reads, before the pure pipeline
    async fn fetch(&self, user_id: &str) -> Result<Snapshot> {
        let transactions = self
            .transactions
            .transactions(user_id, LOOKBACK_DAYS)
            .await
            .map_err(|e| Error::Upstream(format!("transaction store: {}", e)))?;
        let buffer = self
            .buffers
            .current_buffer(user_id)
            .await
            .map_err(|e| Error::Upstream(format!("buffer store: {}", e)))?;
        Ok(Snapshot {
            transactions,
            buffer: buffer.max(0.0),
        })
    }

    /// The synchronous pipeline over a fetched snapshot
    fn assemble(
        &self,
        user_id: &str,
        plan_month: &PlanMonth,
        mode_override: Option<BudgetMode>,
        today: NaiveDate,
        snapshot: &Snapshot,
    ) -> BudgetComputation {
        let txs = &snapshot.transactions;

        let expected_income =
            aggregate::estimate_monthly_income(txs, today, aggregate::INCOME_WINDOW_DAYS);
        let average_expenses =
            aggregate::average_monthly_expenses(txs, today, aggregate::EXPENSE_WINDOW_DAYS);
        let income_volatility = volatility::income_volatility(txs, today);
        let buffer_target = buffer::buffer_target(average_expenses, income_volatility);
        let buffer_current = snapshot.buffer;

        let selected_mode = mode::select_mode(
            mode_override,
            buffer_current,
            buffer_target,
            expected_income,
            average_expenses,
        );

        let allocation = allocate::allocate(
            selected_mode,
            expected_income,
            buffer_target,
            average_expenses,
        );
        let spend = velocity::month_spend(txs, &self.category_map, plan_month);
        let categories = velocity::build_allocations(&allocation.limits, &spend, plan_month, today);

        let alert_list = alerts::generate_alerts(&alerts::AlertInputs {
            allocations: &categories,
            month: plan_month,
            today,
            mode: selected_mode,
            buffer_current,
            buffer_target,
            expected_income,
            trailing_week_income: aggregate::trailing_income(
                txs,
                today,
                aggregate::TRAILING_INCOME_DAYS,
            ),
        });

        let confidence_score = confidence::confidence_score(
            income_volatility,
            aggregate::days_with_data(txs),
            buffer_current,
            buffer_target,
        );

        tracing::debug!(
            user = user_id,
            month = %plan_month,
            mode = %selected_mode,
            confidence = confidence_score,
            alerts = alert_list.len(),
            "Assembled budget plan"
        );

        BudgetComputation {
            budget_plan: BudgetPlan {
                user_id: user_id.to_string(),
                month: plan_month.to_string(),
                mode: selected_mode,
                total_planned: allocation.total_planned(),
                total_income_expected: expected_income,
                buffer_target,
                buffer_current,
                categories,
                confidence_score,
                income_volatility,
                recalculated_at: Utc::now(),
            },
            alerts: alert_list,
        }
    }

    /// Degraded plan for missing or unreachable data: fully populated,
    /// zeroed monetary fields, floor confidence, one advisory alert.
    fn fallback(
        &self,
        user_id: &str,
        plan_month: &PlanMonth,
        mode_override: Option<BudgetMode>,
        reason: &str,
    ) -> BudgetComputation {
        let selected_mode = mode_override.unwrap_or(BudgetMode::Normal);

        let categories: Vec<CategoryAllocation> = allocate::split_for(selected_mode)
            .iter()
            .map(|(category, _)| CategoryAllocation {
                id: *category,
                label: category.label().to_string(),
                monthly_limit: 0.0,
                spent_this_period: 0.0,
                remaining: 0.0,
                daily_recommended: 0.0,
                burn_rate: 0.0,
                days_until_exhausted: ExhaustionHorizon::Never,
            })
            .collect();

        let confidence_score =
            confidence::confidence_score(volatility::DEFAULT_VOLATILITY, 0, 0.0, 0.0);

        BudgetComputation {
            budget_plan: BudgetPlan {
                user_id: user_id.to_string(),
                month: plan_month.to_string(),
                mode: selected_mode,
                total_planned: 0.0,
                total_income_expected: 0.0,
                buffer_target: 0.0,
                buffer_current: 0.0,
                categories,
                confidence_score,
                income_volatility: volatility::DEFAULT_VOLATILITY,
                recalculated_at: Utc::now(),
            },
            alerts: vec![Alert::new(
                AlertType::BufferLow,
                "degraded",
                AlertSeverity::Info,
                reason,
            )],
        }
    }
}

#[derive(Default)]
struct Snapshot {
    transactions: Vec<Transaction>,
    buffer: f64,
}

fn validate_user_id(user_id: &str) -> Result<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("user id is required".to_string()));
    }
    Ok(trimmed)
}

fn growth_limit(allocation: &allocate::Allocation) -> f64 {
    allocation
        .limits
        .iter()
        .find(|(c, _)| *c == crate::categories::CategoryId::Growth)
        .map(|(_, limit)| *limit)
        .unwrap_or(0.0)
}
