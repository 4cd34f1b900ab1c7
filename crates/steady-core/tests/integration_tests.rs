//! Integration tests for steady-core
//!
//! These tests exercise the full import → plan → alert workflow.

use std::io::Write;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::NamedTempFile;

use steady_core::{
    import::read_transactions_csv, AlertType, BudgetMode, BudgetPlanner, CategoryId, CategoryMap,
    InMemoryStore,
};

/// Snapshot with steady weekly payouts and routine spending, written with
/// now-relative dates so the lookback window keeps everything
fn snapshot_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,date,amount,category,merchant").unwrap();
    for week in 0..12 {
        let date = (Utc::now() - Duration::days(week * 7 + 1)).format("%Y-%m-%d");
        writeln!(file, "p{},{},800.00,gig payout,rideshare", week, date).unwrap();
    }
    for day in (1..85).step_by(2) {
        let date = (Utc::now() - Duration::days(day)).format("%Y-%m-%d");
        writeln!(file, "g{},{},-45.00,groceries,corner market", day, date).unwrap();
        if day % 10 == 1 {
            writeln!(file, "f{},{},-60.00,fuel,gas station", day, date).unwrap();
        }
    }
    file.flush().unwrap();
    file
}

fn current_month() -> String {
    Utc::now().format("%Y-%m").to_string()
}

fn planner_over(file: &NamedTempFile, buffer: f64) -> BudgetPlanner {
    let transactions = read_transactions_csv(file.path(), "u1").unwrap();
    let store = Arc::new(InMemoryStore::new(transactions, buffer));
    BudgetPlanner::new(store.clone(), store, CategoryMap::default())
}

#[tokio::test]
async fn test_full_import_to_plan_workflow() {
    let csv = snapshot_csv();
    let planner = planner_over(&csv, 2_000.0);

    let computation = planner
        .compute("u1", &current_month(), None)
        .await
        .unwrap();
    let plan = &computation.budget_plan;

    assert_eq!(plan.user_id, "u1");
    // Weekly 800 payouts normalize to roughly 3400-3500/month
    assert!(plan.total_income_expected > 2_500.0);
    assert!(plan.buffer_target > 0.0);
    assert!(plan.total_planned > 0.0);
    assert!(plan.confidence_score > 0.0 && plan.confidence_score <= 1.0);

    // Every base bucket is present with non-negative limits
    for id in CategoryId::base_categories() {
        let slot = plan.categories.iter().find(|c| c.id == *id).unwrap();
        assert!(slot.monthly_limit >= 0.0);
        assert!(slot.remaining >= 0.0);
    }
}

#[tokio::test]
async fn test_spending_rolls_up_into_the_right_buckets() {
    let csv = snapshot_csv();
    let planner = planner_over(&csv, 2_000.0);

    let computation = planner
        .compute("u1", &current_month(), None)
        .await
        .unwrap();
    let plan = &computation.budget_plan;

    let essentials = plan
        .categories
        .iter()
        .find(|c| c.id == CategoryId::Essentials)
        .unwrap();
    let fuel = plan
        .categories
        .iter()
        .find(|c| c.id == CategoryId::FuelWork)
        .unwrap();

    // Groceries land in essentials, gas station in fuel_work
    assert!(essentials.spent_this_period > 0.0);
    assert!(fuel.spent_this_period >= 0.0);
    assert!(essentials.spent_this_period > fuel.spent_this_period);
}

#[tokio::test]
async fn test_mode_override_changes_allocation() {
    let csv = snapshot_csv();
    let planner = planner_over(&csv, 2_000.0);
    let month = current_month();

    let survival = planner
        .compute("u1", &month, Some(BudgetMode::Survival))
        .await
        .unwrap();
    let growth = planner
        .compute("u1", &month, Some(BudgetMode::Growth))
        .await
        .unwrap();

    assert_eq!(survival.budget_plan.mode, BudgetMode::Survival);
    assert_eq!(growth.budget_plan.mode, BudgetMode::Growth);

    // Growth mode carries the savings bucket; survival does not
    assert!(growth
        .budget_plan
        .categories
        .iter()
        .any(|c| c.id == CategoryId::Growth));
    assert!(!survival
        .budget_plan
        .categories
        .iter()
        .any(|c| c.id == CategoryId::Growth));

    // Survival concentrates a larger share on essentials
    let share = |plan: &steady_core::BudgetPlan| {
        let essentials = plan
            .categories
            .iter()
            .find(|c| c.id == CategoryId::Essentials)
            .unwrap()
            .monthly_limit;
        essentials / plan.total_planned.max(1.0)
    };
    assert!(share(&survival.budget_plan) > share(&growth.budget_plan));
}

#[tokio::test]
async fn test_thin_buffer_raises_buffer_low_alert() {
    let csv = snapshot_csv();
    let planner = planner_over(&csv, 10.0);

    let computation = planner
        .compute("u1", &current_month(), None)
        .await
        .unwrap();

    assert_eq!(computation.budget_plan.mode, BudgetMode::Survival);
    assert!(computation
        .alerts
        .iter()
        .any(|a| a.alert_type == AlertType::BufferLow));
}

#[tokio::test]
async fn test_series_matches_plan_month() {
    let csv = snapshot_csv();
    let planner = planner_over(&csv, 2_000.0);
    let month = current_month();

    let series = planner.series("u1", &month).await.unwrap();

    assert!(!series.daily_spend.is_empty());
    let last = series.daily_spend.last().unwrap();
    assert!(last.cumulative >= series.daily_spend[0].cumulative);
    assert!(!series.buffer_history.is_empty());
    assert_eq!(series.buffer_history[0].month, month);
}

#[tokio::test]
async fn test_unknown_user_gets_degraded_plan_not_error() {
    let csv = snapshot_csv();
    let planner = planner_over(&csv, 2_000.0);

    let computation = planner
        .compute("someone-else", &current_month(), None)
        .await
        .unwrap();

    assert_eq!(computation.budget_plan.total_planned, 0.0);
    assert_eq!(computation.alerts.len(), 1);
}
