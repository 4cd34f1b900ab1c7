//! Budget computation handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use steady_core::{BudgetComputation, BudgetMode, BudgetSeries};

/// Query parameters for budget computation
#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    /// Optional explicit mode; wins over the engine's own selection
    pub mode: Option<String>,
}

fn parse_mode(raw: Option<&str>) -> Result<Option<BudgetMode>, AppError> {
    raw.map(|m| {
        BudgetMode::from_str(m)
            .map_err(|e| AppError::bad_request(&format!("invalid mode: {}", e)))
    })
    .transpose()
}

/// GET /api/users/:user_id/budget/:month - Compute the adaptive budget
///
/// Validation errors return 400; upstream trouble degrades to a
/// low-confidence plan with an advisory alert, never a 5xx.
pub async fn compute_budget(
    State(state): State<Arc<AppState>>,
    Path((user_id, month)): Path<(String, String)>,
    Query(params): Query<BudgetQuery>,
) -> Result<Json<BudgetComputation>, AppError> {
    let mode_override = parse_mode(params.mode.as_deref())?;

    let computation = state
        .planner
        .compute(&user_id, &month, mode_override)
        .await?;

    tracing::debug!(
        user = %user_id,
        month = %month,
        mode = %computation.budget_plan.mode,
        alerts = computation.alerts.len(),
        "Served budget plan"
    );
    Ok(Json(computation))
}

/// GET /api/users/:user_id/budget/:month/series - Chart series for the month
pub async fn budget_series(
    State(state): State<Arc<AppState>>,
    Path((user_id, month)): Path<(String, String)>,
) -> Result<Json<BudgetSeries>, AppError> {
    let series = state.planner.series(&user_id, &month).await?;
    Ok(Json(series))
}
