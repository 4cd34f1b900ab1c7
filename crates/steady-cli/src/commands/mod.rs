//! Command implementations

mod categories;
mod plan;
mod serve;

pub use categories::cmd_categories;
pub use plan::{cmd_plan, cmd_series};
pub use serve::cmd_serve;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use steady_core::{BudgetPlanner, CategoryMap, InMemoryStore};

/// Build a planner over a CSV snapshot and a fixed buffer balance
pub fn build_planner(file: &Path, user: &str, buffer: f64) -> Result<BudgetPlanner> {
    let transactions = steady_core::import::read_transactions_csv(file, user)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    tracing::debug!(
        count = transactions.len(),
        file = %file.display(),
        "Imported transaction snapshot"
    );

    let store = Arc::new(InMemoryStore::new(transactions, buffer));
    let map = CategoryMap::load().context("Failed to load category map")?;
    Ok(BudgetPlanner::new(store.clone(), store, map))
}

/// Explicit month if given, current UTC month otherwise
pub fn resolve_month(month: Option<&str>) -> String {
    match month {
        Some(m) => m.to_string(),
        None => Utc::now().format("%Y-%m").to_string(),
    }
}
