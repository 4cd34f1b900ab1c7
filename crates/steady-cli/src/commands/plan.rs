//! Plan and series command implementations

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;

use steady_core::{AlertSeverity, BudgetComputation, BudgetMode, ExhaustionHorizon};

use super::{build_planner, resolve_month};

pub async fn cmd_plan(
    file: &Path,
    user: &str,
    month: Option<&str>,
    mode: Option<&str>,
    buffer: f64,
    json: bool,
) -> Result<()> {
    let mode_override = mode
        .map(BudgetMode::from_str)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let planner = build_planner(file, user, buffer)?;
    let month = resolve_month(month);
    let computation = planner.compute(user, &month, mode_override).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&computation)?);
        return Ok(());
    }

    print_plan(&computation);
    Ok(())
}

fn print_plan(computation: &BudgetComputation) {
    let plan = &computation.budget_plan;

    let mode_icon = match plan.mode {
        BudgetMode::Survival => "🛟",
        BudgetMode::Normal => "⚖️",
        BudgetMode::Growth => "🌱",
    };

    println!();
    println!("💰 Budget Plan - {} ({})", plan.month, plan.user_id);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {} Mode: {}", mode_icon, plan.mode);
    println!("   Expected income:  ${:.2}", plan.total_income_expected);
    println!("   Planned spending: ${:.2}", plan.total_planned);
    println!(
        "   Buffer:           ${:.2} of ${:.2} target",
        plan.buffer_current, plan.buffer_target
    );
    println!(
        "   Confidence: {:.0}%   Income volatility: {:.2}",
        plan.confidence_score * 100.0,
        plan.income_volatility
    );
    println!();

    for category in &plan.categories {
        let horizon = match category.days_until_exhausted {
            ExhaustionHorizon::InDays(d) => format!("runs out in {:.1}d", d),
            ExhaustionHorizon::Never => "on track".to_string(),
        };
        println!(
            "   {:<16} ${:>8.2} limit   ${:>8.2} spent   {}",
            category.label, category.monthly_limit, category.spent_this_period, horizon
        );
    }

    if computation.alerts.is_empty() {
        println!();
        println!("✅ No alerts. Spending is on pace.");
        return;
    }

    println!();
    println!("⚠️  Alerts");
    for alert in &computation.alerts {
        let icon = match alert.severity {
            AlertSeverity::Critical => "🔴",
            AlertSeverity::Warning => "🟡",
            AlertSeverity::Info => "🔵",
        };
        println!("   {} {}: {}", icon, alert.alert_type.label(), alert.message);
        if let Some(action) = &alert.suggested_action {
            println!("      → {}", action);
        }
    }
    println!();
}

pub async fn cmd_series(
    file: &Path,
    user: &str,
    month: Option<&str>,
    buffer: f64,
) -> Result<()> {
    let planner = build_planner(file, user, buffer)?;
    let month = resolve_month(month);
    let series = planner.series(user, &month).await?;

    println!();
    println!("📈 Daily spend - {}", month);
    for point in &series.daily_spend {
        if point.spent > 0.0 {
            println!(
                "   {}  ${:>8.2}   (cumulative ${:.2})",
                point.date, point.spent, point.cumulative
            );
        }
    }

    println!();
    println!("🏦 Buffer projection");
    for point in &series.buffer_history {
        println!(
            "   {}  ${:>10.2} of ${:.2} target",
            point.month, point.projected_buffer, point.target
        );
    }
    println!();

    Ok(())
}
