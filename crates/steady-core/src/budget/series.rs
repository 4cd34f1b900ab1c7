//! Charting series
//!
//! Pure projections of the same computation the plan is built from; no
//! separate state. Used by the API's series endpoint and the CLI.

use super::PlanMonth;
use crate::models::{BufferHistoryPoint, DailySpendPoint, Transaction};

/// How far out the buffer projection runs
const PROJECTION_MONTHS: u32 = 12;

/// Daily spend points for the plan month: per-day debit totals plus a
/// running cumulative. Days without spending are included at zero so the
/// series is dense.
pub fn daily_spend_series(transactions: &[Transaction], month: &PlanMonth) -> Vec<DailySpendPoint> {
    let days = month.days_in_month();
    let first = month.first_day();
    let mut per_day = vec![0.0f64; days as usize];

    for tx in transactions {
        if !tx.is_debit() || !month.contains(tx.date()) {
            continue;
        }
        let index = (tx.date().signed_duration_since(first).num_days()) as usize;
        per_day[index] += tx.amount.abs();
    }

    let mut cumulative = 0.0;
    per_day
        .iter()
        .enumerate()
        .map(|(offset, spent)| {
            cumulative += spent;
            DailySpendPoint {
                date: first + chrono::Duration::days(offset as i64),
                spent: *spent,
                cumulative,
            }
        })
        .collect()
}

/// Projected buffer trajectory: starting from the current balance, adds the
/// monthly set-aside until the target is reached (capped at 12 months).
/// Returns at least the starting point.
pub fn buffer_projection(
    month: &PlanMonth,
    buffer_current: f64,
    buffer_target: f64,
    monthly_set_aside: f64,
) -> Vec<BufferHistoryPoint> {
    let mut points = Vec::new();
    let mut balance = buffer_current.max(0.0);
    let mut year = month.year;
    let mut month_num = month.month;

    for _ in 0..=PROJECTION_MONTHS {
        points.push(BufferHistoryPoint {
            month: format!("{:04}-{:02}", year, month_num),
            projected_buffer: balance.round(),
            target: buffer_target,
        });

        if balance >= buffer_target || monthly_set_aside <= 0.0 {
            break;
        }
        balance = (balance + monthly_set_aside).min(buffer_target);
        month_num += 1;
        if month_num > 12 {
            month_num = 1;
            year += 1;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn debit(day: u32, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2026, 8, day).unwrap();
        Transaction {
            id: format!("d{}", day),
            user_id: "u1".to_string(),
            posted_at: date.and_hms_opt(12, 0, 0).unwrap().and_utc(),
            amount: -amount,
            category: "groceries".to_string(),
            merchant: None,
        }
    }

    #[test]
    fn test_daily_series_is_dense_and_cumulative() {
        let month = PlanMonth::parse("2026-08").unwrap();
        let txs = vec![debit(1, 50.0), debit(1, 25.0), debit(10, 100.0)];
        let series = daily_spend_series(&txs, &month);

        assert_eq!(series.len(), 31);
        assert_eq!(series[0].spent, 75.0);
        assert_eq!(series[5].spent, 0.0);
        assert_eq!(series[9].spent, 100.0);
        assert_eq!(series[30].cumulative, 175.0);
    }

    #[test]
    fn test_credits_excluded_from_spend_series() {
        let month = PlanMonth::parse("2026-08").unwrap();
        let mut credit = debit(4, 0.0);
        credit.amount = 900.0;
        let series = daily_spend_series(&[credit], &month);
        assert!(series.iter().all(|p| p.spent == 0.0));
    }

    #[test]
    fn test_buffer_projection_reaches_target() {
        let month = PlanMonth::parse("2026-11").unwrap();
        let points = buffer_projection(&month, 1_000.0, 4_000.0, 1_000.0);

        assert_eq!(points.first().unwrap().projected_buffer, 1_000.0);
        assert_eq!(points.last().unwrap().projected_buffer, 4_000.0);
        // Year rollover: november start runs into the next year
        assert!(points.iter().any(|p| p.month.starts_with("2027-")));
    }

    #[test]
    fn test_buffer_projection_without_set_aside_is_flat() {
        let month = PlanMonth::parse("2026-08").unwrap();
        let points = buffer_projection(&month, 500.0, 4_000.0, 0.0);
        assert_eq!(points.len(), 1);
    }
}
