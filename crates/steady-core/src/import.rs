//! CSV transaction snapshots
//!
//! The CLI feeds the engine from a flat CSV export instead of a live store.
//! Expected header: `id,date,amount,category,merchant` where `merchant` may
//! be empty and `date` is either `YYYY-MM-DD` or a full RFC 3339 timestamp.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::Transaction;

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    date: String,
    amount: f64,
    category: String,
    #[serde(default)]
    merchant: Option<String>,
}

fn parse_posted_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Date-only rows post at noon UTC so lookback windows behave predictably
    let noon = NaiveTime::from_hms_opt(12, 0, 0)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(noon).and_utc())
}

/// Read a transaction snapshot for one user from a CSV file
pub fn read_transactions_csv(path: &Path, user_id: &str) -> Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut transactions = Vec::new();

    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let line = index + 2; // header is line 1
        let posted_at = parse_posted_at(&row.date).ok_or_else(|| {
            Error::Import(format!("line {}: unparseable date '{}'", line, row.date))
        })?;
        if !row.amount.is_finite() {
            return Err(Error::Import(format!(
                "line {}: non-finite amount for transaction '{}'",
                line, row.id
            )));
        }
        transactions.push(Transaction {
            id: row.id,
            user_id: user_id.to_string(),
            posted_at,
            amount: row.amount,
            category: row.category,
            merchant: row.merchant.filter(|m| !m.is_empty()),
        });
    }

    tracing::debug!(
        count = transactions.len(),
        path = %path.display(),
        "Loaded transaction snapshot"
    );
    Ok(transactions)
}
