//! External store interfaces
//!
//! Transaction history and the emergency-buffer balance live outside this
//! engine. Both are injected as trait objects so the planner stays a pure
//! computation that can be tested without any live backend. Retry policy
//! belongs to implementations; the planner fetches once per computation.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::error::Result;
use crate::models::Transaction;

/// Source of transaction snapshots for a user.
///
/// Implementations must tolerate users with no history and return an empty
/// list rather than an error.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// All transactions for the user with `posted_at >= now - lookback_days`,
    /// in no particular order
    async fn transactions(&self, user_id: &str, lookback_days: u32) -> Result<Vec<Transaction>>;
}

/// Accessor for the externally tracked emergency-buffer balance.
#[async_trait]
pub trait BufferStore: Send + Sync {
    /// Current buffer balance; 0 if the user has never set one
    async fn current_buffer(&self, user_id: &str) -> Result<f64>;
}

/// In-memory store backing both seams. Used by the CLI (CSV snapshots) and
/// throughout the engine tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    transactions: Vec<Transaction>,
    buffer: f64,
}

impl InMemoryStore {
    pub fn new(transactions: Vec<Transaction>, buffer: f64) -> Self {
        Self {
            transactions,
            buffer,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

#[async_trait]
impl TransactionSource for InMemoryStore {
    async fn transactions(&self, user_id: &str, lookback_days: u32) -> Result<Vec<Transaction>> {
        let cutoff = Utc::now() - Duration::days(lookback_days as i64);
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id && t.posted_at >= cutoff)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BufferStore for InMemoryStore {
    async fn current_buffer(&self, _user_id: &str) -> Result<f64> {
        Ok(self.buffer)
    }
}
