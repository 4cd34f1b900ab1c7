//! Steady Core Library
//!
//! Adaptive budget engine for gig workers with irregular income:
//! - Transaction aggregation over configurable windows
//! - Income volatility estimation (coefficient of variation)
//! - Emergency-buffer target planning
//! - Mode selection (survival / normal / growth) with user override
//! - Mode-dependent category allocation
//! - Per-category spending velocity and exhaustion projection
//! - Threshold alerts and a plan confidence score
//! - Data-driven category keyword map
//!
//! The engine is a pure computation over an externally supplied transaction
//! snapshot plus one buffer scalar; storage, AI explanation, and delivery
//! are external collaborators behind narrow interfaces.

pub mod budget;
pub mod categories;
pub mod error;
pub mod import;
pub mod models;
pub mod stores;

pub use budget::planner::{BudgetPlanner, LOOKBACK_DAYS};
pub use budget::PlanMonth;
pub use categories::{CategoryId, CategoryMap};
pub use error::{Error, Result};
pub use models::{
    Alert, AlertSeverity, AlertType, BudgetComputation, BudgetMode, BudgetPlan, BudgetSeries,
    BufferHistoryPoint, CategoryAllocation, DailySpendPoint, ExhaustionHorizon, Transaction,
};
pub use stores::{BufferStore, InMemoryStore, TransactionSource};
