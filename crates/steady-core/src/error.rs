//! Error types for Steady

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller error: malformed month, missing user id. Rejected before any
    /// computation begins.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transaction or buffer store unreachable. The planner converts this
    /// into a degraded fallback plan rather than propagating it.
    #[error("Upstream store error: {0}")]
    Upstream(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
