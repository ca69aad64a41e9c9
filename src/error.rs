// src/error.rs

use thiserror::Error;

/// Errors raised at the data-ingestion and export boundary.
///
/// The calculator itself never fails; anything that reaches it has
/// already been validated here.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required header was not found in a CSV file.
    #[error("missing column '{0}' (usage CSV must have headers: sku,date,qtyUsed)")]
    MissingColumn(&'static str),

    /// A numeric field was negative, NaN, infinite or unparseable.
    #[error("row {row}: invalid {field} '{value}'")]
    InvalidNumber {
        field: &'static str,
        row: usize,
        value: String,
    },

    #[error("row {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: empty sku")]
    EmptySku { row: usize },

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
