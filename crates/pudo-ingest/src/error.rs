//! Error types for vendor and PUDO ingestion.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that stop a table from loading.
///
/// Individual bad rows are not errors; they are dropped and counted in
/// [`DropCounts`](crate::DropCounts).
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A column the join cannot run without is absent.
    #[error("required column '{column}' not found in {table} table")]
    MissingColumn { table: &'static str, column: String },

    /// Polars failed while reading cell values.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
