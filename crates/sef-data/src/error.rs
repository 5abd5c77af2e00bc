//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Every row was rejected, or the input had no rows at all
    #[error("No valid data found in {origin} ({skipped} rows skipped)")]
    EmptyDataset {
        /// Where the rows came from (file path or "input")
        origin: String,
        /// Number of rows rejected during ingestion
        skipped: usize,
    },
}
