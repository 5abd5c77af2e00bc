//! CSV and JSON export of metric tables and rankings.

use crate::table::{MetricTable, RankingTable};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Pretty-printed JSON format.
    Json,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// File name stem for a firm's exported analysis: every character outside
/// `[A-Za-z0-9]` becomes `_`, followed by `_analysis`.
///
/// # Examples
///
/// ```
/// use sef_output::export_file_stem;
///
/// assert_eq!(export_file_stem("AT&T Inc."), "AT_T_Inc__analysis");
/// ```
pub fn export_file_stem(firm: &str) -> String {
    let mut stem: String = firm
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    stem.push_str("_analysis");
    stem
}

/// One CSV row of a metric table.
#[derive(Debug, Serialize)]
struct MetricRowFlat<'a> {
    firm: &'a str,
    years: String,
    n: f64,
    m: f64,
}

/// One CSV row of a ranking.
#[derive(Debug, Serialize)]
struct RankingRowFlat<'a> {
    rank: usize,
    name: &'a str,
    market_value: f64,
    year: i32,
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        debug!(path = %path.display(), bytes = content.len(), "exported");
        Ok(())
    }
}

fn csv_string<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

impl Exporter for MetricTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => csv_string(self.rows.iter().map(|row| MetricRowFlat {
                firm: &self.firm,
                years: row.years.to_string(),
                n: row.n,
                m: row.m,
            })),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for RankingTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                csv_string(self.entries.iter().enumerate().map(|(idx, entry)| {
                    RankingRowFlat {
                        rank: idx + 1,
                        name: &entry.name,
                        market_value: entry.metric,
                        year: entry.year,
                    }
                }))
            }
            ExportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
