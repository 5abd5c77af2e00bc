//! Report generation for a single firm's analysis.

use crate::table::MetricTable;
use chrono::{DateTime, Utc};
use sef_metrics::YearRange;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required field was not set on the builder.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),
}

/// A timestamped analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Firm being analyzed.
    pub firm: String,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Year range of the analysis, `None` for the whole dataset.
    pub range: Option<YearRange>,

    /// Report contents (JSON format).
    pub contents: serde_json::Value,
}

impl Report {
    /// Create a new report.
    pub fn new(firm: String, range: Option<YearRange>, contents: serde_json::Value) -> Self {
        Self {
            firm,
            timestamp: Utc::now(),
            range,
            contents,
        }
    }

    /// Build a report whose contents are the rows of `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be serialized.
    pub fn from_table(table: &MetricTable) -> Result<Self, ReportError> {
        ReportBuilder::new()
            .firm(table.firm.clone())
            .range(table.range)
            .contents(serde_json::json!({ "series": serde_json::to_value(&table.rows)? }))
            .build()
    }

    /// Convert report to JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    firm: Option<String>,
    range: Option<YearRange>,
    contents: Option<serde_json::Value>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the firm.
    pub fn firm(mut self, firm: String) -> Self {
        self.firm = Some(firm);
        self
    }

    /// Set the year range.
    pub const fn range(mut self, range: Option<YearRange>) -> Self {
        self.range = range;
        self
    }

    /// Set the report contents.
    pub fn contents(mut self, contents: serde_json::Value) -> Self {
        self.contents = Some(contents);
        self
    }

    /// Build the report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingField`] if no firm was set.
    pub fn build(self) -> Result<Report, ReportError> {
        let firm = self.firm.ok_or(ReportError::MissingField("firm"))?;
        Ok(Report::new(
            firm,
            self.range,
            self.contents.unwrap_or(serde_json::Value::Null),
        ))
    }
}
