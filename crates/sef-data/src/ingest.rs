//! CSV ingestion.
//!
//! Converts tabular input into [`FirmRecord`]s. This is the only place where
//! numeric coercion happens: rows that cannot satisfy the record invariants
//! are dropped here so the metrics engine never has to re-validate them.

use crate::error::{DataError, Result};
use crate::record::FirmRecord;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Columns that must be present in the header row (after normalisation).
pub const REQUIRED_COLUMNS: &[&str] = &["name", "year", "sales", "profit", "market_value"];

/// Outcome of loading a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    /// Records that passed validation, in input order.
    pub records: Vec<FirmRecord>,

    /// Number of data rows that were dropped.
    pub skipped: usize,
}

/// A row as it appears in the file, before any coercion.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    rank: Option<String>,
    name: Option<String>,
    country: Option<String>,
    sales: Option<String>,
    profit: Option<String>,
    asset: Option<String>,
    market_value: Option<String>,
    year: Option<String>,
    id: Option<String>,
}

impl RawRow {
    fn into_record(self) -> std::result::Result<FirmRecord, &'static str> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or("missing name")?;
        let year = self
            .year
            .as_deref()
            .and_then(parse_year)
            .ok_or("missing or invalid year")?;
        let sales = self
            .sales
            .as_deref()
            .and_then(parse_number)
            .ok_or("non-numeric sales")?;
        let profit = self
            .profit
            .as_deref()
            .and_then(parse_number)
            .ok_or("non-numeric profit")?;
        let market_value = self
            .market_value
            .as_deref()
            .and_then(parse_number)
            .ok_or("non-numeric market value")?;

        Ok(FirmRecord {
            name,
            year,
            sales,
            profit,
            market_value,
            rank: self.rank,
            country: self.country,
            asset: self.asset.as_deref().and_then(parse_number),
            id: self.id,
        })
    }
}

/// Parse a finite number.
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-zero whole year. Spreadsheet exports often write `2020.0`.
fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    let year = value.parse::<i32>().ok().or_else(|| {
        let float = value.parse::<f64>().ok()?;
        let in_range = float.is_finite()
            && float.fract() == 0.0
            && float >= f64::from(i32::MIN)
            && float <= f64::from(i32::MAX);
        in_range.then_some(float as i32)
    })?;
    (year != 0).then_some(year)
}

/// Load records from any CSV reader.
///
/// # Errors
///
/// Returns an error if the input cannot be read, lacks one of
/// [`REQUIRED_COLUMNS`], or contains no valid rows.
pub fn read_csv<R: Read>(reader: R) -> Result<IngestReport> {
    read_csv_from(reader, "input")
}

/// Load records from a CSV file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or [`read_csv`] fails.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<IngestReport> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_csv_from(file, &path.display().to_string())
}

fn read_csv_from<R: Read>(reader: R, origin: &str) -> Result<IngestReport> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    if headers.is_empty() {
        return Err(DataError::EmptyDataset {
            origin: origin.to_string(),
            skipped: 0,
        });
    }

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DataError::MissingColumn((*missing).to_string()));
    }

    let mut records = Vec::new();
    let mut skipped = 0;

    for row in rdr.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "skipping unreadable row");
                skipped += 1;
                continue;
            }
        };

        let line = row.position().map(|p| p.line());
        let parsed = row
            .deserialize::<RawRow>(Some(&headers))
            .map_err(|_| "malformed row")
            .and_then(RawRow::into_record);

        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => {
                debug!(?line, reason, "skipping row");
                skipped += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(DataError::EmptyDataset {
            origin: origin.to_string(),
            skipped,
        });
    }

    debug!(origin, records = records.len(), skipped, "dataset loaded");

    Ok(IngestReport { records, skipped })
}
