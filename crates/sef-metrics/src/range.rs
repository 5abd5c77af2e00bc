//! Year-range filtering.
//!
//! The filter itself is a plain predicate over record years. The helpers
//! around it ([`year_bounds`], [`YearRange::clamped`], [`RangePreset`]) are
//! what a range selector uses to keep `from <= to` inside the dataset bounds.

use derive_more::Display;
use sef_data::FirmRecord;
use serde::{Deserialize, Serialize};

/// Inclusive interval of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{from}..={to}")]
pub struct YearRange {
    /// First year included.
    pub from: i32,
    /// Last year included.
    pub to: i32,
}

impl YearRange {
    /// Create a range without validating `from <= to`.
    pub const fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    /// Create a range clamped into `bounds`, with `from` pulled down to `to`
    /// if the two would cross.
    ///
    /// # Examples
    ///
    /// ```
    /// use sef_metrics::YearRange;
    ///
    /// let bounds = YearRange::new(2008, 2023);
    /// assert_eq!(YearRange::clamped(1990, 2030, bounds), bounds);
    /// assert_eq!(
    ///     YearRange::clamped(2020, 2015, bounds),
    ///     YearRange::new(2015, 2015)
    /// );
    /// ```
    pub fn clamped(from: i32, to: i32, bounds: Self) -> Self {
        let clamp = |year: i32| year.max(bounds.from).min(bounds.to);
        let to = clamp(to);
        let from = clamp(from).min(to);
        Self { from, to }
    }

    /// Whether `year` lies inside the range.
    pub const fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }

    /// Number of calendar years covered.
    pub const fn span(&self) -> i64 {
        self.to as i64 - self.from as i64 + 1
    }
}

/// Quick range selections offered next to the range slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePreset {
    /// The whole dataset.
    AllYears,
    /// From `k` years before the latest year up to the latest year.
    LastYears(u16),
}

impl RangePreset {
    /// "Last 5 Years".
    pub const LAST_5: Self = Self::LastYears(5);

    /// "Last 10 Years".
    pub const LAST_10: Self = Self::LastYears(10);

    /// Turn the preset into a concrete range inside `bounds`.
    pub fn resolve(self, bounds: YearRange) -> YearRange {
        match self {
            Self::AllYears => bounds,
            Self::LastYears(k) => {
                let from = bounds.to.saturating_sub(i32::from(k)).max(bounds.from);
                YearRange::new(from, bounds.to)
            }
        }
    }
}

/// Smallest and largest year in `records`, or `None` when empty.
pub fn year_bounds(records: &[FirmRecord]) -> Option<YearRange> {
    records.iter().fold(None, |bounds, record| {
        Some(match bounds {
            None => YearRange::new(record.year, record.year),
            Some(YearRange { from, to }) => {
                YearRange::new(from.min(record.year), to.max(record.year))
            }
        })
    })
}

/// Records whose year lies in `range`; the full set when `range` is `None`.
///
/// An inverted range (`from > to`) is not corrected and selects nothing.
pub fn filter_by_range(records: &[FirmRecord], range: Option<YearRange>) -> Vec<FirmRecord> {
    match range {
        None => records.to_vec(),
        Some(range) => records
            .iter()
            .filter(|record| range.contains(record.year))
            .cloned()
            .collect(),
    }
}
