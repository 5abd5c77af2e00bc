//! Explicit recompute-on-change state for one interactive analysis.
//!
//! [`AnalysisSession`] owns the loaded records together with the current
//! year range and firm selection. Filtering and grouping are redone whenever
//! the records or the range change; changing the selection only affects
//! which group [`AnalysisSession::analyze_selected`] reads.

use crate::derivation::{YearPairMetric, derive_metrics};
use crate::grouping::{FirmGroups, group_by_firm};
use crate::range::{RangePreset, YearRange, filter_by_range, year_bounds};
use crate::ranking::{DEFAULT_TOP_FIRMS, FirmRankEntry, rank_firms};
use crate::search::{DEFAULT_SEARCH_LIMIT, search_firms};
use sef_data::FirmRecord;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Tunables for an analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Length of the overview ranking (default: 50)
    pub top_firms: usize,
    /// Maximum number of search suggestions (default: 10)
    pub search_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_firms: DEFAULT_TOP_FIRMS,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Metric series computed for the selected firm.
#[derive(Debug, Clone, PartialEq)]
pub struct FirmAnalysis {
    /// Firm name.
    pub firm: String,
    /// Non-empty series in ascending year order.
    pub series: Vec<YearPairMetric>,
    /// Time spent deriving the series.
    pub elapsed: Duration,
}

/// What the detail view should show for the current inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView {
    /// No dataset loaded.
    NoData,
    /// Data is loaded but no firm is selected.
    NoSelection,
    /// The selected firm has no usable consecutive-year pair in range.
    InsufficientData {
        /// Firm name.
        firm: String,
    },
    /// The selected firm has a metric series.
    Ready(FirmAnalysis),
}

/// Records, year range and firm selection, with derived data kept in sync.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    records: Vec<FirmRecord>,
    bounds: Option<YearRange>,
    range: Option<YearRange>,
    selection: Option<String>,
    filtered: Vec<FirmRecord>,
    groups: FirmGroups,
}

impl AnalysisSession {
    /// Create an empty session.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a session over `records`.
    pub fn with_records(config: AnalysisConfig, records: Vec<FirmRecord>) -> Self {
        let mut session = Self::new(config);
        session.set_records(records);
        session
    }

    /// Replace the dataset. Clears the range and the selection.
    pub fn set_records(&mut self, records: Vec<FirmRecord>) {
        self.bounds = year_bounds(&records);
        self.records = records;
        self.range = None;
        self.selection = None;
        self.recompute();
    }

    /// Restrict analysis to `[from, to]`, clamped into the dataset bounds.
    ///
    /// Returns the range actually applied, or `None` when no data is loaded.
    pub fn set_range(&mut self, from: i32, to: i32) -> Option<YearRange> {
        let bounds = self.bounds?;
        let range = YearRange::clamped(from, to, bounds);
        self.range = Some(range);
        self.recompute();
        Some(range)
    }

    /// Apply a preset range such as "last 5 years".
    pub fn apply_preset(&mut self, preset: RangePreset) -> Option<YearRange> {
        let range = preset.resolve(self.bounds?);
        self.set_range(range.from, range.to)
    }

    /// Remove the year range.
    pub fn clear_range(&mut self) {
        self.range = None;
        self.recompute();
    }

    /// Select a firm by name.
    pub fn select_firm(&mut self, name: impl Into<String>) {
        self.selection = Some(name.into());
    }

    /// Clear the firm selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Session configuration.
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// All loaded records.
    pub fn records(&self) -> &[FirmRecord] {
        &self.records
    }

    /// Smallest and largest year of the full dataset.
    pub const fn bounds(&self) -> Option<YearRange> {
        self.bounds
    }

    /// Active year range.
    pub const fn range(&self) -> Option<YearRange> {
        self.range
    }

    /// Selected firm name.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Records inside the active range.
    pub fn filtered(&self) -> &[FirmRecord] {
        &self.filtered
    }

    /// Firm groups of the filtered records.
    pub const fn groups(&self) -> &FirmGroups {
        &self.groups
    }

    /// Overview ranking for the active range.
    pub fn top_firms(&self) -> Vec<FirmRankEntry> {
        rank_firms(&self.groups, self.config.top_firms)
    }

    /// Firm names in the active range matching `query`.
    pub fn search(&self, query: &str) -> Vec<&str> {
        search_firms(self.groups.names_sorted(), query, self.config.search_limit)
    }

    /// Derive the metric series for the selected firm.
    pub fn analyze_selected(&self) -> AnalysisView {
        if self.records.is_empty() {
            return AnalysisView::NoData;
        }
        let Some(firm) = self.selection.as_deref() else {
            return AnalysisView::NoSelection;
        };
        let insufficient = || AnalysisView::InsufficientData {
            firm: firm.to_string(),
        };
        let Some(group) = self.groups.get(firm) else {
            return insufficient();
        };

        let start = Instant::now();
        let series = derive_metrics(group);
        let elapsed = start.elapsed();

        debug!(firm, pairs = series.len(), ?elapsed, "derived metric series");

        if series.is_empty() {
            return insufficient();
        }

        AnalysisView::Ready(FirmAnalysis {
            firm: firm.to_string(),
            series,
            elapsed,
        })
    }

    fn recompute(&mut self) {
        self.filtered = filter_by_range(&self.records, self.range);
        self.groups = group_by_firm(&self.filtered);
        debug!(
            range = ?self.range,
            records = self.filtered.len(),
            firms = self.groups.len(),
            "recomputed firm groups"
        );
    }
}
