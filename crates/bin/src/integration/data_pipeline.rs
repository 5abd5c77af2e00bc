//! Dataset loading and session setup.
//!
//! Reads a CSV dataset, reports skipped rows and applies the year range
//! requested on the command line to a fresh [`AnalysisSession`].

use clap::Args;
use sef_data::read_csv_path;
use sef_metrics::{AnalysisConfig, AnalysisSession, RangePreset, YearRange};
use std::path::Path;
use tracing::{info, warn};

/// Error type for data pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DataPipelineError {
    /// Dataset could not be loaded.
    #[error("Failed to load dataset: {0}")]
    Load(#[from] sef_data::DataError),
}

/// Year range selection shared by the analysis commands.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct RangeArgs {
    /// First year to include (defaults to the earliest year in the data)
    #[arg(long)]
    pub(crate) from: Option<i32>,

    /// Last year to include (defaults to the latest year in the data)
    #[arg(long)]
    pub(crate) to: Option<i32>,

    /// Only use the last N years before the latest year
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub(crate) last: Option<u16>,
}

impl RangeArgs {
    /// Apply the selection to `session`, returning the range in effect.
    ///
    /// Bounds are clamped into the dataset's year span.
    pub(crate) fn apply(&self, session: &mut AnalysisSession) -> Option<YearRange> {
        if let Some(years) = self.last {
            return session.apply_preset(RangePreset::LastYears(years));
        }
        if self.from.is_none() && self.to.is_none() {
            return None;
        }
        let bounds = session.bounds()?;
        session.set_range(
            self.from.unwrap_or(bounds.from),
            self.to.unwrap_or(bounds.to),
        )
    }
}

/// Load `path` into a session and apply `range`.
pub(crate) fn load_session(
    path: &Path,
    config: AnalysisConfig,
    range: &RangeArgs,
) -> Result<AnalysisSession, DataPipelineError> {
    let report = read_csv_path(path)?;
    if report.skipped > 0 {
        warn!(
            skipped = report.skipped,
            path = %path.display(),
            "skipped rows with missing name, year or numeric values"
        );
    }
    info!(records = report.records.len(), path = %path.display(), "dataset loaded");

    let mut session = AnalysisSession::with_records(config, report.records);
    if let Some(applied) = range.apply(&mut session) {
        info!(range = %applied, "year range applied");
    }

    Ok(session)
}
