#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sef-calculator/sef/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use sef_data as data;
pub use sef_metrics as metrics;
pub use sef_output as output;

pub use sef_data::{FirmRecord, read_csv, read_csv_path};
pub use sef_metrics::{
    AnalysisConfig, AnalysisSession, AnalysisView, FirmRankEntry, YearPairMetric, YearRange,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
