#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sef-calculator/sef/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod table;

pub use export::{ExportError, ExportFormat, Exporter, export_file_stem};
pub use report::{Report, ReportBuilder, ReportError};
pub use table::{MetricTable, RankingTable, format_thousands};
