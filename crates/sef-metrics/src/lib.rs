#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sef-calculator/sef/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod derivation;
pub mod grouping;
pub mod range;
pub mod ranking;
pub mod search;
pub mod session;

pub use derivation::{YearPair, YearPairMetric, derive_metrics};
pub use grouping::{FirmGroup, FirmGroups, group_by_firm, is_eligible};
pub use range::{RangePreset, YearRange, filter_by_range, year_bounds};
pub use ranking::{DEFAULT_TOP_FIRMS, FirmRankEntry, rank_firms};
pub use search::{DEFAULT_SEARCH_LIMIT, search_firms};
pub use session::{AnalysisConfig, AnalysisSession, AnalysisView, FirmAnalysis};
