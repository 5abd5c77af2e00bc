#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sef-calculator/sef/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod ingest;
pub mod record;

pub use error::{DataError, Result};
pub use ingest::{IngestReport, REQUIRED_COLUMNS, read_csv, read_csv_path};
pub use record::FirmRecord;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
