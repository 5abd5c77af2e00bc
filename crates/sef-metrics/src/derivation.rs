//! N and M over consecutive-year pairs.
//!
//! For two consecutive years of one firm, with `costs = sales - profit`:
//!
//! - `N = costs[y+1] - costs[y]`, the change in costs;
//! - `M = (sales[y+1] - sales[y]) / N`, sales gained per unit of extra cost.
//!
//! A pair with `N == 0`, or where `M` is not finite, carries no usable ratio
//! and is left out of the series.

use crate::grouping::FirmGroup;
use derive_more::Display;
use sef_data::FirmRecord;
use serde::{Serialize, Serializer};

/// Two consecutive years, displayed as `"2020-2021"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{from}-{to}")]
pub struct YearPair {
    /// Earlier year.
    pub from: i32,
    /// Later year, always `from + 1`.
    pub to: i32,
}

impl Serialize for YearPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// N and M for one consecutive-year pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearPairMetric {
    /// The year pair.
    pub years: YearPair,
    /// Change in costs.
    pub n: f64,
    /// Sales growth divided by `n`.
    pub m: f64,
}

impl YearPairMetric {
    /// Compute the metric for `prev` followed by `curr`.
    ///
    /// Returns `None` unless `curr.year == prev.year + 1`, `N` is non-zero
    /// and finite, and `M` is finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use sef_data::FirmRecord;
    /// use sef_metrics::YearPairMetric;
    ///
    /// let prev = FirmRecord::new("Acme".to_string(), 2020, 100.0, 20.0, 0.0);
    /// let curr = FirmRecord::new("Acme".to_string(), 2021, 130.0, 25.0, 0.0);
    ///
    /// let metric = YearPairMetric::between(&prev, &curr).unwrap();
    /// assert_eq!(metric.n, 25.0);
    /// assert_eq!(metric.m, 1.2);
    /// ```
    pub fn between(prev: &FirmRecord, curr: &FirmRecord) -> Option<Self> {
        if prev.year.checked_add(1) != Some(curr.year) {
            return None;
        }

        let n = curr.costs() - prev.costs();
        if n == 0.0 || !n.is_finite() {
            return None;
        }

        let sales_growth = curr.sales - prev.sales;
        let m = sales_growth / n;

        m.is_finite().then_some(Self {
            years: YearPair {
                from: prev.year,
                to: curr.year,
            },
            n,
            m,
        })
    }
}

/// Metric series of one firm, in ascending year order.
///
/// Gaps in the years are skipped rather than bridged, so a firm with years
/// `{2019, 2020, 2022, 2023}` yields pairs `2019-2020` and `2022-2023`.
pub fn derive_metrics(group: &FirmGroup) -> Vec<YearPairMetric> {
    group
        .records()
        .zip(group.records().skip(1))
        .filter_map(|(prev, curr)| YearPairMetric::between(prev, curr))
        .collect()
}
