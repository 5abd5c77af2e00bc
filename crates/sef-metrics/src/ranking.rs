//! Overview ranking of eligible firms by latest market value.

use crate::grouping::FirmGroups;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of firms shown in the overview list.
pub const DEFAULT_TOP_FIRMS: usize = 50;

/// A firm's position in the overview ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmRankEntry {
    /// Firm name.
    pub name: String,
    /// Market value in the firm's latest year.
    pub metric: f64,
    /// The year `metric` was taken from.
    pub year: i32,
}

/// Rank eligible firms by market value in their latest year, descending.
///
/// The sort is stable, so firms with equal market value keep their order of
/// first appearance in the input. At most `limit` entries are returned.
pub fn rank_firms(groups: &FirmGroups, limit: usize) -> Vec<FirmRankEntry> {
    let mut entries: Vec<FirmRankEntry> = groups
        .eligible()
        .filter_map(|group| {
            group.latest().map(|latest| FirmRankEntry {
                name: group.name().to_string(),
                metric: latest.market_value,
                year: latest.year,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.metric.partial_cmp(&a.metric).unwrap_or(Ordering::Equal));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_by_firm;
    use sef_data::FirmRecord;

    fn record(name: &str, year: i32, market_value: f64) -> FirmRecord {
        FirmRecord::new(name.to_string(), year, 10.0, 1.0, market_value)
    }

    #[test]
    fn test_ranks_by_latest_market_value() {
        let records = vec![
            record("Acme", 2020, 900.0),
            record("Acme", 2021, 100.0),
            record("Globex", 2021, 300.0),
            record("Globex", 2022, 200.0),
        ];
        let ranked = rank_firms(&group_by_firm(&records), DEFAULT_TOP_FIRMS);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Globex");
        assert_eq!(ranked[0].metric, 200.0);
        assert_eq!(ranked[0].year, 2022);
        assert_eq!(ranked[1].name, "Acme");
        assert_eq!(ranked[1].metric, 100.0);
        assert_eq!(ranked[1].year, 2021);
    }

    #[test]
    fn test_excludes_ineligible_firms() {
        let records = vec![
            record("Acme", 2020, 1.0),
            record("Acme", 2021, 1.0),
            record("Sparse", 2019, 1e9),
            record("Sparse", 2022, 1e9),
            record("Single", 2022, 1e9),
        ];
        let ranked = rank_firms(&group_by_firm(&records), DEFAULT_TOP_FIRMS);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "Acme");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            record("Second", 2020, 5.0),
            record("First", 2020, 5.0),
            record("Second", 2021, 50.0),
            record("First", 2021, 50.0),
            record("Top", 2021, 60.0),
            record("Top", 2022, 60.0),
        ];
        let ranked = rank_firms(&group_by_firm(&records), DEFAULT_TOP_FIRMS);

        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "Second", "First"]);
    }

    #[test]
    fn test_signed_zero_market_values_tie() {
        let records = vec![
            record("NegZero", 2020, 1.0),
            record("NegZero", 2021, -0.0),
            record("PosZero", 2020, 1.0),
            record("PosZero", 2021, 0.0),
        ];
        let ranked = rank_firms(&group_by_firm(&records), DEFAULT_TOP_FIRMS);

        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["NegZero", "PosZero"]);
    }

    #[test]
    fn test_limit() {
        let records: Vec<_> = (0..5)
            .flat_map(|i| {
                let name = format!("Firm {i}");
                [record(&name, 2020, 0.0), record(&name, 2021, f64::from(i))]
            })
            .collect();
        let groups = group_by_firm(&records);

        assert_eq!(rank_firms(&groups, 3).len(), 3);
        assert!(rank_firms(&groups, 0).is_empty());
        assert_eq!(rank_firms(&groups, 3)[0].name, "Firm 4");
    }
}
