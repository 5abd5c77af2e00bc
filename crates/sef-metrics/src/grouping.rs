//! Grouping of records by firm and the consecutive-year eligibility rule.
//!
//! A firm is *eligible* when it has at least two records and at least two of
//! them fall in consecutive years. Only eligible firms are ranked and have
//! metric series derived for them.

use sef_data::FirmRecord;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// All records of one firm, keyed by year.
///
/// When the input contains the same `(name, year)` more than once, the first
/// record in input order is kept and the others are counted in
/// [`FirmGroup::duplicates`].
#[derive(Debug, Clone, PartialEq)]
pub struct FirmGroup {
    name: String,
    records: BTreeMap<i32, FirmRecord>,
    duplicates: usize,
}

impl FirmGroup {
    fn new(name: String) -> Self {
        Self {
            name,
            records: BTreeMap::new(),
            duplicates: 0,
        }
    }

    /// Firm name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct years.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the group holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.records.keys().copied()
    }

    /// Records in ascending year order.
    pub fn records(&self) -> impl Iterator<Item = &FirmRecord> + '_ {
        self.records.values()
    }

    /// Record for a given year.
    pub fn get(&self, year: i32) -> Option<&FirmRecord> {
        self.records.get(&year)
    }

    /// Record with the highest year.
    pub fn latest(&self) -> Option<&FirmRecord> {
        self.records.values().next_back()
    }

    /// Number of records discarded because their year was already present.
    pub const fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Whether the firm has at least one consecutive-year pair.
    pub fn is_eligible(&self) -> bool {
        self.records.len() >= 2 && has_consecutive_pair(self.years())
    }
}

/// Records partitioned by firm name, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirmGroups {
    groups: Vec<FirmGroup>,
    index: HashMap<String, usize>,
}

impl FirmGroups {
    /// Group for a firm name.
    pub fn get(&self, name: &str) -> Option<&FirmGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    /// Number of firms.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no firms.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &FirmGroup> + '_ {
        self.groups.iter()
    }

    /// Eligible groups in order of first appearance.
    pub fn eligible(&self) -> impl Iterator<Item = &FirmGroup> + '_ {
        self.groups.iter().filter(|group| group.is_eligible())
    }

    /// Firm names sorted alphabetically.
    pub fn names_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.iter().map(FirmGroup::name).collect();
        names.sort_unstable();
        names
    }

    /// Total number of discarded duplicate records.
    pub fn duplicates(&self) -> usize {
        self.groups.iter().map(FirmGroup::duplicates).sum()
    }
}

impl<'a> IntoIterator for &'a FirmGroups {
    type Item = &'a FirmGroup;
    type IntoIter = std::slice::Iter<'a, FirmGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partition records by firm name.
///
/// Records with distinct years are never dropped or merged; a repeated
/// `(name, year)` keeps the first occurrence.
pub fn group_by_firm(records: &[FirmRecord]) -> FirmGroups {
    let mut groups: Vec<FirmGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.name.clone()).or_insert_with(|| {
            groups.push(FirmGroup::new(record.name.clone()));
            groups.len() - 1
        });

        let group = &mut groups[slot];
        match group.records.entry(record.year) {
            Entry::Vacant(entry) => {
                entry.insert(record.clone());
            }
            Entry::Occupied(_) => {
                group.duplicates += 1;
                debug!(firm = %record.name, year = record.year, "dropping duplicate firm-year");
            }
        }
    }

    let grouped = FirmGroups { groups, index };
    let duplicates = grouped.duplicates();
    if duplicates > 0 {
        warn!(
            duplicates,
            "duplicate firm-year records found, keeping the first occurrence of each"
        );
    }

    grouped
}

/// Eligibility of an arbitrary, unsorted slice of one firm's records.
pub fn is_eligible(records: &[FirmRecord]) -> bool {
    if records.len() < 2 {
        return false;
    }
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    has_consecutive_pair(years)
}

/// Stops at the first adjacent pair `(y, y + 1)`. Expects ascending years.
fn has_consecutive_pair<I: IntoIterator<Item = i32>>(years: I) -> bool {
    let mut previous: Option<i32> = None;
    for year in years {
        if previous.and_then(|p| p.checked_add(1)) == Some(year) {
            return true;
        }
        previous = Some(year);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(name: &str, year: i32, sales: f64) -> FirmRecord {
        FirmRecord::new(name.to_string(), year, sales, 1.0, sales * 2.0)
    }

    #[test]
    fn test_groups_by_name_in_first_appearance_order() {
        let records = vec![
            record("Globex", 2020, 1.0),
            record("Acme", 2020, 2.0),
            record("Globex", 2021, 3.0),
            record("Acme", 2019, 4.0),
        ];
        let groups = group_by_firm(&records);

        let names: Vec<&str> = groups.iter().map(FirmGroup::name).collect();
        assert_eq!(names, vec!["Globex", "Acme"]);
        let acme_years: Vec<i32> = groups.get("Acme").unwrap().years().collect();
        assert_eq!(acme_years, vec![2019, 2020]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_duplicate_year_keeps_first() {
        let records = vec![
            record("Acme", 2020, 100.0),
            record("Acme", 2021, 110.0),
            record("Acme", 2020, 999.0),
        ];
        let groups = group_by_firm(&records);
        let acme = groups.get("Acme").unwrap();

        assert_eq!(acme.len(), 2);
        assert_eq!(acme.get(2020).unwrap().sales, 100.0);
        assert_eq!(acme.duplicates(), 1);
        assert_eq!(groups.duplicates(), 1);
    }

    #[test]
    fn test_latest_record() {
        let records = vec![
            record("Acme", 2021, 1.0),
            record("Acme", 2023, 2.0),
            record("Acme", 2022, 3.0),
        ];
        let groups = group_by_firm(&records);
        assert_eq!(groups.get("Acme").unwrap().latest().unwrap().year, 2023);
    }

    #[rstest]
    #[case(&[], false)]
    #[case(&[2020], false)]
    #[case(&[2008, 2015], false)]
    #[case(&[2019, 2022], false)]
    #[case(&[2020, 2021], true)]
    #[case(&[2015, 2008, 2009], true)]
    #[case(&[2010, 2012, 2014, 2015], true)]
    #[case(&[2021, 2021], false)]
    fn test_eligibility(#[case] years: &[i32], #[case] expected: bool) {
        let records: Vec<_> = years.iter().map(|&y| record("Acme", y, 1.0)).collect();
        assert_eq!(is_eligible(&records), expected);

        let groups = group_by_firm(&records);
        let grouped = groups.get("Acme").is_some_and(FirmGroup::is_eligible);
        assert_eq!(grouped, expected);
    }

    #[test]
    fn test_eligible_filters_groups() {
        let records = vec![
            record("Acme", 2020, 1.0),
            record("Acme", 2021, 1.0),
            record("Sparse", 2008, 1.0),
            record("Sparse", 2015, 1.0),
            record("Single", 2020, 1.0),
        ];
        let groups = group_by_firm(&records);

        let eligible: Vec<&str> = groups.eligible().map(FirmGroup::name).collect();
        assert_eq!(eligible, vec!["Acme"]);
    }

    #[test]
    fn test_names_sorted() {
        let records = vec![
            record("b", 2020, 1.0),
            record("C", 2020, 1.0),
            record("a", 2020, 1.0),
        ];
        let groups = group_by_firm(&records);
        assert_eq!(groups.names_sorted(), vec!["C", "a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_firm(&[]);
        assert!(groups.is_empty());
        assert_eq!(groups.eligible().count(), 0);
    }

    #[test]
    fn test_year_overflow_is_not_consecutive() {
        assert!(!has_consecutive_pair([i32::MAX, i32::MAX]));
        assert!(has_consecutive_pair([i32::MAX - 1, i32::MAX]));
    }
}
