//! Firm name lookup.

/// Maximum number of suggestions returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Names containing `query`, case-insensitively, in the order given.
///
/// An empty query matches nothing; whitespace is matched literally. Pass names already sorted (see
/// [`FirmGroups::names_sorted`](crate::FirmGroups::names_sorted)) to get
/// alphabetical suggestions.
///
/// # Examples
///
/// ```
/// use sef_metrics::search_firms;
///
/// let names = ["Alphabet", "Apple", "Pineapple Co"];
/// assert_eq!(search_firms(names, "APPLE", 10), vec!["Apple", "Pineapple Co"]);
/// assert!(search_firms(names, "", 10).is_empty());
/// ```
pub fn search_firms<'a, I>(names: I, query: &str, limit: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if query.is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();

    names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_applies_after_matching() {
        let names: Vec<String> = (0..25).map(|i| format!("Bank {i:02}")).collect();
        let matches = search_firms(names.iter().map(String::as_str), "bank", DEFAULT_SEARCH_LIMIT);

        assert_eq!(matches.len(), 10);
        assert_eq!(matches[0], "Bank 00");
        assert_eq!(matches[9], "Bank 09");
    }

    #[test]
    fn test_whitespace_query_is_literal() {
        let names = ["Acme", "Pineapple Co"];
        assert_eq!(search_firms(names, " ", 10), vec!["Pineapple Co"]);
        assert!(search_firms(names, "", 10).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(search_firms(["Acme"], "globex", 10).is_empty());
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(search_firms(["Société Générale"], "GÉNÉRALE", 10), vec!["Société Générale"]);
    }
}
