//! Text rendering of metric series and rankings.
//!
//! Both tables render to a fixed-width ASCII layout for terminals and to
//! Markdown for documents. N and M are printed with four decimals, market
//! values rounded to whole units with thousands separators.

use sef_metrics::{FirmAnalysis, FirmRankEntry, YearPairMetric, YearRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A firm's N/M series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable {
    /// Firm name.
    pub firm: String,

    /// Year range the series was computed over, if any.
    pub range: Option<YearRange>,

    /// Rows in ascending year order.
    pub rows: Vec<YearPairMetric>,
}

impl MetricTable {
    /// Create a metric table.
    pub const fn new(firm: String, rows: Vec<YearPairMetric>) -> Self {
        Self {
            firm,
            range: None,
            rows,
        }
    }

    /// Record the year range the rows were computed over.
    pub const fn with_range(mut self, range: Option<YearRange>) -> Self {
        self.range = range;
        self
    }

    fn range_label(&self) -> String {
        self.range
            .map_or_else(|| "all years".to_string(), |r| format!("{} to {}", r.from, r.to))
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nCompany: {}\n", self.firm));
        output.push_str(&format!("Years: {}\n", self.range_label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("Insufficient data (requires consecutive years).\n");
        } else {
            output.push_str(&format!(
                "{:<12} {:>22} {:>22}\n",
                "Years", "N (Cost Δ)", "M (Efficiency)"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            for row in &self.rows {
                output.push_str(&format!(
                    "{:<12} {:>22.4} {:>22.4}\n",
                    row.years.to_string(),
                    row.n,
                    row.m
                ));
            }
        }

        output.push_str(&"=".repeat(60));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Company: {}\n\n", self.firm));
        output.push_str(&format!("**Years:** {}\n\n", self.range_label()));

        if self.rows.is_empty() {
            output.push_str("_Insufficient data (requires consecutive years)._\n");
            return output;
        }

        output.push_str("| Years | N (Cost Δ) | M (Efficiency) |\n");
        output.push_str("|-------|------------|----------------|\n");
        for row in &self.rows {
            output.push_str(&format!(
                "| {} | {:.4} | {:.4} |\n",
                row.years, row.n, row.m
            ));
        }

        output
    }
}

impl From<FirmAnalysis> for MetricTable {
    fn from(analysis: FirmAnalysis) -> Self {
        Self::new(analysis.firm, analysis.series)
    }
}

impl fmt::Display for MetricTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} year pairs", self.firm, self.rows.len())
    }
}

/// Overview ranking of firms by latest market value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    /// Year range the ranking was computed over, if any.
    pub range: Option<YearRange>,

    /// Entries, best first.
    pub entries: Vec<FirmRankEntry>,
}

impl RankingTable {
    /// Create a ranking table.
    pub const fn new(range: Option<YearRange>, entries: Vec<FirmRankEntry>) -> Self {
        Self { range, entries }
    }

    fn title(&self) -> String {
        format!("Top {} by Market Value (Analyzable)", self.entries.len())
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.title()));
        if let Some(range) = self.range {
            output.push_str(&format!("Years: {} to {}\n", range.from, range.to));
        }
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:>4}  {:<40} {:>18} {:>6}\n",
            "#", "Firm", "Market Value", "Year"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for (idx, entry) in self.entries.iter().enumerate() {
            output.push_str(&format!(
                "{:>4}  {:<40} {:>18} {:>6}\n",
                format!("#{}", idx + 1),
                entry.name,
                format_thousands(entry.metric),
                entry.year
            ));
        }

        output.push_str(&"=".repeat(72));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title()));
        if let Some(range) = self.range {
            output.push_str(&format!("**Years:** {} to {}\n\n", range.from, range.to));
        }
        output.push_str("| # | Firm | Market Value | Year |\n");
        output.push_str("|---|------|--------------|------|\n");
        for (idx, entry) in self.entries.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                idx + 1,
                escape_cell(&entry.name),
                format_thousands(entry.metric),
                entry.year
            ));
        }

        output
    }
}

/// Escape pipes so a value stays inside one Markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Round to a whole number and group digits in thousands: `1234567.8` becomes
/// `"1,234,568"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = rounded
        .strip_prefix('-')
        .map_or(("", rounded.as_str()), |d| ("-", d));

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return rounded;
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if grouped == "0" {
        return grouped;
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sef_data::FirmRecord;

    fn acme_rows() -> Vec<YearPairMetric> {
        let records = [
            FirmRecord::new("Acme".to_string(), 2020, 100.0, 20.0, 500.0),
            FirmRecord::new("Acme".to_string(), 2021, 130.0, 25.0, 650.0),
            FirmRecord::new("Acme".to_string(), 2022, 150.0, 35.0, 700.0),
        ];
        records
            .windows(2)
            .filter_map(|w| YearPairMetric::between(&w[0], &w[1]))
            .collect()
    }

    #[rstest]
    #[case(0.0, "0")]
    #[case(-0.2, "0")]
    #[case(999.4, "999")]
    #[case(1000.0, "1,000")]
    #[case(1234567.8, "1,234,568")]
    #[case(-98765.0, "-98,765")]
    #[case(f64::INFINITY, "inf")]
    fn test_format_thousands(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_thousands(value), expected);
    }

    #[test]
    fn test_metric_ascii_table() {
        let table = MetricTable::new("Acme".to_string(), acme_rows())
            .with_range(Some(YearRange::new(2020, 2022)));
        let ascii = table.to_ascii_table();

        assert!(ascii.contains("Company: Acme"));
        assert!(ascii.contains("Years: 2020 to 2022"));
        assert!(ascii.contains("2020-2021"));
        assert!(ascii.contains("25.0000"));
        assert!(ascii.contains("1.2000"));
        assert!(ascii.contains("2.0000"));
    }

    #[test]
    fn test_metric_markdown() {
        let table = MetricTable::new("Acme".to_string(), acme_rows());
        let markdown = table.to_markdown();

        assert!(markdown.contains("# Company: Acme"));
        assert!(markdown.contains("**Years:** all years"));
        assert!(markdown.contains("| 2021-2022 | 10.0000 | 2.0000 |"));
    }

    #[test]
    fn test_empty_metric_table() {
        let table = MetricTable::new("Sparse".to_string(), Vec::new());
        assert!(table.to_ascii_table().contains("Insufficient data"));
        assert!(table.to_markdown().contains("Insufficient data"));
        assert_eq!(table.to_string(), "Sparse: 0 year pairs");
    }

    #[test]
    fn test_ranking_tables() {
        let table = RankingTable::new(
            Some(YearRange::new(2018, 2023)),
            vec![
                FirmRankEntry {
                    name: "Acme".to_string(),
                    metric: 1_250_000.4,
                    year: 2023,
                },
                FirmRankEntry {
                    name: "Globex".to_string(),
                    metric: 980.0,
                    year: 2022,
                },
            ],
        );

        let ascii = table.to_ascii_table();
        assert!(ascii.contains("Top 2 by Market Value"));
        assert!(ascii.contains("#1"));
        assert!(ascii.contains("1,250,000"));
        assert!(ascii.contains("Globex"));

        let markdown = table.to_markdown();
        assert!(markdown.contains("| 1 | Acme | 1,250,000 | 2023 |"));
        assert!(markdown.contains("| 2 | Globex | 980 | 2022 |"));
    }

    #[test]
    fn test_ranking_markdown_escapes_pipes() {
        let table = RankingTable::new(
            None,
            vec![FirmRankEntry {
                name: "Smith | Sons".to_string(),
                metric: 10.0,
                year: 2021,
            }],
        );

        let markdown = table.to_markdown();
        assert!(markdown.contains("| 1 | Smith \\| Sons | 10 | 2021 |"));
    }
}
