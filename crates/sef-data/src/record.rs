//! Firm-year record model.

use serde::{Deserialize, Serialize};

/// One firm-year observation.
///
/// Records are built once at ingestion time and never mutated afterwards.
/// `sales`, `profit` and `market_value` are expected to be finite; the
/// ingestion layer rejects rows that violate this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmRecord {
    /// Firm name, the grouping key for all per-firm computation.
    pub name: String,

    /// Fiscal year.
    pub year: i32,

    /// Sales (revenue).
    pub sales: f64,

    /// Profit.
    pub profit: f64,

    /// Market value.
    pub market_value: f64,

    /// Rank label from the source listing.
    #[serde(default)]
    pub rank: Option<String>,

    /// Country of the firm.
    #[serde(default)]
    pub country: Option<String>,

    /// Total assets.
    #[serde(default)]
    pub asset: Option<f64>,

    /// Source row identifier.
    #[serde(default)]
    pub id: Option<String>,
}

impl FirmRecord {
    /// Create a record with the fields the metrics engine uses.
    ///
    /// # Examples
    ///
    /// ```
    /// use sef_data::FirmRecord;
    ///
    /// let record = FirmRecord::new("Acme".to_string(), 2020, 100.0, 20.0, 500.0);
    /// assert_eq!(record.costs(), 80.0);
    /// assert!(record.country.is_none());
    /// ```
    pub const fn new(name: String, year: i32, sales: f64, profit: f64, market_value: f64) -> Self {
        Self {
            name,
            year,
            sales,
            profit,
            market_value,
            rank: None,
            country: None,
            asset: None,
            id: None,
        }
    }

    /// Set the rank label.
    pub fn with_rank(mut self, rank: String) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Set the country.
    pub fn with_country(mut self, country: String) -> Self {
        self.country = Some(country);
        self
    }

    /// Set total assets.
    pub const fn with_asset(mut self, asset: f64) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Set the source row identifier.
    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Imputed costs: `sales - profit`.
    pub const fn costs(&self) -> f64 {
        self.sales - self.profit
    }
}
