//! Daily Bitcoin price record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DataOrigin;

/// Closing price for a single calendar day, in USD.
///
/// The price adapter guarantees one record per day over the requested
/// lookback window, contiguous and ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub price_usd: f64,
}

/// A full price series for one lookback window, tagged with its origin.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub rows: Vec<DailyPrice>,
    pub origin: DataOrigin,
}

impl PriceSeries {
    /// Last (most recent) price in the window, if any.
    pub fn last_price(&self) -> Option<f64> {
        self.rows.last().map(|r| r.price_usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> DailyPrice {
        DailyPrice {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            price_usd: 42_150.33,
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let row = sample_row();
        let json = serde_json::to_string(&row).unwrap();
        let deser: DailyPrice = serde_json::from_str(&json).unwrap();
        assert_eq!(row, deser);
    }

    #[test]
    fn last_price_of_empty_series_is_none() {
        let series = PriceSeries {
            rows: Vec::new(),
            origin: DataOrigin::Live,
        };
        assert!(series.last_price().is_none());
    }
}
