//! Aligned row and correlation snapshot — outputs of the merge pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the merged table: price plus (possibly zero-filled)
/// earthquake columns.
///
/// Invariant: the aligner emits exactly one row per price date, and
/// `eq_count` / `avg_mag` are always defined (zero-filled when the date had
/// no earthquake-side match).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub price_usd: f64,
    pub eq_count: u32,
    pub avg_mag: f64,
}

/// The two naive Pearson coefficients over an aligned table.
///
/// `None` means the coefficient is undefined (fewer than two rows, or a
/// constant column) — never an error, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrelationSnapshot {
    /// price_usd vs eq_count.
    pub price_vs_count: Option<f64>,
    /// price_usd vs avg_mag.
    pub price_vs_mag: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_defaults_to_undefined() {
        let snap = CorrelationSnapshot::default();
        assert!(snap.price_vs_count.is_none());
        assert!(snap.price_vs_mag.is_none());
    }

    #[test]
    fn aligned_row_serialization_roundtrip() {
        let row = AlignedRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            price_usd: 110.0,
            eq_count: 2,
            avg_mag: 5.0,
        };
        let json = serde_json::to_string(&row).unwrap();
        let deser: AlignedRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, deser);
    }
}
