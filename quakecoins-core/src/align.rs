//! Date-keyed alignment of the two series.
//!
//! A left join anchored on the price dates: every price row is retained,
//! earthquake columns are attached when a date matches and zero-filled when
//! it does not. This is the sole place the earthquake series' sparsity is
//! normalized.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{AlignedRow, DailyPrice, DailyQuakes};

/// Merge price and earthquake records into one row per price date.
///
/// Earthquake-only dates are dropped; the join is strictly anchored on the
/// price date range. Output preserves price order. Inputs are assumed
/// pre-aggregated to one row per date — duplicate dates are a precondition
/// violation, not checked here.
pub fn merge(prices: &[DailyPrice], quakes: &[DailyQuakes]) -> Vec<AlignedRow> {
    let by_date: HashMap<NaiveDate, &DailyQuakes> =
        quakes.iter().map(|q| (q.date, q)).collect();

    prices
        .iter()
        .map(|p| match by_date.get(&p.date) {
            Some(q) => AlignedRow {
                date: p.date,
                price_usd: p.price_usd,
                eq_count: q.eq_count,
                avg_mag: q.avg_mag,
            },
            None => AlignedRow {
                date: p.date,
                price_usd: p.price_usd,
                eq_count: 0,
                avg_mag: 0.0,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(day: u32, usd: f64) -> DailyPrice {
        DailyPrice {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            price_usd: usd,
        }
    }

    fn quakes(day: u32, count: u32, mag: f64) -> DailyQuakes {
        DailyQuakes {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            eq_count: count,
            avg_mag: mag,
        }
    }

    #[test]
    fn merge_zero_fills_missing_dates() {
        let prices = vec![price(1, 100.0), price(2, 110.0), price(3, 90.0)];
        let eq = vec![quakes(2, 2, 5.0)];

        let merged = merge(&prices, &eq);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].eq_count, 0);
        assert_eq!(merged[0].avg_mag, 0.0);
        assert_eq!(merged[1].eq_count, 2);
        assert_eq!(merged[1].avg_mag, 5.0);
        assert_eq!(merged[2].eq_count, 0);
    }

    #[test]
    fn merge_drops_quake_only_dates() {
        let prices = vec![price(2, 110.0)];
        let eq = vec![quakes(1, 1, 4.0), quakes(2, 2, 5.0), quakes(3, 1, 6.0)];

        let merged = merge(&prices, &eq);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date, prices[0].date);
        assert_eq!(merged[0].eq_count, 2);
    }

    #[test]
    fn merge_preserves_price_order() {
        let prices = vec![price(1, 100.0), price(2, 110.0), price(3, 90.0)];
        let merged = merge(&prices, &[]);
        let dates: Vec<_> = merged.iter().map(|r| r.date).collect();
        let expected: Vec<_> = prices.iter().map(|p| p.date).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn merge_with_empty_prices_is_empty() {
        assert!(merge(&[], &[quakes(1, 1, 4.0)]).is_empty());
    }
}
