//! Naive correlation snapshot — pure functions, columns in, scalar out.
//!
//! No confidence interval, no significance test, no detrending. The
//! presentation layer labels the result a "snapshot" for a reason.

use crate::domain::{AlignedRow, CorrelationSnapshot};

/// Pearson correlation coefficient between two equal-length series.
///
/// Returns `None` when fewer than 2 points exist or either side has zero
/// variance — the undefined cases are encoded as absence, never as an error
/// or NaN.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n < 2 || ys.len() != n {
        return None;
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom < 1e-15 {
        return None;
    }
    Some(cov / denom)
}

/// Correlate the price column against each earthquake column independently.
pub fn correlate(rows: &[AlignedRow]) -> CorrelationSnapshot {
    let prices: Vec<f64> = rows.iter().map(|r| r.price_usd).collect();
    let counts: Vec<f64> = rows.iter().map(|r| f64::from(r.eq_count)).collect();
    let mags: Vec<f64> = rows.iter().map(|r| r.avg_mag).collect();

    CorrelationSnapshot {
        price_vs_count: pearson(&prices, &counts),
        price_vs_mag: pearson(&prices, &mags),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, price: f64, count: u32, mag: f64) -> AlignedRow {
        AlignedRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            price_usd: price,
            eq_count: count,
            avg_mag: mag,
        }
    }

    #[test]
    fn perfect_positive_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 20.0, 30.0, 40.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_negative_correlation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [6.0, 4.0, 2.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_is_undefined_not_an_error() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [5.0, 5.0, 5.0];
        assert!(pearson(&xs, &ys).is_none());
        assert!(pearson(&ys, &xs).is_none());
    }

    #[test]
    fn fewer_than_two_points_is_undefined() {
        assert!(pearson(&[], &[]).is_none());
        assert!(pearson(&[1.0], &[2.0]).is_none());
    }

    #[test]
    fn snapshot_over_constant_count_column() {
        let rows = vec![row(1, 100.0, 1, 4.0), row(2, 110.0, 1, 5.0), row(3, 90.0, 1, 4.5)];
        let snap = correlate(&rows);
        assert!(snap.price_vs_count.is_none());
        assert!(snap.price_vs_mag.is_some());
    }

    #[test]
    fn snapshot_over_empty_table() {
        let snap = correlate(&[]);
        assert_eq!(snap, CorrelationSnapshot::default());
    }

    #[test]
    fn known_coefficient_value() {
        // price up, count up: strongly positive but not perfect
        let rows = vec![
            row(1, 100.0, 0, 0.0),
            row(2, 110.0, 1, 3.5),
            row(3, 120.0, 3, 4.0),
            row(4, 115.0, 2, 3.8),
        ];
        let r = correlate(&rows).price_vs_count.unwrap();
        assert!(r > 0.8 && r < 1.0);
    }
}
