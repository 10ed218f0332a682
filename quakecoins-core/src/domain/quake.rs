//! Daily earthquake aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DataOrigin;

/// Count and mean magnitude of qualifying earthquakes on one calendar day.
///
/// `avg_mag` is a sentinel `0.0` when `eq_count == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyQuakes {
    pub date: NaiveDate,
    pub eq_count: u32,
    pub avg_mag: f64,
}

impl DailyQuakes {
    /// A zero-activity day.
    pub fn quiet(date: NaiveDate) -> Self {
        Self {
            date,
            eq_count: 0,
            avg_mag: 0.0,
        }
    }
}

/// Earthquake aggregates for one request window, tagged with origin.
///
/// Sparsity contract: on the `Live` path, days with zero qualifying events
/// are absent from `rows` (the provider aggregation simply produces no
/// bucket for them). On the `Synthetic` path every day in the window is
/// present, quiet days as explicit zero rows. The aligner's zero-fill is
/// the sole place this asymmetry is normalized.
#[derive(Debug, Clone)]
pub struct QuakeSeries {
    pub rows: Vec<DailyQuakes>,
    pub origin: DataOrigin,
}

impl QuakeSeries {
    /// Total qualifying events across the window.
    pub fn total_events(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.eq_count)).sum()
    }

    /// The day with the highest mean magnitude, if any events occurred.
    pub fn strongest_day(&self) -> Option<&DailyQuakes> {
        self.rows
            .iter()
            .filter(|r| r.eq_count > 0)
            .max_by(|a, b| a.avg_mag.total_cmp(&b.avg_mag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, count: u32, mag: f64) -> DailyQuakes {
        DailyQuakes {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            eq_count: count,
            avg_mag: mag,
        }
    }

    #[test]
    fn quiet_day_has_sentinel_magnitude() {
        let q = DailyQuakes::quiet(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(q.eq_count, 0);
        assert_eq!(q.avg_mag, 0.0);
    }

    #[test]
    fn strongest_day_ignores_quiet_rows() {
        let series = QuakeSeries {
            rows: vec![day(1, 0, 0.0), day(2, 3, 4.2), day(3, 1, 5.8)],
            origin: DataOrigin::Live,
        };
        assert_eq!(series.strongest_day().unwrap().date, day(3, 1, 5.8).date);
        assert_eq!(series.total_events(), 4);
    }

    #[test]
    fn strongest_day_of_all_quiet_series_is_none() {
        let series = QuakeSeries {
            rows: vec![day(1, 0, 0.0), day(2, 0, 0.0)],
            origin: DataOrigin::Synthetic,
        };
        assert!(series.strongest_day().is_none());
    }
}
