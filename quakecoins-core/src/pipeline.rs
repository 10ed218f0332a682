//! One full refresh cycle: fetch both sources, align, correlate.
//!
//! Strictly sequential and synchronous — prices, then quakes, then the
//! merge and the correlation snapshot. Every user interaction triggers an
//! independent full cycle; nothing is cached between cycles.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::align::merge;
use crate::correlate::correlate;
use crate::domain::{AlignedRow, CorrelationSnapshot, DataOrigin, PriceSeries, QuakeSeries};
use crate::rng::SeedHierarchy;
use crate::sources::{synthetic_prices, synthetic_quakes, PriceFetcher, QuakeFetcher};

/// Bounds for the lookback-window control.
pub const MIN_DAYS: u32 = 7;
pub const MAX_DAYS: u32 = 90;
pub const DEFAULT_DAYS: u32 = 30;

/// Bounds for the minimum-magnitude control.
pub const MIN_MAGNITUDE_FLOOR: f64 = 2.5;
pub const MIN_MAGNITUDE_CEIL: f64 = 7.0;
pub const MAGNITUDE_STEP: f64 = 0.5;
pub const DEFAULT_MIN_MAGNITUDE: f64 = 3.0;

/// The two user-facing controls plus run-mode switches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RefreshOptions {
    /// Trailing lookback window in days.
    pub days: u32,
    /// Qualifying-event magnitude threshold.
    pub min_magnitude: f64,
    /// Skip the live paths entirely and generate synthetic data.
    pub offline: bool,
    /// Pin synthetic fallbacks to a fixed master seed.
    pub master_seed: Option<u64>,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            offline: false,
            master_seed: None,
        }
    }
}

impl RefreshOptions {
    /// Clamp both controls into their supported ranges.
    pub fn clamped(mut self) -> Self {
        self.days = self.days.clamp(MIN_DAYS, MAX_DAYS);
        self.min_magnitude = self.min_magnitude.clamp(MIN_MAGNITUDE_FLOOR, MIN_MAGNITUDE_CEIL);
        self
    }
}

/// Everything the presentation layer needs from one refresh cycle.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub options: RefreshOptions,
    pub prices: PriceSeries,
    pub quakes: QuakeSeries,
    pub aligned: Vec<AlignedRow>,
    pub correlations: CorrelationSnapshot,
}

impl DashboardSnapshot {
    /// True if either series came from the synthetic fallback.
    pub fn is_degraded(&self) -> bool {
        self.prices.origin == DataOrigin::Synthetic || self.quakes.origin == DataOrigin::Synthetic
    }
}

/// Run one full fetch → merge → correlate cycle.
pub fn refresh(options: RefreshOptions) -> DashboardSnapshot {
    let options = options.clamped();
    let end = Utc::now().date_naive();
    let start = end - Duration::days(i64::from(options.days));
    let seeds = options.master_seed.map(SeedHierarchy::new);

    let prices = if options.offline {
        let mut rng = fallback_rng(seeds, "coingecko", &options.days.to_string());
        PriceSeries {
            rows: synthetic_prices(options.days, end, &mut rng),
            origin: DataOrigin::Synthetic,
        }
    } else {
        let mut fetcher = PriceFetcher::new();
        if let Some(h) = seeds {
            fetcher = fetcher.with_seeds(h);
        }
        fetcher.fetch(options.days)
    };

    let quakes = if options.offline {
        let mut rng = fallback_rng(seeds, "usgs", &format!("{start}/{end}"));
        QuakeSeries {
            rows: synthetic_quakes(start, end, options.min_magnitude, &mut rng),
            origin: DataOrigin::Synthetic,
        }
    } else {
        let mut fetcher = QuakeFetcher::new();
        if let Some(h) = seeds {
            fetcher = fetcher.with_seeds(h);
        }
        fetcher.fetch(start, end, options.min_magnitude)
    };

    let aligned = merge(&prices.rows, &quakes.rows);
    let correlations = correlate(&aligned);

    DashboardSnapshot {
        start,
        end,
        options,
        prices,
        quakes,
        aligned,
        correlations,
    }
}

fn fallback_rng(
    seeds: Option<SeedHierarchy>,
    adapter: &str,
    window: &str,
) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    match seeds {
        Some(h) => h.rng_for(adapter, window),
        None => rand::rngs::StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_clamp_to_supported_ranges() {
        let opts = RefreshOptions {
            days: 500,
            min_magnitude: 0.1,
            ..Default::default()
        }
        .clamped();
        assert_eq!(opts.days, MAX_DAYS);
        assert_eq!(opts.min_magnitude, MIN_MAGNITUDE_FLOOR);
    }

    #[test]
    fn offline_refresh_is_deterministic_under_a_seed() {
        let opts = RefreshOptions {
            offline: true,
            master_seed: Some(42),
            ..Default::default()
        };
        let a = refresh(opts);
        let b = refresh(opts);
        assert_eq!(a.prices.rows, b.prices.rows);
        assert_eq!(a.quakes.rows, b.quakes.rows);
        assert_eq!(a.correlations, b.correlations);
    }

    #[test]
    fn offline_refresh_aligns_every_price_date() {
        let snap = refresh(RefreshOptions {
            offline: true,
            master_seed: Some(7),
            ..Default::default()
        });
        assert_eq!(snap.aligned.len(), snap.prices.rows.len());
        assert_eq!(snap.aligned.len(), DEFAULT_DAYS as usize);
        assert_eq!(snap.prices.origin, DataOrigin::Synthetic);
        assert_eq!(snap.quakes.origin, DataOrigin::Synthetic);
    }
}
