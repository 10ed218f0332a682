//! CoinGecko price adapter.
//!
//! Fetches daily Bitcoin prices (USD) over a trailing lookback window from
//! the market-chart endpoint. Any failure — transport, non-success status,
//! malformed body, empty price list — substitutes a synthetic random-walk
//! series so the dashboard stays operable fully offline.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use super::{http_client, FetchError};
use crate::domain::{DailyPrice, DataOrigin, PriceSeries};
use crate::rng::SeedHierarchy;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const ADAPTER: &str = "coingecko";

/// Starting value for the synthetic random walk.
const SYNTHETIC_BASE_PRICE: f64 = 30_000.0;
/// Lower bound for synthetic prices.
const SYNTHETIC_PRICE_FLOOR: f64 = 100.0;
/// Per-step drift bound (±3%).
const SYNTHETIC_MAX_DRIFT: f64 = 0.03;

/// Market-chart endpoint response.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// List of `[timestamp_ms, price]` pairs.
    #[serde(default)]
    prices: Vec<(i64, f64)>,
}

/// Bitcoin price adapter with synthetic fallback.
pub struct PriceFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
    seeds: Option<SeedHierarchy>,
}

impl PriceFetcher {
    pub fn new() -> Self {
        Self {
            client: http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            seeds: None,
        }
    }

    /// Point the adapter at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pin the synthetic fallback to a deterministic seed hierarchy.
    pub fn with_seeds(mut self, seeds: SeedHierarchy) -> Self {
        self.seeds = Some(seeds);
        self
    }

    /// Fetch daily prices for the trailing `days` days.
    ///
    /// Never fails: any live-path error is logged and replaced by the
    /// synthetic walk. Output always has exactly `days` rows ascending by
    /// date (live path assumed to return daily granularity matching the
    /// window; synthetic generated ascending, ending today).
    pub fn fetch(&self, days: u32) -> PriceSeries {
        match self.fetch_live(days) {
            Ok(rows) => PriceSeries {
                rows,
                origin: DataOrigin::Live,
            },
            Err(err) => {
                tracing::warn!(
                    kind = err.kind(),
                    error = %err,
                    days,
                    "price fetch failed, substituting synthetic series"
                );
                let mut rng = self.fallback_rng(days);
                PriceSeries {
                    rows: synthetic_prices(days, Utc::now().date_naive(), &mut rng),
                    origin: DataOrigin::Synthetic,
                }
            }
        }
    }

    fn fetch_live(&self, days: u32) -> Result<Vec<DailyPrice>, FetchError> {
        let url = format!(
            "{}/coins/bitcoin/market_chart?vs_currency=usd&days={days}&interval=daily",
            self.base_url
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let chart: MarketChartResponse = resp
            .json()
            .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

        parse_market_chart(chart)
    }

    fn fallback_rng(&self, days: u32) -> StdRng {
        match &self.seeds {
            Some(h) => h.rng_for(ADAPTER, &days.to_string()),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for PriceFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Map `[timestamp_ms, price]` pairs to daily records, truncating provider
/// timestamps to UTC calendar dates. Provider order is preserved.
fn parse_market_chart(resp: MarketChartResponse) -> Result<Vec<DailyPrice>, FetchError> {
    if resp.prices.is_empty() {
        return Err(FetchError::MissingData("no price data returned".into()));
    }

    let mut rows = Vec::with_capacity(resp.prices.len());
    for (timestamp_ms, price_usd) in resp.prices {
        let date = DateTime::from_timestamp_millis(timestamp_ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| {
                FetchError::MalformedBody(format!("invalid timestamp: {timestamp_ms}"))
            })?;
        rows.push(DailyPrice { date, price_usd });
    }
    Ok(rows)
}

/// Generate a synthetic price series: `days` consecutive dates ending
/// `today`, multiplicative random walk from a fixed base, floored and
/// rounded to cents.
pub fn synthetic_prices(days: u32, today: NaiveDate, rng: &mut impl Rng) -> Vec<DailyPrice> {
    let mut rows = Vec::with_capacity(days as usize);
    let mut price = SYNTHETIC_BASE_PRICE;

    for offset in (0..i64::from(days)).rev() {
        let date = today - Duration::days(offset);
        let drift = rng.gen_range(-SYNTHETIC_MAX_DRIFT..SYNTHETIC_MAX_DRIFT);
        price = (price * (1.0 + drift)).max(SYNTHETIC_PRICE_FLOOR);
        rows.push(DailyPrice {
            date,
            price_usd: (price * 100.0).round() / 100.0,
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn parse_maps_timestamps_to_dates() {
        // 2024-01-01T00:00:00Z and 2024-01-02T12:30:00Z
        let resp = MarketChartResponse {
            prices: vec![(1_704_067_200_000, 42_000.5), (1_704_198_600_000, 43_100.0)],
        };
        let rows = parse_market_chart(resp).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(rows[0].price_usd, 42_000.5);
    }

    #[test]
    fn parse_rejects_empty_price_list() {
        let resp = MarketChartResponse { prices: vec![] };
        let err = parse_market_chart(resp).unwrap_err();
        assert_eq!(err.kind(), "missing_data");
    }

    #[test]
    fn parse_response_json_shape() {
        let json = r#"{"prices": [[1704067200000, 42000.5]], "market_caps": [], "total_volumes": []}"#;
        let resp: MarketChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.prices.len(), 1);
    }

    #[test]
    fn synthetic_has_exact_row_count_ending_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let rows = synthetic_prices(30, today, &mut fixed_rng());
        assert_eq!(rows.len(), 30);
        assert_eq!(rows.last().unwrap().date, today);
        assert_eq!(rows[0].date, today - Duration::days(29));
    }

    #[test]
    fn synthetic_dates_strictly_increase() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let rows = synthetic_prices(14, today, &mut fixed_rng());
        for pair in rows.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn synthetic_respects_price_floor() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let rows = synthetic_prices(90, today, &mut fixed_rng());
        assert!(rows.iter().all(|r| r.price_usd >= SYNTHETIC_PRICE_FLOOR));
    }

    #[test]
    fn synthetic_is_deterministic_for_a_fixed_seed() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let a = synthetic_prices(30, today, &mut fixed_rng());
        let b = synthetic_prices(30, today, &mut fixed_rng());
        assert_eq!(a, b);
    }

    // Port 9 (discard) refuses connections, so the live path fails at
    // transport and the fallback contract takes over.
    #[test]
    fn fetch_falls_back_to_synthetic_when_provider_unreachable() {
        let fetcher = PriceFetcher::new()
            .with_base_url("http://127.0.0.1:9")
            .with_seeds(SeedHierarchy::new(42));

        let series = fetcher.fetch(30);

        assert_eq!(series.origin, DataOrigin::Synthetic);
        assert_eq!(series.rows.len(), 30);
        assert!(series
            .rows
            .iter()
            .all(|r| r.price_usd >= SYNTHETIC_PRICE_FLOOR));
    }

    #[test]
    fn fallback_is_reproducible_under_a_pinned_seed() {
        let fetch = || {
            PriceFetcher::new()
                .with_base_url("http://127.0.0.1:9")
                .with_seeds(SeedHierarchy::new(42))
                .fetch(14)
        };
        assert_eq!(fetch().rows, fetch().rows);
    }
}
