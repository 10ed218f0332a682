//! QuakeCoins Core — data pipeline for a novelty dashboard correlating
//! Bitcoin prices with global earthquake activity.
//!
//! Three stages, composed linearly:
//! - Source adapters (`sources`) — CoinGecko prices and USGS earthquake
//!   aggregates, each with an infallible synthetic-fallback contract
//! - Aligner (`align`) — date-keyed left join anchored on the price range
//! - Correlation estimator (`correlate`) — naive Pearson snapshot
//!
//! `pipeline::refresh` runs one full cycle; the TUI and CLI both consume it.

pub mod align;
pub mod correlate;
pub mod domain;
pub mod pipeline;
pub mod rng;
pub mod sources;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI worker thread moves across
    /// its channel is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::DailyPrice>();
        require_sync::<domain::DailyPrice>();
        require_send::<domain::DailyQuakes>();
        require_sync::<domain::DailyQuakes>();
        require_send::<domain::AlignedRow>();
        require_sync::<domain::AlignedRow>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::QuakeSeries>();
        require_sync::<domain::QuakeSeries>();
        require_send::<domain::CorrelationSnapshot>();
        require_sync::<domain::CorrelationSnapshot>();
        require_send::<domain::DataOrigin>();
        require_sync::<domain::DataOrigin>();

        require_send::<pipeline::RefreshOptions>();
        require_sync::<pipeline::RefreshOptions>();
        require_send::<pipeline::DashboardSnapshot>();
        require_sync::<pipeline::DashboardSnapshot>();

        require_send::<rng::SeedHierarchy>();
        require_sync::<rng::SeedHierarchy>();
    }
}
