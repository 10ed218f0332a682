//! Deterministic seeds for synthetic fallback data.
//!
//! A master seed is expanded into per-(adapter, window) sub-seeds via BLAKE3
//! hashing, so each adapter's synthetic output is reproducible and
//! independent of the order in which adapters run.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic seed hierarchy for the synthetic fallback generators.
///
/// Derivation is hash-based, not order-dependent: seeding the price adapter
/// before or after the earthquake adapter yields the same sub-seeds.
#[derive(Debug, Clone, Copy)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a sub-seed for a specific adapter and request window.
    ///
    /// `adapter` is the adapter's name ("coingecko", "usgs"); `window` is a
    /// rendering of the request parameters, so different lookback windows
    /// produce independent synthetic series.
    pub fn sub_seed(&self, adapter: &str, window: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(adapter.as_bytes());
        hasher.update(window.as_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }

    /// Create a seeded StdRng for an adapter/window pair.
    pub fn rng_for(&self, adapter: &str, window: &str) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(adapter, window))
    }
}
