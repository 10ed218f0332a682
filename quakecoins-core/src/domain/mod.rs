//! Domain types — the per-day records that flow through the pipeline.

pub mod aligned;
pub mod price;
pub mod quake;

pub use aligned::{AlignedRow, CorrelationSnapshot};
pub use price::{DailyPrice, PriceSeries};
pub use quake::{DailyQuakes, QuakeSeries};

use serde::{Deserialize, Serialize};

/// Where a fetched series came from.
///
/// The presentation layer badges `Synthetic` series so a user can tell a
/// degraded offline run from live provider data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    Live,
    Synthetic,
}

impl DataOrigin {
    pub fn label(self) -> &'static str {
        match self {
            DataOrigin::Live => "LIVE",
            DataOrigin::Synthetic => "SYNTH",
        }
    }
}
