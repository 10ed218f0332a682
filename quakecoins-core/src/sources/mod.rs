//! Source adapters and the shared fetch-error taxonomy.
//!
//! Each adapter exposes an infallible `fetch` surface: every failure kind
//! collapses into the synthetic-fallback branch, logged but never surfaced
//! to the caller. The distinguished error kinds exist for observability
//! only.

pub mod coingecko;
pub mod usgs;

pub use coingecko::{synthetic_prices, PriceFetcher};
pub use usgs::{synthetic_quakes, QuakeFetcher};

use std::time::Duration;

use thiserror::Error;

/// Per-request timeout for both providers.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Structured error kinds for a failed live fetch.
///
/// All four kinds trigger the same fallback branch; they are distinguished
/// only in the log stream and the TUI error history.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("response missing required data: {0}")]
    MissingData(String),
}

impl FetchError {
    /// Short machine-readable kind label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::MalformedBody(_) => "malformed_body",
            FetchError::MissingData(_) => "missing_data",
        }
    }
}

/// Build the blocking HTTP client shared by both adapters.
fn http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("quakecoins/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_are_distinguished() {
        assert_eq!(FetchError::Transport("x".into()).kind(), "transport");
        assert_eq!(FetchError::Status { status: 503 }.kind(), "status");
        assert_eq!(FetchError::MalformedBody("x".into()).kind(), "malformed_body");
        assert_eq!(FetchError::MissingData("x".into()).kind(), "missing_data");
    }

    #[test]
    fn status_error_displays_code() {
        let err = FetchError::Status { status: 429 };
        assert!(err.to_string().contains("429"));
    }
}
