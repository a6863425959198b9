pub mod history;

use std::future::Future;

pub use history::HistoryClient;

use crate::state::FeedSnapshot;

/// Why a poll produced no snapshot. All variants are retried on the next tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("feed returned HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("could not parse feed body: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // Non-2xx statuses are checked on the response, not mapped here
        if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

/// Anything that can produce a fresh snapshot of the draw history.
///
/// The HTTP client is the real one; tests plug in scripted sources.
pub trait DrawSource {
    fn fetch(&self) -> impl Future<Output = Result<FeedSnapshot, FetchError>> + Send;
}
