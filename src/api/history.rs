use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{DrawSource, FetchError};
use crate::state::{Draw, FeedSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://draw.ar-lottery01.com/WinGo/WinGo_1M";

const HISTORY_PATH: &str = "GetHistoryIssuePage.json";

/// HTTP client for the draw-history endpoint.
pub struct HistoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HistoryClient {
    /// `base_url` is the game root, e.g. `https://host/WinGo/WinGo_1M`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Use a preconfigured `reqwest::Client` (proxy, TLS, timeouts).
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the history page once.
    pub async fn get_history(&self) -> Result<FeedSnapshot, FetchError> {
        let url = history_url(&self.base_url, now_ms());
        debug!(url = %url, "fetching draw history");

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_history(&body)
    }
}

impl DrawSource for HistoryClient {
    async fn fetch(&self) -> Result<FeedSnapshot, FetchError> {
        self.get_history().await
    }
}

/// Build the request URL. `ts` defeats intermediate caches.
pub fn history_url(base_url: &str, ts_ms: i64) -> String {
    format!("{}/{}?ts={}", base_url.trim_end_matches('/'), HISTORY_PATH, ts_ms)
}

/// Parse a history body into a snapshot.
///
/// Expected shape is `{ "data": { "list": [...] } }`. A body that is not
/// JSON is an error. Anything else without a usable `data.list` (null body,
/// `data` of the wrong type, malformed list) is "no data yet" and gives an
/// empty snapshot.
pub fn parse_history(body: &str) -> Result<FeedSnapshot, FetchError> {
    let response: serde_json::Value = serde_json::from_str(body)?;

    let list = response
        .get("data")
        .and_then(|data| data.get("list"))
        .filter(|list| !list.is_null());
    let Some(list) = list else {
        debug!("feed body has no data.list");
        return Ok(FeedSnapshot::empty());
    };

    match Vec::<Draw>::deserialize(list) {
        Ok(draws) => Ok(FeedSnapshot::new(draws)),
        Err(e) => {
            warn!(error = %e, "malformed data.list, treating as empty");
            Ok(FeedSnapshot::empty())
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
