//! Realtime transit feed HTTP client.
//!
//! One client serves every line: feeds are fetched per line group and kept
//! behind a per-line TTL cache, so a burst of requests (an arrivals board
//! and a line view refreshing together) costs one upstream fetch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::stops::StopDirectory;

use super::arrivals::{StopUpdate, trips_at_stop};
use super::decode::decode;
use super::entity::{Alert, FeedEntity};
use super::error::TransitError;
use super::line::TrainLine;
use super::line_state::{LineState, line_state};

/// Default base URL for the realtime feed service.
const DEFAULT_BASE_URL: &str = "https://api-endpoint.mta.info/Dataservice/mtagtfsfeeds";

/// How long a fetched feed stays fresh. The upstream publishes roughly
/// every 30–60 seconds.
const DEFAULT_FEED_TTL: Duration = Duration::from_secs(60);

/// Configuration for the transit client.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// Base URL for the feed service (override for testing)
    pub base_url: String,
    /// Freshness window for cached feeds; zero disables caching
    pub feed_ttl: Duration,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransitConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            feed_ttl: DEFAULT_FEED_TTL,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the feed freshness window.
    pub fn with_feed_ttl(mut self, ttl: Duration) -> Self {
        self.feed_ttl = ttl;
        self
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the realtime transit feed service.
///
/// Owns the stop directory and a TTL cache slot per line group.
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
    feed_ttl: Duration,
    stops: Arc<StopDirectory>,
    feeds: Mutex<HashMap<TrainLine, TtlCache<Vec<FeedEntity>>>>,
    clock: Arc<dyn Clock>,
}

impl TransitClient {
    /// Create a new transit client.
    pub fn new(config: TransitConfig, stops: Arc<StopDirectory>) -> Result<Self, TransitError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            feed_ttl: config.feed_ttl,
            stops,
            feeds: Mutex::new(HashMap::new()),
            clock: Arc::new(SystemClock),
        })
    }

    /// The stop reference directory this client resolves against.
    pub fn stops(&self) -> &StopDirectory {
        &self.stops
    }

    /// Decoded entities for a line's feed, fetched or served from cache.
    ///
    /// Holding the cache lock across the fetch doubles as the single-flight
    /// guard: concurrent callers wait rather than refetching.
    pub async fn feed(&self, line: TrainLine) -> Result<Arc<Vec<FeedEntity>>, TransitError> {
        let mut feeds = self.feeds.lock().await;
        let cache = feeds
            .entry(line)
            .or_insert_with(|| TtlCache::with_clock(Arc::clone(&self.clock)));

        cache
            .get_or_fetch(|| async move {
                let bytes = self.fetch_feed(line).await?;
                let entities = decode(&bytes)?;
                Ok((entities, self.feed_ttl))
            })
            .await
    }

    /// Upcoming visits to a stop, with the line's active alerts.
    ///
    /// The stop's line is resolved from the id's leading character; an id
    /// no feed is mapped for is an error, since the caller named a stop it
    /// expects to exist.
    pub async fn arrivals(
        &self,
        stop_id: &str,
    ) -> Result<(Vec<StopUpdate>, Vec<Alert>), TransitError> {
        let line = TrainLine::from_stop_id(stop_id)
            .ok_or_else(|| TransitError::UnknownStop(stop_id.to_string()))?;
        let entities = self.feed(line).await?;
        Ok(trips_at_stop(&entities, &self.stops, stop_id))
    }

    /// Station-by-station display state for a whole line.
    pub async fn line_overview(&self, line: TrainLine) -> Result<LineState, TransitError> {
        let entities = self.feed(line).await?;
        Ok(line_state(&entities, &self.stops, line))
    }

    async fn fetch_feed(&self, line: TrainLine) -> Result<Vec<u8>, TransitError> {
        debug!(%line, "fetching transit feed");
        let url = format!("{}/{}", self.base_url, line.feed_path());

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(TransitError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
