//! Freshness-gated caching for upstream fetches.
//!
//! Every external source this server talks to (transit feeds, weather,
//! bike-share, home sensors) declares how long its data stays useful: some
//! in the payload itself, some as a fixed constant. `TtlCache` is the one
//! memoizer they all share, a single slot holding the most recent value and
//! the window it is valid for.
//!
//! The cache is strict about failures: a refetch that errors propagates the
//! error to the caller even when a stale value is still in the slot.
//! [`TtlCache::last`] is the one place a fallback-to-stale policy could
//! later be introduced without touching any caller.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current instant, injectable for deterministic tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A cached value together with the window it is valid for.
struct CacheEntry<T> {
    value: Arc<T>,
    fetched_at: Instant,
    ttl: Duration,
}

/// Single-slot cache gating a fetch operation behind a time-to-live.
///
/// The slot is replaced wholesale on every successful refetch and never
/// mutated in place. A `TtlCache` is owned by exactly one client; callers
/// that share a client wrap the cache in a `tokio::sync::Mutex`, which also
/// keeps two concurrent misses from issuing duplicate fetches.
pub struct TtlCache<T> {
    entry: Option<CacheEntry<T>>,
    clock: Arc<dyn Clock>,
}

impl<T> TtlCache<T> {
    /// Create an empty cache using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache using the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { entry: None, clock }
    }

    /// The cached value, if it is still within its time-to-live.
    ///
    /// A ttl of zero never yields a value: caching is disabled and every
    /// call to [`get_or_fetch`](Self::get_or_fetch) refetches.
    pub fn fresh(&self) -> Option<Arc<T>> {
        let entry = self.entry.as_ref()?;
        if self.clock.now().duration_since(entry.fetched_at) < entry.ttl {
            Some(Arc::clone(&entry.value))
        } else {
            None
        }
    }

    /// The most recently stored value regardless of freshness.
    ///
    /// Callers wanting a stale-fallback policy would consult this after a
    /// failed refetch; no caller does so today.
    pub fn last(&self) -> Option<Arc<T>> {
        self.entry.as_ref().map(|entry| Arc::clone(&entry.value))
    }

    /// Return the cached value, refetching if the slot is empty or expired.
    ///
    /// `fetch` resolves to the new value and its time-to-live: a caller
    /// constant, or read from the payload when the upstream source is the
    /// record of truth for its own cache lifetime. On fetch failure the
    /// error propagates and the previous entry is left untouched.
    pub async fn get_or_fetch<F, Fut, E>(&mut self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(T, Duration), E>>,
    {
        if let Some(value) = self.fresh() {
            return Ok(value);
        }

        let (value, ttl) = fetch().await?;
        let value = Arc::new(value);
        self.entry = Some(CacheEntry {
            value: Arc::clone(&value),
            fetched_at: self.clock.now(),
            ttl,
        });

        Ok(value)
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
