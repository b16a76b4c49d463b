use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::feeds::FeedUpdate;
use super::provider::MetricsProvider;
use super::types::{FeedSnapshot, NOT_AVAILABLE, PriceMap, ProcessMetric};

/// Throttles the process ranking so it is queried at most once per `ttl`,
/// however fast frames are drawn.
#[derive(Debug)]
pub struct TopConsumersCache {
    snapshot: Vec<ProcessMetric>,
    refreshed_at: Option<Instant>,
    ttl: Duration,
}

impl TopConsumersCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snapshot: vec![],
            refreshed_at: None,
            ttl,
        }
    }

    /// Returns the stored ranking unless it is at least `ttl` old, in which case
    /// the provider is queried exactly once and the result stored.
    pub fn get_at(
        &mut self,
        provider: &mut dyn MetricsProvider,
        n: usize,
        now: Instant,
    ) -> &[ProcessMetric] {
        if self.is_stale(now) {
            self.snapshot = provider.top_consumers(n);
            self.refreshed_at = Some(now);
            debug!(count = self.snapshot.len(), "refreshed top consumers");
        }
        &self.snapshot
    }

    fn is_stale(&self, now: Instant) -> bool {
        match self.refreshed_at {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.ttl,
        }
    }
}

/// Last good weather and prices, reused when a fetch fails.
#[derive(Debug, Default)]
pub struct FeedCache {
    weather: Option<(String, DateTime<Utc>)>,
    prices: Option<(PriceMap, DateTime<Utc>)>,
}

/// Turn a raw feed update into the snapshot the dashboard shows, falling back
/// to cached values no older than `cache_seconds` when a fetch failed.
pub fn apply_feed_cache(
    update: FeedUpdate,
    cache: &mut FeedCache,
    cache_seconds: u64,
    now: DateTime<Utc>,
) -> FeedSnapshot {
    let fresh = |ts: &DateTime<Utc>| (now - *ts).num_seconds() <= cache_seconds as i64;

    let git_branch = match update.git_branch {
        Ok(branch) => branch,
        Err(err) => {
            warn!(error = %err, "git branch unavailable");
            NOT_AVAILABLE.to_string()
        }
    };

    let weather = match update.weather {
        Ok(text) => {
            cache.weather = Some((text.clone(), now));
            text
        }
        Err(err) => match &cache.weather {
            Some((cached, ts)) if fresh(ts) => {
                warn!(error = %err, "weather fetch failed, showing cached value");
                cached.clone()
            }
            _ => {
                warn!(error = %err, "weather unavailable");
                NOT_AVAILABLE.to_string()
            }
        },
    };

    let prices = match update.prices {
        Ok(prices) => {
            cache.prices = Some((prices.clone(), now));
            prices
        }
        Err(err) => match &cache.prices {
            Some((cached, ts)) if fresh(ts) => {
                warn!(error = %err, "price fetch failed, showing cached prices");
                cached.clone()
            }
            _ => {
                warn!(error = %err, "prices unavailable");
                PriceMap::new()
            }
        },
    };

    FeedSnapshot {
        git_branch,
        weather,
        prices,
    }
}
