use crate::model::{FetchError, ProfileStats};
use crate::stats_fetcher::StatsSource;

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    stored_at: Instant,
    stats: ProfileStats,
}

/// Time-limited memo of successful lookups, keyed on the lower-cased username.
pub struct CachedFetcher<S> {
    inner: S,
    ttl: Duration,
    max_entries: usize,
    entries: Mutex<HashMap<String, Entry>>,
}

impl<S: StatsSource> CachedFetcher<S> {
    pub fn new(inner: S, ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner,
            ttl,
            max_entries: max_entries.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(username: &str) -> String {
        username.trim().to_lowercase()
    }

    async fn lookup(&self, key: &str) -> Option<ProfileStats> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.stats.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn store(&self, key: String, stats: ProfileStats) {
        let mut entries = self.entries.lock().await;

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let ttl = self.ttl;
            entries.retain(|_, e| e.stored_at.elapsed() < ttl);

            if entries.len() >= self.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.stored_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                stats,
            },
        );
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait::async_trait]
impl<S: StatsSource> StatsSource for CachedFetcher<S> {
    async fn fetch(&self, username: &str) -> Result<ProfileStats, FetchError> {
        let key = Self::key(username);

        if let Some(stats) = self.lookup(&key).await {
            debug!("Cache hit for '{}'", key);
            return Ok(stats);
        }

        // Lock is released here; concurrent misses may both go upstream.
        let stats = self.inner.fetch(username).await?;
        self.store(key, stats.clone()).await;
        Ok(stats)
    }
}
