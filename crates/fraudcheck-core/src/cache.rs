//! Cache manager: staleness-gated refresh and snapshot publication.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use crate::error::FeedError;
use crate::feed::FeedClient;
use crate::lookup::{self, CacheStats, SearchResult};
use crate::parse::parse_feed;
use crate::snapshot::Snapshot;

/// How long a snapshot may serve before the next query triggers a refresh.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(600);

/// Owns the current [`Snapshot`] and the staleness clock.
///
/// Refresh is pull-based: the first call to cross the staleness boundary
/// pays for the fetch, there is no background timer. Construction performs
/// no I/O — the cache starts with an empty snapshot and an unset refresh
/// time, so the first [`FraudCache::ensure_fresh`] does the first fetch.
pub struct FraudCache {
    feed: FeedClient,
    refresh_interval: Duration,
    /// Published generation. Writers hold the write lock only for the
    /// pointer swap, never across the fetch.
    current: RwLock<Arc<Snapshot>>,
    /// Last successful refresh. The mutex doubles as the single-flight
    /// guard: at most one refresh runs at a time, and a caller that waited
    /// behind one re-checks the gate before fetching again.
    last_refresh: Mutex<Option<Instant>>,
}

impl FraudCache {
    #[must_use]
    pub fn new(feed: FeedClient, refresh_interval: Duration) -> Self {
        Self {
            feed,
            refresh_interval,
            current: RwLock::new(Arc::new(Snapshot::empty())),
            last_refresh: Mutex::new(None),
        }
    }

    /// Refreshes the snapshot if the staleness interval has elapsed,
    /// otherwise returns immediately.
    ///
    /// On failure the previous snapshot and refresh time are left
    /// untouched, so the last good generation stays servable.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when the feed cannot be fetched.
    pub async fn ensure_fresh(&self) -> Result<(), FeedError> {
        let mut last_refresh = self.last_refresh.lock().await;
        if let Some(at) = *last_refresh {
            if at.elapsed() < self.refresh_interval {
                return Ok(());
            }
        }

        let body = self.feed.fetch().await?;
        let snapshot = Arc::new(Snapshot::build(parse_feed(&body)));
        tracing::info!(
            records = snapshot.record_count(),
            phones = snapshot.phone_count(),
            "fraud feed refreshed"
        );

        *self.current.write().await = snapshot;
        *last_refresh = Some(Instant::now());
        Ok(())
    }

    /// Answers one query, refreshing first if the snapshot is stale.
    ///
    /// Policy: refresh failure aborts the search. A stale-but-good snapshot
    /// is not silently substituted; callers that want stale reads can go
    /// through [`FraudCache::snapshot`] deliberately.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when a due refresh fails.
    pub async fn search(&self, query: &str) -> Result<SearchResult, FeedError> {
        self.ensure_fresh().await?;
        let snapshot = self.snapshot().await;
        Ok(lookup::resolve(&snapshot, query))
    }

    /// The currently published snapshot (cheap `Arc` clone, no refresh).
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// Diagnostics over the published snapshot; never triggers a refresh.
    pub async fn stats(&self) -> CacheStats {
        let snapshot = self.snapshot().await;
        CacheStats {
            total_records: snapshot.record_count(),
            unique_phones: snapshot.phone_count(),
            built_at: snapshot.built_at(),
        }
    }
}
