//! Caching layer for transportation snapshots.
//!
//! Every route search needs the full leg list. Snapshots are cached keyed by
//! the source's revision counter, so a write to the leg set makes the old
//! entry unreachable without any explicit invalidation. The TTL bounds how
//! long an unused snapshot is held.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Leg;
use crate::planner::{SearchError, TransportationSource};
use crate::store::Store;

/// Cached snapshot entry.
type Snapshot = Arc<Vec<Leg>>;

/// A transportation source that can report when its contents change.
pub trait Revisioned: TransportationSource {
    /// A counter that increases whenever the leg set changes.
    fn revision(&self) -> impl Future<Output = u64> + Send;
}

impl Revisioned for Store {
    async fn revision(&self) -> u64 {
        Store::revision(self).await
    }
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 16,
        }
    }
}

/// Transportation source with caching.
///
/// Wraps a source and caches its snapshots by revision.
pub struct CachedTransportationSource<S> {
    source: S,
    snapshots: MokaCache<u64, Snapshot>,
}

impl<S: Revisioned + Sync> CachedTransportationSource<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, snapshots }
    }

    /// Access the wrapped source for operations that bypass the cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.snapshots.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate(&self) {
        self.snapshots.invalidate_all();
    }
}

impl<S: Revisioned + Sync> TransportationSource for CachedTransportationSource<S> {
    async fn list_all(&self) -> Result<Arc<Vec<Leg>>, SearchError> {
        // Read before fetching so a stored snapshot is never older than its key.
        let revision = self.source.revision().await;

        if let Some(cached) = self.snapshots.get(&revision).await {
            trace!(revision, "snapshot cache hit");
            return Ok(cached);
        }

        let snapshot = self.source.list_all().await?;
        self.snapshots.insert(revision, snapshot.clone()).await;

        trace!(revision, legs = snapshot.len(), "snapshot cache miss");
        Ok(snapshot)
    }
}
