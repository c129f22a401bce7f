//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedTransportationSource};
use crate::planner::SearchConfig;
use crate::store::Store;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Locations and transportations
    pub store: Store,

    /// Cached leg snapshots over the same store
    pub transportations: Arc<CachedTransportationSource<Store>>,

    /// Route search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: Store, cache: &CacheConfig, config: SearchConfig) -> Self {
        Self {
            transportations: Arc::new(CachedTransportationSource::new(store.clone(), cache)),
            store,
            config: Arc::new(config),
        }
    }
}
