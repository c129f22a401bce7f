//! Search configuration for the route planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of legs in a route.
    /// Paths longer than this are never expanded or accepted.
    pub max_legs: usize,

    /// Page size used when a request does not ask for one.
    pub default_page_size: usize,

    /// Largest page size a request may ask for.
    /// Larger requests are clamped to this.
    pub max_page_size: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_legs: usize, default_page_size: usize, max_page_size: usize) -> Self {
        Self {
            max_legs,
            default_page_size,
            max_page_size,
        }
    }

    /// Resolve a requested page size against the defaults and the cap.
    ///
    /// Zero and missing sizes fall back to the default.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(0) | None => self.default_page_size,
            Some(size) => size.min(self.max_page_size),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_legs: 3,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}
