//! Route search.
//!
//! Enumerates every simple path from a source to a destination that is a
//! legal route, by depth-first backtracking over the leg graph. Partial
//! paths that can no longer become legal are pruned as they are built.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::domain::{Leg, Location, LocationId, Route};

use super::aggregate::to_route;
use super::config::SearchConfig;
use super::graph::Graph;
use super::page::{Page, PageRequest};
use super::validator::{can_extend, is_complete_path};

/// Error from route search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Source or destination location does not exist
    #[error("Location not found with id: {0}")]
    LocationNotFound(LocationId),

    /// A collaborator failed to answer
    #[error("failed to read {what}: {message}")]
    Source { what: &'static str, message: String },

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// Resolves location ids to locations.
pub trait LocationLookup {
    /// Look up a location, failing with `LocationNotFound` if it is unknown.
    fn get(&self, id: LocationId) -> impl Future<Output = Result<Location, SearchError>> + Send;
}

/// Provides the set of all legs.
///
/// This abstraction allows the planner to be tested with fixed data.
pub trait TransportationSource {
    /// Returns a consistent snapshot of every leg at call time.
    fn list_all(&self) -> impl Future<Output = Result<Arc<Vec<Leg>>, SearchError>> + Send;
}

/// Request for route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub source: LocationId,
    pub destination: LocationId,
    pub page: PageRequest,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(source: LocationId, destination: LocationId, page: PageRequest) -> Self {
        Self {
            source,
            destination,
            page,
        }
    }
}

/// Result of route search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The requested page of routes, in discovery order.
    pub page: Page<Route>,

    /// Number of search steps taken.
    pub paths_explored: usize,
}

/// Paths found by [`enumerate_paths`].
#[derive(Debug)]
pub struct Enumeration<'a> {
    /// Accepted paths in discovery order, each source first.
    pub paths: Vec<Vec<&'a Leg>>,

    /// Number of search steps taken.
    pub steps: usize,
}

/// Find every legal simple path from `source` to `destination`.
///
/// Paths have at most `max_legs` legs and never revisit a location.
pub fn enumerate_paths<'a>(
    graph: &Graph<'a>,
    source: LocationId,
    destination: LocationId,
    max_legs: usize,
) -> Enumeration<'a> {
    let mut enumerator = PathEnumerator {
        graph,
        destination,
        max_legs,
        path: Vec::with_capacity(max_legs + 1),
        visited: HashSet::new(),
        found: Vec::new(),
        steps: 0,
    };
    enumerator.visit(source);

    Enumeration {
        paths: enumerator.found,
        steps: enumerator.steps,
    }
}

/// Backtracking state for one search.
struct PathEnumerator<'g, 'a> {
    graph: &'g Graph<'a>,
    destination: LocationId,
    max_legs: usize,
    /// Legs taken so far, source first.
    path: Vec<&'a Leg>,
    /// Locations on the current path, excluding the one being visited.
    visited: HashSet<LocationId>,
    found: Vec<Vec<&'a Leg>>,
    steps: usize,
}

impl<'g, 'a> PathEnumerator<'g, 'a> {
    fn visit(&mut self, current: LocationId) {
        self.steps += 1;

        if self.path.len() > self.max_legs {
            return;
        }

        if current == self.destination && is_complete_path(&self.path) {
            trace!(legs = self.path.len(), "accepted path");
            self.found.push(self.path.clone());
            return;
        }

        self.visited.insert(current);

        let graph = self.graph;
        for &leg in graph.outgoing(current) {
            if self.visited.contains(&leg.destination) || !can_extend(&self.path, leg) {
                continue;
            }

            self.path.push(leg);
            self.visit(leg.destination);
            self.path.pop();
        }

        self.visited.remove(&current);
    }
}

/// Route planner over a location lookup and a leg source.
pub struct Planner<'a, L, T> {
    locations: &'a L,
    transportations: &'a T,
    config: &'a SearchConfig,
}

impl<'a, L: LocationLookup, T: TransportationSource> Planner<'a, L, T> {
    /// Create a new planner.
    pub fn new(locations: &'a L, transportations: &'a T, config: &'a SearchConfig) -> Self {
        Self {
            locations,
            transportations,
            config,
        }
    }

    /// Find every legal route between two locations and return one page.
    ///
    /// # Errors
    ///
    /// Returns `LocationNotFound` if either end does not exist (the source
    /// is checked first), or `Source` if the leg snapshot cannot be read.
    /// Finding no routes is not an error.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let source = self.locations.get(request.source).await?;
        let destination = self.locations.get(request.destination).await?;

        let snapshot = self.transportations.list_all().await?;
        let graph = Graph::build(&snapshot);

        debug!(
            legs = graph.leg_count(),
            origins = graph.origin_count(),
            "built leg graph"
        );

        let enumeration = enumerate_paths(&graph, source.id, destination.id, self.config.max_legs);

        let mut routes = Vec::with_capacity(enumeration.paths.len());
        for path in &enumeration.paths {
            match to_route(path) {
                Ok(route) => {
                    debug!(route = %route.describe(), "found valid route");
                    routes.push(route);
                }
                Err(e) => debug!(error = %e, "discarding malformed path"),
            }
        }

        info!(
            routes = routes.len(),
            from = %source.name,
            to = %destination.name,
            steps = enumeration.steps,
            "route search complete"
        );

        Ok(SearchResult {
            page: Page::from_full(routes, &request.page),
            paths_explored: enumeration.steps,
        })
    }
}
