//! Route planner using bounded depth-first search.
//!
//! This module implements the core route finding algorithm that answers:
//! "Which ways are there to get from here to there with exactly one flight?"
//!
//! The leg snapshot is indexed by origin, every legal simple path of at most
//! three legs is enumerated by backtracking search, and the accepted paths
//! are totalled into routes and paginated.

mod aggregate;
mod config;
mod graph;
mod page;
mod search;
mod validator;


pub use aggregate::to_route;
pub use config::SearchConfig;
pub use graph::Graph;
pub use page::{Page, PageRequest, paginate};
pub use search::{
    Enumeration, LocationLookup, Planner, SearchError, SearchRequest, SearchResult,
    TransportationSource, enumerate_paths,
};
pub use validator::{can_extend, is_complete_path};
