//! Domain types for the route planner.
//!
//! This module contains the core domain model types: locations, the
//! transportation legs between them, and the routes assembled from legs.
//! Payload types (`NewLocation`, `NewLeg`) check their invariants before
//! the store accepts them.

mod error;
mod leg;
mod location;
mod route;

pub use error::DomainError;
pub use leg::{Leg, LegId, LegKind, NewLeg};
pub use location::{Location, LocationId, NewLocation};
pub use route::Route;
