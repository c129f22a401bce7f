//! In-memory persistence for locations and transportations.
//!
//! Provides create/read/update/delete for both record types, answers the
//! planner's location lookups and leg snapshots, and can be populated from
//! a JSON seed file at startup.

mod error;
mod memory;
mod seed;

pub use error::StoreError;
pub use memory::Store;
pub use seed::{SeedFile, SeedLocation, SeedTransportation};
