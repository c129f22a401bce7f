//! Adjacency index over a snapshot of legs.

use std::collections::HashMap;

use crate::domain::{Leg, LocationId};

/// Outgoing legs grouped by origin location.
///
/// Borrows the leg snapshot it was built from, so building one is a single
/// pass with no cloning. Parallel legs between the same pair of locations
/// are all kept, in snapshot order.
#[derive(Debug, Default)]
pub struct Graph<'a> {
    adjacency: HashMap<LocationId, Vec<&'a Leg>>,
    leg_count: usize,
}

impl<'a> Graph<'a> {
    /// Build the index from every leg in the snapshot.
    pub fn build(legs: &'a [Leg]) -> Self {
        let mut adjacency: HashMap<LocationId, Vec<&'a Leg>> = HashMap::new();
        for leg in legs {
            adjacency.entry(leg.origin).or_default().push(leg);
        }

        Self {
            adjacency,
            leg_count: legs.len(),
        }
    }

    /// Legs leaving `location`, empty if there are none.
    pub fn outgoing(&self, location: LocationId) -> &[&'a Leg] {
        self.adjacency
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of locations with at least one outgoing leg.
    pub fn origin_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn leg_count(&self) -> usize {
        self.leg_count
    }
}
