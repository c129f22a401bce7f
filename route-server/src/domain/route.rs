//! Route type.
//!
//! A `Route` is an accepted path from source to destination, carrying the
//! totals computed when it was assembled.

use super::{DomainError, Leg, LocationId};

/// A complete route: ordered legs plus aggregate price and duration.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (destination of one = origin of next)
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    legs: Vec<Leg>,
    total_price: f64,
    total_duration: f64,
}

impl Route {
    /// Constructs a route from ordered legs and precomputed totals.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `legs` is empty
    /// - Legs don't connect (destination != next origin)
    pub fn new(legs: Vec<Leg>, total_price: f64, total_duration: f64) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for window in legs.windows(2) {
            if window[0].destination != window[1].origin {
                return Err(DomainError::LegsNotConnected(
                    window[0].destination,
                    window[1].origin,
                ));
            }
        }

        Ok(Route {
            legs,
            total_price,
            total_duration,
        })
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Sum of leg prices, missing prices counted as zero.
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Sum of leg durations in minutes, missing durations counted as zero.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Returns the location the route starts at.
    pub fn origin(&self) -> LocationId {
        // Safe: route has at least one leg
        self.legs[0].origin
    }

    /// Returns the location the route ends at.
    pub fn destination(&self) -> LocationId {
        // Safe: route has at least one leg
        self.legs[self.legs.len() - 1].destination
    }

    /// Returns every location visited, in order, starting with the origin.
    pub fn locations(&self) -> Vec<LocationId> {
        std::iter::once(self.origin())
            .chain(self.legs.iter().map(|leg| leg.destination))
            .collect()
    }

    /// Returns the flight leg, if the route has one.
    pub fn flight(&self) -> Option<&Leg> {
        self.legs.iter().find(|leg| leg.is_flight())
    }

    /// Leg names joined with arrows, for logging.
    pub fn describe(&self) -> String {
        self.legs
            .iter()
            .map(|leg| leg.name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
