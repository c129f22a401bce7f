//! Route legality rules.
//!
//! A legal route has exactly one flight. Any legs before the flight and
//! the (at most one) leg after it are local legs of kind `Other`.
//!
//! Two predicates are provided. [`is_complete_path`] checks a finished
//! path, and [`can_extend`] is the prefix check used to prune the search.
//! They are kept separate: `can_extend` caps local legs after the flight
//! but not before it, leaving the leading legs to the depth bound.

use crate::domain::{Leg, LegKind};

/// Returns true if `path` is a legal route on its own.
///
/// Paths are in travel order, source first.
pub fn is_complete_path(path: &[&Leg]) -> bool {
    if path.is_empty() {
        return false;
    }

    let flight_count = path.iter().filter(|leg| leg.is_flight()).count();
    if flight_count != 1 {
        return false;
    }

    if path.len() == 1 {
        return path[0].is_flight();
    }

    let Some(flight_idx) = path.iter().position(|leg| leg.is_flight()) else {
        return false;
    };

    let before_ok = path[..flight_idx]
        .iter()
        .all(|leg| leg.kind == LegKind::Other);
    let after_ok = path[flight_idx + 1..]
        .iter()
        .all(|leg| leg.kind == LegKind::Other);

    before_ok && after_ok
}

/// Returns true if appending `candidate` to `path` can still lead to a
/// legal route.
///
/// Rejects a second flight, and a second local leg after the flight.
pub fn can_extend(path: &[&Leg], candidate: &Leg) -> bool {
    if path.is_empty() {
        return true;
    }

    let has_flight = path.iter().any(|leg| leg.is_flight());

    match candidate.kind {
        LegKind::Flight => !has_flight,
        LegKind::Other if has_flight => !has_other_after_flight(path),
        LegKind::Other => true,
    }
}

/// True if some `Other` leg comes after the first flight in `path`.
fn has_other_after_flight(path: &[&Leg]) -> bool {
    path.iter()
        .skip_while(|leg| !leg.is_flight())
        .skip(1)
        .any(|leg| leg.kind == LegKind::Other)
}
