//! Turning accepted paths into routes.

use crate::domain::{DomainError, Leg, Route};

/// Build a route from a path, totalling price and duration.
///
/// Legs are kept in path order. Missing prices and durations count as zero.
pub fn to_route(path: &[&Leg]) -> Result<Route, DomainError> {
    let total_price = path.iter().map(|leg| leg.price_or_zero()).sum();
    let total_duration = path.iter().map(|leg| leg.duration_or_zero()).sum();
    let legs = path.iter().map(|&leg| leg.clone()).collect();

    Route::new(legs, total_price, total_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegId, LegKind, LocationId};

    fn leg(id: u64, from: u64, to: u64, price: Option<f64>, duration: Option<f64>) -> Leg {
        Leg {
            id: LegId(id),
            name: format!("leg{id}"),
            kind: if id == 2 { LegKind::Flight } else { LegKind::Other },
            origin: LocationId(from),
            destination: LocationId(to),
            price,
            duration_mins: duration,
        }
    }

    #[test]
    fn totals_are_sums() {
        let bus = leg(1, 1, 2, Some(10.0), Some(30.0));
        let flight = leg(2, 2, 3, Some(200.0), Some(180.0));
        let uber = leg(3, 3, 4, Some(5.0), Some(20.0));

        let route = to_route(&[&bus, &flight, &uber]).unwrap();

        assert_eq!(route.total_price(), 215.0);
        assert_eq!(route.total_duration(), 230.0);
    }

    #[test]
    fn missing_amounts_contribute_zero() {
        let bus = leg(1, 1, 2, None, Some(30.0));
        let flight = leg(2, 2, 3, Some(200.0), None);

        let route = to_route(&[&bus, &flight]).unwrap();

        assert_eq!(route.total_price(), 200.0);
        assert_eq!(route.total_duration(), 30.0);
    }

    #[test]
    fn keeps_leg_order() {
        let bus = leg(1, 1, 2, None, None);
        let flight = leg(2, 2, 3, None, None);
        let uber = leg(3, 3, 4, None, None);

        let route = to_route(&[&bus, &flight, &uber]).unwrap();
        let ids: Vec<LegId> = route.legs().iter().map(|l| l.id).collect();

        assert_eq!(ids, vec![LegId(1), LegId(2), LegId(3)]);
    }

    #[test]
    fn empty_path_is_an_error() {
        assert_eq!(to_route(&[]), Err(DomainError::EmptyRoute));
    }
}
