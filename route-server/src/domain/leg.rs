//! Transportation leg types.
//!
//! A `Leg` is one directed edge of the transportation graph: a single
//! bus, train, uber or flight between two locations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DomainError, LocationId};

/// Opaque identifier of a leg.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegId(pub u64);

impl fmt::Debug for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LegId({})", self.0)
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a leg.
///
/// A legal route contains exactly one `Flight`; every other leg is
/// local ground transport and counts as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegKind {
    Flight,
    Other,
}

impl LegKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegKind::Flight => "FLIGHT",
            LegKind::Other => "OTHER",
        }
    }

    pub fn is_flight(&self) -> bool {
        matches!(self, LegKind::Flight)
    }
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegKind {
    type Err = DomainError;

    /// Parse a kind, accepting any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FLIGHT" => Ok(LegKind::Flight),
            "OTHER" => Ok(LegKind::Other),
            _ => Err(DomainError::InvalidLegKind(s.to_string())),
        }
    }
}

/// A directed transportation edge between two locations.
///
/// Price and duration are optional; absent values count as zero when a
/// route is totalled.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub id: LegId,
    pub name: String,
    pub kind: LegKind,
    pub origin: LocationId,
    pub destination: LocationId,
    pub price: Option<f64>,
    pub duration_mins: Option<f64>,
}

impl Leg {
    pub fn is_flight(&self) -> bool {
        self.kind.is_flight()
    }

    /// Price with a missing value treated as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Duration in minutes with a missing value treated as zero.
    pub fn duration_or_zero(&self) -> f64 {
        self.duration_mins.unwrap_or(0.0)
    }
}

/// The user-supplied part of a leg, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeg {
    pub name: String,
    pub kind: LegKind,
    pub origin: LocationId,
    pub destination: LocationId,
    pub price: Option<f64>,
    pub duration_mins: Option<f64>,
}

impl NewLeg {
    /// Check the payload is well formed.
    ///
    /// Referential integrity of the two location ids is the store's concern.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName("transportation"));
        }
        if self.origin == self.destination {
            return Err(DomainError::InvalidLeg(
                "origin and destination must differ",
            ));
        }
        if let Some(price) = self.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(DomainError::InvalidAmount {
                field: "price",
                value: price,
            });
        }
        if let Some(duration) = self.duration_mins
            && (!duration.is_finite() || duration < 0.0)
        {
            return Err(DomainError::InvalidAmount {
                field: "duration",
                value: duration,
            });
        }
        Ok(())
    }

    /// Attach an id, producing a stored leg.
    pub fn with_id(self, id: LegId) -> Leg {
        Leg {
            id,
            name: self.name,
            kind: self.kind,
            origin: self.origin,
            destination: self.destination,
            price: self.price,
            duration_mins: self.duration_mins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_leg(kind: LegKind) -> NewLeg {
        NewLeg {
            name: "Bus".to_string(),
            kind,
            origin: LocationId(1),
            destination: LocationId(2),
            price: Some(10.0),
            duration_mins: Some(30.0),
        }
    }

    #[test]
    fn parse_kind_any_case() {
        assert_eq!("FLIGHT".parse::<LegKind>().unwrap(), LegKind::Flight);
        assert_eq!("flight".parse::<LegKind>().unwrap(), LegKind::Flight);
        assert_eq!(" Other ".parse::<LegKind>().unwrap(), LegKind::Other);
        assert!(matches!(
            "BUS".parse::<LegKind>(),
            Err(DomainError::InvalidLegKind(_))
        ));
    }

    #[test]
    fn kind_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&LegKind::Flight).unwrap(),
            "\"FLIGHT\""
        );
        let kind: LegKind = serde_json::from_str("\"OTHER\"").unwrap();
        assert_eq!(kind, LegKind::Other);
    }

    #[test]
    fn missing_amounts_count_as_zero() {
        let mut leg = new_leg(LegKind::Other).with_id(LegId(1));
        leg.price = None;
        leg.duration_mins = None;

        assert_eq!(leg.price_or_zero(), 0.0);
        assert_eq!(leg.duration_or_zero(), 0.0);
    }

    #[test]
    fn validate_accepts_well_formed_leg() {
        assert!(new_leg(LegKind::Flight).validate().is_ok());

        let mut leg = new_leg(LegKind::Other);
        leg.price = None;
        leg.duration_mins = None;
        assert!(leg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_self_loop() {
        let mut leg = new_leg(LegKind::Other);
        leg.destination = leg.origin;
        assert!(matches!(leg.validate(), Err(DomainError::InvalidLeg(_))));
    }

    #[test]
    fn validate_rejects_negative_amounts() {
        let mut leg = new_leg(LegKind::Other);
        leg.price = Some(-1.0);
        assert!(matches!(
            leg.validate(),
            Err(DomainError::InvalidAmount { field: "price", .. })
        ));

        let mut leg = new_leg(LegKind::Other);
        leg.duration_mins = Some(f64::INFINITY);
        assert!(matches!(
            leg.validate(),
            Err(DomainError::InvalidAmount {
                field: "duration",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut leg = new_leg(LegKind::Other);
        leg.name = String::new();
        assert!(matches!(leg.validate(), Err(DomainError::EmptyName(_))));
    }
}
