//! Location types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Opaque identifier of a location.
///
/// Ids are assigned by the store and never reused within a process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub u64);

impl fmt::Debug for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationId({})", self.0)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named place that legs start and end at.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The user-supplied part of a location, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    /// Create a new location payload.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Check the payload describes a real place.
    ///
    /// The name must be non-blank and the coordinates must be finite
    /// WGS84 degrees.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName("location"));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DomainError::InvalidCoordinate {
                axis: "latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DomainError::InvalidCoordinate {
                axis: "longitude",
                value: self.longitude,
            });
        }
        Ok(())
    }

    /// Attach an id, producing a stored location.
    pub fn with_id(self, id: LocationId) -> Location {
        Location {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
