//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase on the wire.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Leg, LegKind, Location, LocationId, NewLeg, NewLocation, Route};

/// Query parameters for route search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSearchQuery {
    pub from_location_id: Option<u64>,
    pub to_location_id: Option<u64>,

    /// Zero-based page number
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl RouteSearchQuery {
    /// Both endpoint ids, or the messages for whichever are missing.
    pub fn endpoints(&self) -> Result<(LocationId, LocationId), Vec<String>> {
        match (self.from_location_id, self.to_location_id) {
            (Some(from), Some(to)) => Ok((LocationId(from), LocationId(to))),
            (from, to) => {
                let mut messages = Vec::new();
                if from.is_none() {
                    messages.push("From location id is required".to_string());
                }
                if to.is_none() {
                    messages.push("To location id is required".to_string());
                }
                Err(messages)
            }
        }
    }
}

/// Paging parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub size: Option<usize>,
}

/// Query parameters for location search.
#[derive(Debug, Deserialize)]
pub struct LocationSearchQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

/// A location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for LocationDto {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.0,
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Body of a location create or update.
#[derive(Debug, Default, Deserialize)]
pub struct LocationRequest {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationRequest {
    /// Check required fields are present.
    ///
    /// Returns every failure at once so the client can fix them together.
    pub fn validate(self) -> Result<NewLocation, Vec<String>> {
        let mut messages = Vec::new();

        let name = self.name.filter(|n| !n.trim().is_empty());
        if name.is_none() {
            messages.push("Location name is required".to_string());
        }
        if self.latitude.is_none() {
            messages.push("Latitude is required".to_string());
        }
        if self.longitude.is_none() {
            messages.push("Longitude is required".to_string());
        }

        match (name, self.latitude, self.longitude) {
            (Some(name), Some(lat), Some(lon)) => Ok(NewLocation::new(name, lat, lon)),
            _ => Err(messages),
        }
    }
}

/// A transportation with both endpoints expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationDto {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LegKind,
    pub from_location: LocationDto,
    pub to_location: LocationDto,
    pub price: Option<f64>,
    pub duration_in_minutes: Option<f64>,
}

impl TransportationDto {
    pub fn new(leg: &Leg, from: &Location, to: &Location) -> Self {
        Self {
            id: leg.id.0,
            name: leg.name.clone(),
            kind: leg.kind,
            from_location: from.into(),
            to_location: to.into(),
            price: leg.price,
            duration_in_minutes: leg.duration_mins,
        }
    }
}

/// Body of a transportation create or update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationRequest {
    pub name: Option<String>,

    /// Kind name, in any letter case
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub from_location_id: Option<u64>,
    pub to_location_id: Option<u64>,
    pub price: Option<f64>,
    pub duration_in_minutes: Option<f64>,
}

impl TransportationRequest {
    /// Check required fields are present and the kind is known.
    pub fn validate(self) -> Result<NewLeg, Vec<String>> {
        let mut messages = Vec::new();

        let name = self.name.filter(|n| !n.trim().is_empty());
        if name.is_none() {
            messages.push("Transportation name is required".to_string());
        }

        let kind = match self.kind.as_deref().map(str::parse::<LegKind>) {
            Some(Ok(kind)) => Some(kind),
            Some(Err(e)) => {
                messages.push(e.to_string());
                None
            }
            None => {
                messages.push("Transportation type is required".to_string());
                None
            }
        };

        if self.from_location_id.is_none() {
            messages.push("From location id is required".to_string());
        }
        if self.to_location_id.is_none() {
            messages.push("To location id is required".to_string());
        }

        match (name, kind, self.from_location_id, self.to_location_id) {
            (Some(name), Some(kind), Some(from), Some(to)) => Ok(NewLeg {
                name,
                kind,
                origin: LocationId(from),
                destination: LocationId(to),
                price: self.price,
                duration_mins: self.duration_in_minutes,
            }),
            _ => Err(messages),
        }
    }
}

/// A route: its transportations in travel order with totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub transportations: Vec<TransportationDto>,
    pub total_duration: f64,
    pub total_price: f64,
}

impl RouteDto {
    /// Build from a route, resolving endpoints with `location`.
    ///
    /// Returns `None` if any endpoint cannot be resolved.
    pub fn from_route<'a, F>(route: &Route, mut location: F) -> Option<Self>
    where
        F: FnMut(LocationId) -> Option<&'a Location>,
    {
        let transportations = route
            .legs()
            .iter()
            .map(|leg| {
                let from = location(leg.origin)?;
                let to = location(leg.destination)?;
                Some(TransportationDto::new(leg, from, to))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            transportations,
            total_duration: route.total_duration(),
            total_price: route.total_price(),
        })
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: NaiveDateTime,
    pub status: u16,
    pub error: String,
    pub messages: Vec<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            status,
            error: error.into(),
            messages,
        }
    }
}
