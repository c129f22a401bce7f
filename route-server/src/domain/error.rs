//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from store and search errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A required name is blank
    #[error("{0} name is required")]
    EmptyName(&'static str),

    /// Latitude or longitude is outside its valid range
    #[error("invalid {axis}: {value}")]
    InvalidCoordinate { axis: &'static str, value: f64 },

    /// Price or duration is negative or not finite
    #[error("invalid {field}: {value} (must be a non-negative number)")]
    InvalidAmount { field: &'static str, value: f64 },

    /// Unknown leg kind
    #[error("invalid transportation type: {0} (expected FLIGHT or OTHER)")]
    InvalidLegKind(String),

    /// Invalid leg construction (e.g., origin equals destination)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Consecutive legs don't connect
    #[error("legs do not connect: leg ends at {0} but next leg starts at {1}")]
    LegsNotConnected(super::LocationId, super::LocationId),

    /// Route has no legs
    #[error("route must have at least one leg")]
    EmptyRoute,
}
